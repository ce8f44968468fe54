use std::fs;
use std::path::PathBuf;

use attractor::{AttractorConfig, run};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("attractor_tests").join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn short_run(name: &str) -> AttractorConfig {
    // 30 time units is plenty to form both lobes and keeps the test quick
    AttractorConfig::default()
        .with_time_span(30.0, 0.01)
        .with_figsize(4.0, 3.2, 100)
        .with_output_path(scratch_dir(name).join("lorenz_attractor.png"))
}

#[test]
fn pipeline_writes_a_transparent_png() {
    let config = short_run("writes_png");
    let summary = run(&config).unwrap();
    assert_eq!(summary.samples, 3000);

    let img = image::open(&config.output_path).unwrap().to_rgba8();
    assert_eq!((img.width(), img.height()), (summary.width, summary.height));
    // the background is transparent and the stroke is not
    assert!(img.pixels().any(|p| p.0[3] == 0));
    assert!(img.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn content_reaches_every_cropped_edge() {
    let config = short_run("content_bbox");
    run(&config).unwrap();

    let img = image::open(&config.output_path).unwrap().to_rgba8();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    // the image is cropped to its content, so painted pixels must touch all
    // four edges
    assert_eq!(min_x, 0);
    assert_eq!(min_y, 0);
    assert_eq!(max_x, img.width() - 1);
    assert_eq!(max_y, img.height() - 1);
}

#[test]
fn identical_runs_write_identical_bytes() {
    let dir = scratch_dir("idempotent");
    let first = AttractorConfig::default()
        .with_time_span(20.0, 0.01)
        .with_figsize(3.0, 2.4, 100)
        .with_output_path(dir.join("a.png"));
    let second = first.clone().with_output_path(dir.join("b.png"));

    run(&first).unwrap();
    run(&second).unwrap();

    let a = fs::read(dir.join("a.png")).unwrap();
    let b = fs::read(dir.join("b.png")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn csv_export_holds_one_row_per_sample() {
    let dir = scratch_dir("csv_export");
    let config = AttractorConfig::default()
        .with_time_span(1.0, 0.01)
        .with_figsize(2.0, 1.6, 100)
        .with_output_path(dir.join("lorenz_attractor.png"))
        .with_trajectory_csv(dir.join("trajectory.csv"));

    let summary = run(&config).unwrap();
    let text = fs::read_to_string(dir.join("trajectory.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "t,x,y,z");
    assert_eq!(lines.len(), summary.samples + 1);
}

#[test]
fn divergent_parameters_leave_no_output_behind() {
    let dir = scratch_dir("no_partial_output");
    let out = dir.join("lorenz_attractor.png");
    let _ = fs::remove_file(&out);
    let config = AttractorConfig::default()
        .with_state0([f64::NAN, 0.0, 0.0])
        .with_time_span(1.0, 0.01)
        .with_output_path(out.clone());

    assert!(run(&config).is_err());
    assert!(!out.exists());
}
