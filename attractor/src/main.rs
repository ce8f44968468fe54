use attractor::{AttractorConfig, run};

fn main() {
    let config = AttractorConfig::default().with_progress(true);
    match run(&config) {
        Ok(summary) => println!(
            "generated {} ({} samples, {}x{} px)",
            summary.output_path.display(),
            summary.samples,
            summary.width,
            summary.height
        ),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
