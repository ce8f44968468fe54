use std::path::Path;

use diffeq::result::MemoryResult;

use crate::AttractorErrors;

/// Writes the trajectory as `t,x,y,z` rows.
pub fn write_trajectory_csv(
    result: &MemoryResult<3>,
    path: &Path,
) -> Result<(), AttractorErrors> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["t", "x", "y", "z"])?;
    for (t, state) in result.t.iter().zip(&result.y) {
        writer.write_record([
            t.to_string(),
            state[0].to_string(),
            state[1].to_string(),
            state[2].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
