//! Boundary command - show the campus boundary the verifier would use

use std::path::Path;

use geofence::api::BoundaryInfo;
use geofence::output::{BoundaryReport, OutputMode};
use geofence::paths;

/// Print the loaded campus boundary
pub fn boundary(config_path: Option<&Path>, output_mode: OutputMode) -> anyhow::Result<()> {
    let (_, verifier) = super::load_verifier(config_path)?;

    let source = paths::resolve_config(config_path)
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());

    BoundaryReport {
        source,
        boundary: BoundaryInfo::from(&verifier),
    }
    .render(output_mode);
    Ok(())
}
