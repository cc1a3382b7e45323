//! Verify command - check one coordinate from the command line

use std::path::Path;
use std::process::ExitCode;

use geofence::api::VerificationData;
use geofence::core::models::Coordinate;
use geofence::output::{OutputMode, VerifyReport};

/// Verify a coordinate; exits non-zero when the location is rejected
pub fn verify(
    config_path: Option<&Path>,
    latitude: f64,
    longitude: f64,
    accuracy: Option<f64>,
    output_mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let (_, verifier) = super::load_verifier(config_path)?;

    let result = verifier.verify_location(Coordinate::new(latitude, longitude), accuracy);
    let report = VerifyReport {
        latitude,
        longitude,
        verification: VerificationData::from(&result),
    };
    report.render(output_mode);

    Ok(if result.is_verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
