//! Command implementations

mod boundary;
#[cfg(feature = "server")]
mod serve;
mod verify;

use std::path::Path;

use anyhow::Context;

use geofence::config::AppConfig;
use geofence::core::services::GeofenceVerifier;

pub use boundary::boundary;
#[cfg(feature = "server")]
pub use serve::serve;
pub use verify::verify;

/// Load configuration and build the verifier it describes
fn load_verifier(config_path: Option<&Path>) -> anyhow::Result<(AppConfig, GeofenceVerifier)> {
    let config = AppConfig::load(config_path).context("Failed to load configuration")?;
    let verifier = config.verifier().context("Invalid campus boundary configuration")?;
    Ok((config, verifier))
}
