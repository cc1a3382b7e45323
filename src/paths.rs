//! Centralized path definitions for geofence
//!
//! This module is the single source of truth for where configuration is
//! looked up.
//!
//! ## Lookup Order
//!
//! ```text
//! --config <path>                  # explicit, must exist
//! ./geofence.toml                  # per-deployment, next to the binary's cwd
//! $XDG_CONFIG_HOME/geofence/
//! └── config.toml                  # per-user
//! (built-in defaults)              # JKLU campus
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths (current directory)
// =============================================================================

/// Local configuration filename
pub const LOCAL_CONFIG_FILE: &str = "geofence.toml";

/// Get path to `./geofence.toml`.
#[must_use]
pub fn local_config() -> PathBuf {
    PathBuf::from(".").join(LOCAL_CONFIG_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "geofence";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global geofence directory.
///
/// Returns `$XDG_CONFIG_HOME/geofence/` (or the platform equivalent).
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Find the first configuration file that exists, in lookup order.
///
/// An explicit path is returned as-is (existence is checked by the loader
/// so it can report a proper error).
#[must_use]
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    [local_config(), global_config()].into_iter().find(|p| p.is_file())
}
