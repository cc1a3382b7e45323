//! Configuration loading
//!
//! Configuration is read once at startup from a TOML file (see [`crate::paths`]
//! for the lookup order), then overridden by environment variables. The
//! result is turned into an immutable [`GeofenceVerifier`]; nothing here is
//! consulted again per request.
//!
//! ```toml
//! [campus]
//! name = "JKLU Campus"
//! latitude = 26.8351
//! longitude = 75.6508
//! radius_m = 800.0
//! polygon = [[26.836760, 75.651187], [26.837109, 75.649523], [26.836655, 75.648472]]
//!
//! [gps]
//! max_accuracy_m = 500.0
//!
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! workers = 4
//! ```
//!
//! When the `[campus]` section is present it describes the campus fully:
//! omitted `radius_m` or `polygon` mean "none". When the section is absent
//! the built-in JKLU campus is used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{BoundaryError, CampusBoundary, Coordinate};
use crate::core::services::{DEFAULT_MAX_ACCURACY_M, GeofenceVerifier};
use crate::paths;

/// Environment variable overriding the campus name
pub const ENV_CAMPUS_NAME: &str = "CAMPUS_NAME";
/// Environment variable overriding the center latitude
pub const ENV_CAMPUS_LATITUDE: &str = "CAMPUS_LATITUDE";
/// Environment variable overriding the center longitude
pub const ENV_CAMPUS_LONGITUDE: &str = "CAMPUS_LONGITUDE";
/// Environment variable overriding the radius (empty clears it)
pub const ENV_CAMPUS_RADIUS: &str = "CAMPUS_RADIUS";
/// Environment variable overriding the polygon, a JSON array of `[lat, lon]` (empty clears it)
pub const ENV_CAMPUS_POLYGON: &str = "CAMPUS_POLYGON";
/// Environment variable overriding the accuracy threshold
pub const ENV_GPS_MAX_ACCURACY: &str = "GPS_MAX_ACCURACY";
/// Environment variable overriding the listen host
pub const ENV_HOST: &str = "GEOFENCE_HOST";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "GEOFENCE_PORT";
/// Environment variable overriding the number of HTTP workers
pub const ENV_WORKERS: &str = "GEOFENCE_WORKERS";

/// JKLU campus outline in `[latitude, longitude]` order
const JKLU_POLYGON: [[f64; 2]; 14] = [
    [26.836_760, 75.651_187],
    [26.837_109, 75.649_523],
    [26.836_655, 75.648_472],
    [26.836_079, 75.648_307],
    [26.835_495, 75.650_194],
    [26.834_788, 75.650_150],
    [26.834_635, 75.650_973],
    [26.833_430, 75.651_435],
    [26.832_659, 75.652_500],
    [26.833_776, 75.653_021],
    [26.834_072, 75.652_374],
    [26.834_935, 75.652_472],
    [26.835_321, 75.651_554],
    [26.835_838, 75.651_320],
];

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error(
        "invalid config{}: {source}",
        .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default()
    )]
    Parse {
        /// File that failed to parse, if any
        path: Option<PathBuf>,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// An environment override could not be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// A setting is out of range
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Dotted setting name
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The campus geometry is unusable
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Campus boundary
    #[serde(default)]
    pub campus: CampusConfig,
    /// GPS acceptance policy
    #[serde(default)]
    pub gps: GpsConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Campus boundary settings
#[derive(Debug, Clone, Deserialize)]
pub struct CampusConfig {
    /// Display name reported with verified locations
    #[serde(default = "default_campus_name")]
    pub name: String,
    /// Center latitude in decimal degrees
    pub latitude: f64,
    /// Center longitude in decimal degrees
    pub longitude: f64,
    /// Radius in meters, used only when no polygon is set
    #[serde(default)]
    pub radius_m: Option<f64>,
    /// Outline vertices as `[latitude, longitude]` pairs
    #[serde(default)]
    pub polygon: Option<Vec<[f64; 2]>>,
}

fn default_campus_name() -> String {
    "Campus".to_string()
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            name: "JKLU Campus".to_string(),
            latitude: 26.8351,
            longitude: 75.6508,
            radius_m: Some(800.0),
            polygon: Some(JKLU_POLYGON.to_vec()),
        }
    }
}

/// GPS acceptance policy
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GpsConfig {
    /// Largest accuracy radius (meters) still accepted
    #[serde(default = "default_max_accuracy")]
    pub max_accuracy_m: f64,
}

const fn default_max_accuracy() -> f64 {
    DEFAULT_MAX_ACCURACY_M
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: default_max_accuracy(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of request worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

const fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind, `host:port`
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from the first file found in lookup order, then
    /// apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match paths::resolve_config(explicit) {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            },
            None => {
                log::info!("No configuration file found, using built-in campus");
                Self::default()
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Parse TOML config text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_CAMPUS_NAME) {
            self.campus.name = name;
        }
        if let Some(v) = lookup(ENV_CAMPUS_LATITUDE) {
            self.campus.latitude = parse_env(ENV_CAMPUS_LATITUDE, &v)?;
        }
        if let Some(v) = lookup(ENV_CAMPUS_LONGITUDE) {
            self.campus.longitude = parse_env(ENV_CAMPUS_LONGITUDE, &v)?;
        }
        if let Some(v) = lookup(ENV_CAMPUS_RADIUS) {
            self.campus.radius_m = if v.trim().is_empty() {
                None
            } else {
                Some(parse_env(ENV_CAMPUS_RADIUS, &v)?)
            };
        }
        if let Some(v) = lookup(ENV_CAMPUS_POLYGON) {
            self.campus.polygon = if v.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(&v).map_err(|e| ConfigError::InvalidEnv {
                    var: ENV_CAMPUS_POLYGON,
                    value: v.clone(),
                    reason: e.to_string(),
                })?)
            };
        }
        if let Some(v) = lookup(ENV_GPS_MAX_ACCURACY) {
            self.gps.max_accuracy_m = parse_env(ENV_GPS_MAX_ACCURACY, &v)?;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(v) = lookup(ENV_PORT) {
            self.server.port = parse_env(ENV_PORT, &v)?;
        }
        if let Some(v) = lookup(ENV_WORKERS) {
            self.server.workers = parse_env(ENV_WORKERS, &v)?;
        }
        Ok(())
    }

    /// Build the validated campus boundary
    pub fn boundary(&self) -> Result<CampusBoundary, ConfigError> {
        let campus = &self.campus;
        let polygon = campus
            .polygon
            .as_ref()
            .map(|vertices| vertices.iter().copied().map(Coordinate::from).collect());
        Ok(CampusBoundary::new(
            campus.name.clone(),
            Coordinate::new(campus.latitude, campus.longitude),
            campus.radius_m,
            polygon,
        )?)
    }

    /// Build the verifier described by this configuration
    pub fn verifier(&self) -> Result<GeofenceVerifier, ConfigError> {
        GeofenceVerifier::new(self.boundary()?, self.gps.max_accuracy_m).map_err(|e| {
            ConfigError::InvalidValue {
                field: "gps.max_accuracy_m",
                reason: e.to_string(),
            }
        })
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
