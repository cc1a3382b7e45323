//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::api::{BoundaryInfo, VerificationData};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of verifying one coordinate from the command line
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    /// Latitude that was checked
    pub latitude: f64,
    /// Longitude that was checked
    pub longitude: f64,
    /// The verdict
    #[serde(flatten)]
    pub verification: VerificationData,
}

/// The loaded boundary, for the `boundary` command
#[derive(Debug, Serialize)]
pub struct BoundaryReport {
    /// Where the configuration came from
    pub source: String,
    /// Boundary details
    #[serde(flatten)]
    pub boundary: BoundaryInfo,
}

impl VerifyReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn to_human(&self) -> String {
        let v = &self.verification;
        let mut out = String::new();

        let banner = if v.gps_verified {
            "VERIFIED".green().bold()
        } else {
            "REJECTED".red().bold()
        };
        let _ = writeln!(out, "{banner} ({:.6}, {:.6})", self.latitude, self.longitude);
        let _ = writeln!(out, "  {}", v.reason);

        if let Some(campus) = &v.campus {
            let _ = writeln!(out, "  Campus:    {campus}");
        }
        if let Some(distance) = v.distance {
            let _ = writeln!(out, "  Distance:  {distance:.1}m from center");
        }
        if let Some(edge) = v.distance_to_boundary {
            let _ = writeln!(out, "  Boundary:  {edge:.1}m away");
        }
        if let Some(accuracy) = v.accuracy {
            let _ = writeln!(out, "  Accuracy:  {accuracy}m");
        }
        out
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl BoundaryReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn to_human(&self) -> String {
        let b = &self.boundary;
        let mut out = String::new();

        let _ = writeln!(out, "{} ({})", b.name.bold(), self.source);
        let _ = writeln!(out, "  Center:        ({:.6}, {:.6})", b.center.latitude, b.center.longitude);
        match (&b.polygon, b.radius) {
            (Some(polygon), _) => {
                let _ = writeln!(out, "  Containment:   polygon, {} vertices", polygon.len());
                for (i, [lat, lon]) in polygon.iter().enumerate() {
                    let _ = writeln!(out, "    {:>3}. ({lat:.6}, {lon:.6})", i + 1);
                }
            },
            (None, Some(radius)) => {
                let _ = writeln!(out, "  Containment:   radius, {radius:.1}m");
            },
            (None, None) => {},
        }
        if let Some(bounds) = &b.bounds {
            let _ = writeln!(
                out,
                "  Bounds:        lat {:.6}..{:.6}, lon {:.6}..{:.6}",
                bounds.min_latitude, bounds.max_latitude, bounds.min_longitude, bounds.max_longitude
            );
        }
        let _ = writeln!(out, "  Max accuracy:  {}m", b.max_accuracy);
        out
    }
}
