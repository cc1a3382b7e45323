//! geofence - Campus geofence verification for hostel night attendance
//!
//! Serves the geofencing API over HTTP, or verifies single coordinates and
//! prints the campus boundary from the command line.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

use std::process::ExitCode;

mod cli;
mod commands;
#[cfg(feature = "server")]
mod server;

/// Main entry point for the geofence CLI
///
/// Exit codes: 0 success or verified, 1 location rejected, 2 error.
fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        },
    }
}
