//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands;
use geofence::output::OutputMode;

/// geofence - Campus geofence verification for attendance
#[derive(Parser, Debug)]
#[command(
    name = "geofence",
    version,
    about = "Campus geofence verification for attendance",
    long_about = "Decide whether a GPS fix lies within the campus boundary.\n\n\
                  The boundary is a polygon (or a radius around the campus center)\n\
                  loaded once at startup. Fixes with poor accuracy are rejected."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geofence.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the geofencing HTTP API
    #[cfg(feature = "server")]
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Verify a single coordinate against the campus boundary
    Verify {
        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Reported GPS accuracy in meters
        #[arg(short, long)]
        accuracy: Option<f64>,
    },

    /// Show the loaded campus boundary
    Boundary,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        #[cfg(feature = "server")]
        Some(Command::Serve { host, port }) => {
            commands::serve(config, host, port).map(|()| ExitCode::SUCCESS)
        },
        Some(Command::Verify {
            latitude,
            longitude,
            accuracy,
        }) => commands::verify(config, latitude, longitude, accuracy, output_mode),
        Some(Command::Boundary) => commands::boundary(config, output_mode).map(|()| ExitCode::SUCCESS),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("geofence v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(ExitCode::SUCCESS)
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("geofence v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'geofence --help' for usage");
                println!("Run 'geofence boundary' to see the loaded campus");
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}
