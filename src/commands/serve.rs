//! Serve command - run the geofencing HTTP API

use std::path::Path;

use crate::server;

/// Start the HTTP server; blocks until the process is stopped
pub fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let (mut config, verifier) = super::load_verifier(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    server::tiny_http::serve(&config.server, verifier)
}
