//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.
//! Requests are served by a fixed pool of worker threads sharing one
//! read-only verifier.

use std::io::{Cursor, Read};
use std::sync::Arc;
use std::thread;

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use geofence::api::{self, ApiError, ApiResponse, VerifyLocationRequest};
use geofence::config::ServerConfig;
use geofence::core::services::GeofenceVerifier;

/// Largest request body accepted, in bytes
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// A response ready to be written: status code plus JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonReply {
    /// HTTP status code
    pub status: u16,
    /// Serialized JSON body
    pub body: String,
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Bind and serve until the process is stopped
pub fn serve(config: &ServerConfig, verifier: GeofenceVerifier) -> anyhow::Result<()> {
    let addr = config.addr();
    let server =
        Arc::new(Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?);
    let verifier = Arc::new(verifier);
    let workers = config.workers.max(1);

    log::info!(
        "Serving geofence API for {} on http://{addr} with {workers} worker(s)",
        verifier.boundary().name()
    );

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let server = Arc::clone(&server);
            let verifier = Arc::clone(&verifier);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let response = handle_api_request(&mut request, &verifier);
                    if let Err(e) = request.respond(response) {
                        log::warn!("Failed to send response: {e}");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| anyhow::anyhow!("Server worker panicked"))?;
    }
    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
pub fn handle_api_request(
    request: &mut Request,
    verifier: &GeofenceVerifier,
) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let body = if method == Method::Post {
        match read_body(request.as_reader()) {
            Ok(body) => body,
            Err(e) => return into_response(error_reply(&e)),
        }
    } else {
        String::new()
    };

    let reply = route(&method, &url, &body, verifier);
    log::info!("{method} {url} -> {}", reply.status);
    into_response(reply)
}

/// Map a method, URL and body to a JSON reply
///
/// Accepts `/api/v1/...`, `/api/...` and bare paths; query strings are ignored.
pub fn route(method: &Method, url: &str, body: &str, verifier: &GeofenceVerifier) -> JsonReply {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);

    match (method, api_path) {
        (&Method::Get, "/geofencing/boundaries") => handle_result(api::get_boundaries(verifier)),

        (&Method::Post, "/geofencing/verify") => match parse_json_body::<VerifyLocationRequest>(body) {
            Ok(req) => handle_result(api::verify_location(verifier, &req)),
            Err(e) => error_reply(&e),
        },

        (&Method::Post, "/geofencing/test") => match parse_json_body::<VerifyLocationRequest>(body) {
            Ok(req) => handle_result(api::test_location(verifier, &req)),
            Err(e) => error_reply(&e),
        },

        (&Method::Post, "/geofencing/validate-attendance") => {
            match parse_json_body::<VerifyLocationRequest>(body) {
                Ok(req) => handle_result(api::validate_attendance_location(verifier, &req)),
                Err(e) => error_reply(&e),
            }
        },

        _ => error_reply(&ApiError::not_found(format!(
            "API endpoint not found: {method} {api_path}"
        ))),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read a request body of at most [`MAX_BODY_BYTES`]
fn read_body(reader: impl Read) -> Result<String, ApiError> {
    let mut body = String::new();
    reader
        .take(MAX_BODY_BYTES + 1)
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(ApiError::bad_request("Request body too large"));
    }
    Ok(body)
}

/// Parse a JSON request body
fn parse_json_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::bad_request("No data provided"));
    }
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> JsonReply {
    match result {
        Ok(data) => json_reply(&ApiResponse::success(data), 200),
        Err(e) => error_reply(&e),
    }
}

/// Create an error reply with the matching status code
fn error_reply(error: &ApiError) -> JsonReply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_reply(&response, error.status_code())
}

/// Serialize data to a JSON reply
fn json_reply<T: Serialize>(data: &T, status: u16) -> JsonReply {
    match serde_json::to_string(data) {
        Ok(body) => JsonReply { status, body },
        Err(e) => {
            log::error!("Failed to serialize response: {e}");
            let error = ApiError::internal("Failed to serialize response");
            let body = serde_json::json!({
                "success": false,
                "error": { "code": error.code.as_str(), "message": &error.message },
            });
            JsonReply {
                status: error.status_code(),
                body: body.to_string(),
            }
        },
    }
}

fn into_response(reply: JsonReply) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
