//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients (CLI, attendance handlers, etc.).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take the verifier and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    TEST_DEFAULT_ACCURACY_M, get_boundaries, test_location, validate_attendance_location,
    verify_location,
};
pub use types::{
    ApiResponse, BoundariesData, BoundaryInfo, CenterInfo, NumberValue, TestLocationData,
    VerificationData, VerifyLocationRequest,
};
