//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and wraps every outcome in
//! the [`response::BaseResponse`] envelope.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies and query parameters
//! - [`extract`] - Validating extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Session, authorization and cross-cutting layers
//! - [`response`] - The `{code, data, message}` envelope
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
