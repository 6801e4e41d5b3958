//! HTTP middleware for request processing and protection.
//!
//! Provides session extraction, admin authorization, CORS, panic recovery
//! and request tracing.

pub mod auth;
pub mod cors;
pub mod recovery;
pub mod tracing;
