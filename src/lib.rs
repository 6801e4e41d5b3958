//! # User Center
//!
//! Account registration, login and user administration over HTTP, built with
//! Axum and PostgreSQL.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - User entity, query criteria and the repository trait
//! - **Application Layer** ([`application`]) - Business rules, sessions and password hashing
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL repository
//! - **API Layer** ([`api`]) - Handlers, DTOs, middleware and the response envelope
//!
//! ## Features
//!
//! - Registration and login with Argon2id password hashes
//! - Transparent upgrade of legacy salted-MD5 hashes on login
//! - Signed bearer tokens with server-side revocation on logout
//! - Administrator-only user management with filtered, paginated listing
//! - Uniform `{code, data, message}` envelope for every outcome
//!
//! ## Quick Start
//!
//! ```bash
//! # Apply migrations
//! cargo run --bin admin -- --config config.yml migrate
//!
//! # Start the service
//! cargo run -- --config config.yml
//! ```
//!
//! ## Configuration
//!
//! Loaded from YAML with environment overrides; see [`config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, PasswordEncoder, UserService};
    pub use crate::domain::entities::{NewUser, User, UserPatch, UserRole};
    pub use crate::error::{AppError, ErrorCode};
    pub use crate::state::AppState;
}
