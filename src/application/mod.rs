//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose use cases to the HTTP
//! handlers. Results are returned as sanitized view objects from [`views`].
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Registration, login and user administration
//! - [`services::auth_service::AuthService`] - Session token issuing and revocation
//! - [`services::password_encoder::PasswordEncoder`] - Password hashing

pub mod services;
pub mod views;
