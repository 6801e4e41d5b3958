//! Business logic services for the application layer.

pub mod auth_service;
pub mod password_encoder;
pub mod user_service;

pub use auth_service::{AuthService, Claims, IssuedToken};
pub use password_encoder::PasswordEncoder;
pub use user_service::{AddUserInput, ListUsersInput, UpdateUserInput, UserService};
