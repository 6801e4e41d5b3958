//! Data Transfer Objects for API requests.
//!
//! All DTOs use Serde for JSON deserialization and validator for input
//! validation. Responses use the view types in [`crate::application::views`].

pub mod common;
pub mod page;
pub mod user;

pub use common::{DeleteRequest, IdQuery};
pub use page::PageRequest;
pub use user::{
    UserAddRequest, UserLoginRequest, UserQueryRequest, UserRegisterRequest, UserUpdateRequest,
};
