//! Core domain entities representing the user data model.
//!
//! Entities are plain data structures without business logic. Creation and
//! partial updates use dedicated input types:
//!
//! - [`NewUser`] - For inserting a record
//! - [`UserPatch`] - For partial profile updates
//! - [`UserQuery`] - For filtered, sorted, paginated listings

pub mod user;
pub mod user_query;

pub use user::{NewUser, User, UserPatch, UserRole};
pub use user_query::{SortField, SortOrder, UserFilter, UserQuery};
