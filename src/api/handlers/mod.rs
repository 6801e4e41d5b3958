//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod health;
pub mod user;

pub use admin::{
    add_user_handler, delete_user_handler, get_user_handler, list_user_vo_by_page_handler,
    update_user_handler,
};
pub use health::health_handler;
pub use user::{
    get_login_user_handler, get_user_vo_handler, login_handler, logout_handler, register_handler,
};
