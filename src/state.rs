use std::sync::Arc;

use crate::application::services::{AuthService, UserService};

/// Shared handles passed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            user_service,
            auth_service,
        }
    }
}
