//! Single-id request shapes.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Body of `POST /user/delete`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
}

/// `?id=` query parameter. A missing id reads as 0 and is rejected downstream.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct IdQuery {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub id: i64,
}
