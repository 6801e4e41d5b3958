//! Paging and sorting fields shared by listing requests.

use serde::Deserialize;

/// Page number, page size and single-field sort.
///
/// Missing or non-positive values are normalized by the service, so every
/// field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    pub page_num: i64,
    pub page_size: i64,
    pub sort_field: Option<String>,
    /// `ascend` or `descend`.
    pub sort_order: Option<String>,
}
