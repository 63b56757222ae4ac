//! Query and result shapes for advocate listings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::advocate::Advocate;

/// Raw listing parameters as they arrive from a query string.
///
/// Values are validated and clamped by
/// [`crate::services::advocates::list_advocates`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdvocatesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// One page of advocates plus the metadata needed to paginate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvocatePage {
    pub advocates: Vec<Advocate>,
    /// Number of advocates matching the search across all pages.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}
