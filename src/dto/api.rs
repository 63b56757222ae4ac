//! JSON bodies returned by the `/api` endpoints.

use serde::Serialize;

use crate::domain::advocate::Advocate;
use crate::dto::advocates::AdvocatePage;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Body of `GET /api/advocates`.
#[derive(Debug, Serialize)]
pub struct AdvocatesResponse {
    pub data: Vec<Advocate>,
    pub pagination: PaginationMeta,
}

impl From<AdvocatePage> for AdvocatesResponse {
    fn from(page: AdvocatePage) -> Self {
        Self {
            data: page.advocates,
            pagination: PaginationMeta {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            },
        }
    }
}

/// Body of `POST /api/seed`.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub advocates: Vec<Advocate>,
}

/// Body of every 4xx/5xx JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
