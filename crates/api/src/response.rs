//! Shared response envelope types for API handlers.
//!
//! Single objects use the `{ "data": ... }` envelope; listings add a
//! `"pagination"` object so every paginated endpoint reports `page`, `limit`,
//! `total`, and `pages` the same way.

use campushub_core::pagination::PageMeta;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: branch }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "data": [...], "pagination": {...} }` listing envelope.
///
/// ```ignore
/// Ok(Json(Paginated { data: rows, pagination: PageMeta::new(page, total) }))
/// ```
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}
