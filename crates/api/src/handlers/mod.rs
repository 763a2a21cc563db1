//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod rating;
pub mod resource;
pub mod roadmap;
pub mod subject;

use campushub_core::pagination::Page;
use serde::Deserialize;

use crate::error::AppResult;

/// Raw `?page=&limit=` query parameters shared by every paginated endpoint.
///
/// Values are validated through [`Page::from_params`] so out-of-range input
/// becomes a 400 before any query runs.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn validate(&self) -> AppResult<Page> {
        Ok(Page::from_params(self.page, self.limit)?)
    }
}
