//! Row models and Create/Update DTOs, one module per table group.

pub mod catalog;
pub mod rating;
pub mod resource;
pub mod roadmap;
pub mod session;
pub mod subject;
pub mod user;
