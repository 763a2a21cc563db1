//! Domain logic for the Campus Syllabus Hub.
//!
//! This crate has no I/O dependencies so its contents (pagination math,
//! query sanitization, role capabilities, roadmap aggregation) can be unit
//! tested without a database and reused by the API, seed tooling, and any
//! future CLI.

pub mod catalog;
pub mod error;
pub mod pagination;
pub mod rating;
pub mod roadmap;
pub mod roles;
pub mod search;
pub mod types;
