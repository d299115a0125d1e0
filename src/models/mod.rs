//! Data models.

pub mod config;
pub mod episode;
pub mod report;
pub mod rollback;
