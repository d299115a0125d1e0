//! CLI command implementations.

pub mod catalog;
pub mod episodes;
pub mod rename;
pub mod rollback;
