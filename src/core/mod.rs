//! Core business logic modules.

pub mod catalog;
pub mod normalizer;
pub mod reconciler;
pub mod rollback;
pub mod walker;
