//! Output generators.

pub mod filename;
pub mod table;
