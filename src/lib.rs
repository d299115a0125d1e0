//! Media File Tools Library
//!
//! A library for cataloging movie collections and renaming TV episode files
//! after episode tables loaded from CSV or fetched from TMDB.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
