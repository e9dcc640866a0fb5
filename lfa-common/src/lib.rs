//! # LFA Studio Common Library
//!
//! Shared code for the LFA Studio service:
//! - Error types
//! - Configuration loading (TOML + environment)
//! - Calendar/time utilities used by streak accounting

pub mod config;
pub mod error;
pub mod time;

pub use error::{Error, Result};
