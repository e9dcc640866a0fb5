//! Shared error type
//!
//! The engine's layers funnel into this enum: persistence faults wrap
//! `sqlx::Error`, config loading reports what failed to resolve, and
//! lookup misses carry the description of what was asked for. Handlers
//! translate these into HTTP responses; nothing here knows about axum.

use thiserror::Error;

/// Result alias used throughout the engine crates
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared between the common crate and the service
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite operation failed; surfaced as-is, no internal retry
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem fault (data folder creation, config file reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file missing a usable value or failing to parse
    #[error("Configuration error: {0}")]
    Config(String),

    /// A project, component, or progress record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied value rejected before any state change
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invariant breach that should not happen in normal operation
    /// (undecodable stored JSON, unknown enum text in a column)
    #[error("Internal error: {0}")]
    Internal(String),
}
