//! Error types for the Parley plugin.
//!
//! The core state machines (store, pipeline, gestures, drawer) never fail: invalid
//! references and invalid input are silent no-ops. [`ParleyError`] covers the
//! fallible edges only, which are loading themes and response pools from disk and
//! parsing configuration.

use thiserror::Error;

/// The main error type for Parley operations.
///
/// # Examples
///
/// ```
/// use parley::ParleyError;
///
/// fn load() -> Result<(), ParleyError> {
///     Err(ParleyError::Responses("pool is empty".to_string()))
/// }
///
/// assert!(load().unwrap_err().to_string().contains("pool is empty"));
/// ```
#[derive(Debug, Error)]
pub enum ParleyError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Response pool file could not be read, parsed, or was empty.
    #[error("Response pool error: {0}")]
    Responses(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Parley operations.
pub type Result<T> = std::result::Result<T, ParleyError>;
