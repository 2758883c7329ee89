//! Error types for the CLT vs PJ engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can occur while loading tax tables and while
//! validating amounts at the API and CLI boundaries. The calculators
//! themselves are total over non-negative amounts and never fail.

use thiserror::Error;

/// The main error type for the CLT vs PJ engine.
///
/// # Example
///
/// ```
/// use clt_pj_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/inss.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/inss.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table broke one of its ordering or rate invariants.
    #[error("Invalid bracket table '{table}': {message}")]
    InvalidTable {
        /// The name of the offending table.
        table: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// An input amount was rejected before reaching the calculators.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
