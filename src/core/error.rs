//! Error types for XMP operations
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Error types for XMP operations
#[derive(Debug, Error)]
pub enum XmpError {
    /// Bad parameter provided to a function
    #[error("Bad parameter: {0}")]
    BadParam(String),

    /// A value could not be converted to or from its field type
    #[error("Bad value: {0}")]
    BadValue(String),

    /// Bad schema, namespace or model definition
    #[error("Bad schema: {0}")]
    BadSchema(String),

    /// Parse error (XML/RDF parsing failed)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A field value failed to convert while decoding in strict mode
    #[error("Invalid value at '{path}': {reason}")]
    InvalidField {
        /// Slash separated path of the offending attribute or element
        path: String,
        /// Conversion failure description
        reason: String,
    },

    /// Content that a typed field cannot hold without loss.
    ///
    /// The decoder keeps such content in the generic node tree instead.
    #[error("Unknown content: {0}")]
    UnknownContent(String),

    /// JSON projection error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for XMP operations
pub type XmpResult<T> = Result<T, XmpError>;
