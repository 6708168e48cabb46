//! Error types for XML extraction

use thiserror::Error;

/// Errors that can occur while loading a response payload
///
/// Callers treat these as soft failures: a payload that fails to parse is
/// equivalent to a missing field or an empty record list.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not well-formed XML
    #[error("Malformed XML payload: {0}")]
    MalformedXml(#[from] xmltree::ParseError),
}

/// Result type alias for extraction operations
pub type ParseResult<T> = Result<T, ParseError>;
