//! Error types for the authorization engine
//!
//! Denials are ordinary `false` verdicts, never errors. The variants here
//! cover caller misuse and parsing at the string boundary.

use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// Malformed access query (missing or blank required field)
    #[error("Invalid access query: {0}")]
    InvalidQuery(String),

    /// Role string outside the closed role set
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Resource kind string outside the closed resource set
    #[error("Unknown resource kind: {0}")]
    UnknownResource(String),

    /// Action string that is not `verb[_scope]`
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
