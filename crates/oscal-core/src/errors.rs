//! Error types for oscal-core.
//!
//! Only structural failures are errors: malformed JSON, unknown fields,
//! missing files, corrupt catalogs. Semantic problems in a well-formed
//! workspace are reported as [`crate::validate::Finding`]s instead.

use thiserror::Error;

pub type OscalResult<T> = Result<T, OscalError>;

#[derive(Debug, Error)]
pub enum OscalError {
    /// Input is well-formed but not acceptable. Message is user-facing.
    #[error("{0}")]
    InvalidArgument(String),

    /// A file or directory the caller named does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl OscalError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Stable machine-readable code for API/CLI consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
            Self::Invariant(_) => "invariant",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for OscalError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
