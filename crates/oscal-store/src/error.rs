use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Workspace name failed validation. Message is user-facing.
    #[error("{0}")]
    InvalidName(String),

    #[error("workspace not found: {0}")]
    NotFound(String),

    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("timestamp error: {0}")]
    Timestamp(String),

    #[error(transparent)]
    Core(#[from] oscal_core::OscalError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "invalid_name",
            Self::NotFound(_) => "not_found",
            #[cfg(feature = "sqlite")]
            Self::Database(_) => "database",
            Self::Serialization(_) => "serialization",
            Self::Timestamp(_) => "timestamp",
            Self::Core(e) => e.code(),
            Self::Io(_) => "io",
        }
    }
}

impl From<time::error::Format> for StoreError {
    fn from(e: time::error::Format) -> Self {
        Self::Timestamp(e.to_string())
    }
}

impl From<time::error::Parse> for StoreError {
    fn from(e: time::error::Parse) -> Self {
        Self::Timestamp(e.to_string())
    }
}
