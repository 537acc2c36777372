//! Error types for the pole/zero designer

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum PzError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(String),

    #[error("Design is empty")]
    EmptyDesign,

    #[error("No all-pass section chosen for the cascade")]
    EmptyCascade,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PzError {
    /// Validation failures are meant for user-facing display; the rest come
    /// from the persistence layer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_)
                | Self::DuplicateParameter(_)
                | Self::EmptyDesign
                | Self::EmptyCascade
        )
    }
}

/// Result type alias
pub type PzResult<T> = Result<T, PzError>;
