use thiserror::Error;

/// Failure raised by a decision function.
///
/// Decision functions are caller code; whatever they report is carried to the
/// top-level call unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecisionError(pub String);

impl DecisionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("Decision function failed: {0}")]
    Decision(#[from] DecisionError),

    #[error("Invalid id prefix {0:?}: must start with a letter or underscore")]
    InvalidPrefix(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
