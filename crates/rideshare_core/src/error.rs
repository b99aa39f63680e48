use thiserror::Error;

/// Every failure the dispatch core reports.
///
/// Malformed input and "not found" share the `InvalidArgument` kind; callers
/// tell them apart by the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DispatchError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DispatchError::InvalidArgument(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            DispatchError::InvalidArgument(message) => message,
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
