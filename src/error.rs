use thiserror::Error;

/// Per-repository failure. Recorded by the aggregator, never fatal to the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloneError {
    #[error("invalid SSH URL: {0}")]
    InvalidFormat(String),

    #[error("clone failed: {detail}")]
    SubprocessFailure { detail: String },

    #[error("clone task aborted: {0}")]
    Aborted(String),
}

impl CloneError {
    /// Text shown under a failed repository in verbose listings
    pub fn detail(&self) -> &str {
        match self {
            CloneError::InvalidFormat(_) => "invalid SSH URL",
            CloneError::SubprocessFailure { detail } => detail,
            CloneError::Aborted(reason) => reason,
        }
    }
}

#[derive(Error, Debug)]
pub enum MultiError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
