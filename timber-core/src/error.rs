use thiserror::Error;

/// Errors raised by the binding before anything reaches the native logger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimberError {
    /// The caller handed over something that cannot be forwarded as a message.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An integer that is not one of the `LEVEL_*` ordinals.
    #[error("unknown log level ordinal: {0}")]
    UnknownLevel(i32),
}

pub type Result<T> = std::result::Result<T, TimberError>;
