use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid usage")]
    InvalidUsage,
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("{0}")]
    Message(String),
}

impl RuntimeError {
    /// Text worth showing to the sender before the usage line. Bare usage
    /// failures have none.
    pub fn user_message(&self) -> Option<String> {
        match self {
            RuntimeError::InvalidUsage => None,
            err => Some(err.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(
        "Completion '{text}' at index 0 requires a preceding word, but nothing precedes the first argument"
    )]
    UnreachableCompletion { text: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }

    pub fn usage() -> Self {
        CommandError::Runtime(RuntimeError::InvalidUsage)
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
