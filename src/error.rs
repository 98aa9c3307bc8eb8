use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: server responded with status {0}")]
    Unauthorized(u16),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Classify a non-2xx HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized(status),
            other => ClientError::Status(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
