/// Error types shared across the client
use thiserror::Error;

/// Input that was rejected before any request was made
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Phone number does not look like a Ghanaian mobile number
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// Capacity is not a number in the accepted range
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    /// Network name is not one of the supported carriers
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Payment gateway name is not supported
    #[error("Unknown payment method: {0}")]
    UnknownGateway(String),

    /// Store slugs are lowercase letters, digits and dashes
    #[error("Invalid store name: {0}")]
    InvalidSlug(String),
}

/// Errors talking to the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with `success: false` or a non-2xx status
    #[error("{message}")]
    Server {
        /// HTTP status code of the response
        status: u16,
        /// Message supplied by the server
        message: String,
    },

    /// The response body was not the expected JSON shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The request was refused locally and never sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    /// Text suitable for showing to an end user.
    ///
    /// Server messages are shown verbatim; everything else becomes a
    /// generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Invalid(e) => e.to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Errors reading bulk purchase files
#[derive(Debug, Error)]
pub enum BulkError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}
