use thiserror::Error;

/// Errors surfaced by the REST client, normalized for direct display.
/// Callers never see raw transport detail; every failure maps to exactly
/// one of these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Cannot reach server. Is the backend running?")]
    Network,
    #[error("Order not found.")]
    NotFound,
    #[error("Invalid data. Please check your inputs.")]
    Validation,
    #[error("Server error {status}")]
    Server { status: u16 },
}

impl ApiError {
    /// Map an HTTP status onto the taxonomy. Only meaningful for non-2xx
    /// statuses; a 2xx whose body cannot be decoded also lands here.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => ApiError::NotFound,
            400 => ApiError::Validation,
            status => ApiError::Server { status },
        }
    }
}
