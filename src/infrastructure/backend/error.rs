//! Client-side errors for backend and pass-through calls

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The bearer token was refused; the session should be discarded
    #[error("Unauthorized: token expired or invalid")]
    Unauthorized,

    /// The backend answered `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Upstream { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ClientError::Transport("reset".into()).is_retryable());
        assert!(ClientError::Upstream { status: 503, message: String::new() }.is_retryable());
        assert!(!ClientError::Upstream { status: 404, message: String::new() }.is_retryable());
        assert!(!ClientError::Unauthorized.is_retryable());
        assert!(!ClientError::Rejected("no".into()).is_retryable());
    }

    #[test]
    fn test_rejected_displays_backend_message() {
        assert_eq!(
            ClientError::Rejected("Invalid credentials".into()).to_string(),
            "Invalid credentials"
        );
    }
}
