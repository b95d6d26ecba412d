//! Errors raised while talking to the remote recipe API.

/// Error fetching data from the remote API.
///
/// Every variant aborts the operation that produced it; nothing is retried
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the canonical reason phrase.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Construct a status error from a code and message.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Message suitable for the recipes surface's message region.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, .. } => {
                format!("Failed to load recipes ({status}). Please try again.")
            }
            Self::Transport(_) => {
                "Could not reach the recipe service. Please try again.".to_string()
            }
            Self::Decode(_) => "The recipe service sent an unexpected response.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_for_status_errors() {
        assert_eq!(ApiError::status(500, "boom").status_code(), Some(500));
        assert_eq!(ApiError::Transport("reset".into()).status_code(), None);
        assert_eq!(ApiError::Decode("eof".into()).status_code(), None);
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::status(404, "Not Found");
        assert_eq!(err.to_string(), "API error (404): Not Found");
    }

    #[test]
    fn user_message_mentions_status() {
        let msg = ApiError::status(500, "Internal Server Error").user_message();
        assert!(msg.contains("500"));
        assert!(msg.contains("try again"));
    }
}
