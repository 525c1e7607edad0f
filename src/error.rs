//! Error types for the image service and the command-line front-end.

use thiserror::Error;

/// Failures of the remote image-generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The API returned a non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response parsed but carried no image.
    #[error("No image in response: {0}")]
    NoImage(String),

    /// An opaque failure that only carries a message.
    #[error("{0}")]
    Rejected(String),

    /// An opaque failure with no message at all.
    #[error("unknown service failure")]
    Unknown,
}

impl ServiceError {
    /// Human-readable message for this failure, if it carries one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
        }
    }
}

/// Errors surfaced by the command-line front-end.
#[derive(Debug, Error)]
pub enum AppError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The generated payload could not be decoded for saving.
    #[error("Image decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },

    /// Generation settled in the failed state.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_passes_through() {
        let err = ServiceError::Rejected("rate limited".into());
        assert_eq!(err.message().as_deref(), Some("rate limited"));
    }

    #[test]
    fn empty_messages_are_absent() {
        assert!(ServiceError::Unknown.message().is_none());
        assert!(ServiceError::Rejected(String::new()).message().is_none());
        assert!(ServiceError::Rejected("   ".into()).message().is_none());
    }

    #[test]
    fn api_message_includes_status() {
        let err = ServiceError::Api { status: 429, message: "quota".into() };
        assert_eq!(err.message().as_deref(), Some("API error (429): quota"));
    }
}
