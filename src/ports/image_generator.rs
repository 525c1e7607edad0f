//! Image generator port for the remote image-generation service.

use std::future::Future;
use std::pin::Pin;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// MIME type every generated image is delivered as.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Model selection fixed when a live generator is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSettings {
    /// The resolved model identifier (e.g., `"imagen-4.0-generate-001"`).
    pub model: String,
    /// Aspect ratio (e.g., `"16:9"`).
    pub aspect_ratio: String,
}

/// Base64-encoded JPEG payload returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Wrap an already base64-encoded payload.
    #[must_use]
    pub fn from_base64(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// Encode raw JPEG bytes.
    #[must_use]
    pub fn encode(bytes: &[u8]) -> Self {
        Self(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// The base64 payload.
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// A `data:` URI usable as an image source or download target.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{IMAGE_MIME_TYPE};base64,{}", self.0)
    }

    /// Decode the payload to raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.0)
    }
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageData, ServiceError>> + Send + 'a>>;

/// Generates an image from a text prompt via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the given prompt.
    fn generate(&self, prompt: &str) -> GenerateFuture<'_>;
}
