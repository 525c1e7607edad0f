//! Live adapter for Imagen models (`:predict`).

use reqwest::Client;
use serde::Deserialize;

use super::{api_error, excerpt, DEFAULT_BASE_URL};
use crate::error::ServiceError;
use crate::output::normalize_to_jpeg;
use crate::ports::image_generator::{
    GenerateFuture, ImageGenerator, ImageSettings, IMAGE_MIME_TYPE,
};

/// Live Imagen generator that calls the Google AI API.
pub struct ImagenGenerator {
    client: Client,
    api_key: String,
    settings: ImageSettings,
    base_url: String,
}

impl ImagenGenerator {
    /// Create a new Imagen generator with the given API key and model selection.
    #[must_use]
    pub fn new(api_key: String, settings: ImageSettings) -> Self {
        Self { client: Client::new(), api_key, settings, base_url: DEFAULT_BASE_URL.to_string() }
    }

    /// Point the generator at a different API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ImageGenerator for ImagenGenerator {
    fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
        let prompt = prompt.to_string();
        Box::pin(async move {
            let url = format!("{}/v1beta/models/{}:predict", self.base_url, self.settings.model);

            let body = serde_json::json!({
                "instances": [{ "prompt": prompt }],
                "parameters": {
                    "sampleCount": 1,
                    "aspectRatio": self.settings.aspect_ratio,
                    "outputMimeType": IMAGE_MIME_TYPE,
                }
            });

            tracing::debug!(model = %self.settings.model, "requesting Imagen prediction");
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(api_error(status.as_u16(), &response_text));
            }

            let parsed: PredictResponse = serde_json::from_str(&response_text)
                .map_err(|e| ServiceError::MalformedResponse(format!("{e}")))?;

            let prediction = parsed
                .predictions
                .into_iter()
                .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
                .ok_or_else(|| ServiceError::NoImage(excerpt(&response_text)))?;

            let mime_type = prediction.mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string());
            let payload = prediction.bytes_base64_encoded.unwrap_or_default();
            normalize_to_jpeg(payload, &mime_type)
        })
    }
}

// --- Imagen API response types ---

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}
