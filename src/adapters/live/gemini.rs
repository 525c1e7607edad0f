//! Live adapter for Gemini image models (`:generateContent`).

use reqwest::Client;
use serde::Deserialize;

use super::{api_error, excerpt, DEFAULT_BASE_URL};
use crate::error::ServiceError;
use crate::output::normalize_to_jpeg;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageSettings};

/// Live Gemini image generator that calls the Google AI API.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    settings: ImageSettings,
    base_url: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key and model selection.
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

impl ImageGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
        let prompt = prompt.to_string();
        Box::pin(async move {
            let url = format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.settings.model
            );

            let body = serde_json::json!({
                "contents": [{
                    "parts": [{"text": prompt}]
                }],
                "generationConfig": {
                    "responseModalities": ["IMAGE"],
                    "imageConfig": {
                        "aspectRatio": self.settings.aspect_ratio,
                    }
                }
            });

            tracing::debug!(model = %self.settings.model, "requesting Gemini image content");
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

            let parsed: GeminiResponse = serde_json::from_str(&response_text)
                .map_err(|e| ServiceError::MalformedResponse(format!("{e}")))?;

            let inline = parsed
                .candidates
                .into_iter()
                .flat_map(|c| c.content.parts)
                .find_map(|part| part.inline_data.filter(|d| !d.data.is_empty()))
                .ok_or_else(|| ServiceError::NoImage(excerpt(&response_text)))?;

            normalize_to_jpeg(inline.data, &inline.mime_type)
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    // Absent when the candidate was blocked, e.g. `finishReason: IMAGE_SAFETY`.
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CONTENT_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

    fn make_generator(server: &MockServer) -> GeminiGenerator {
        let settings =
            ImageSettings { model: "gemini-2.5-flash-image".into(), aspect_ratio: "16:9".into() };
        GeminiGenerator::new("key".into(), settings).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn skips_text_parts_and_returns_inline_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTENT_PATH))
            .and(body_string_contains("\"aspectRatio\":\"16:9\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "Here is your thumbnail" },
                            { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } }
                        ]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = make_generator(&server).generate("a hero").await.unwrap();
        assert_eq!(image.as_base64(), "QUJD");
    }

    #[tokio::test]
    async fn text_only_response_is_no_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "I can't draw that" }] } }]
            })))
            .mount(&server)
            .await;

        let err = make_generator(&server).generate("a hero").await.unwrap_err();
        assert!(matches!(err, ServiceError::NoImage(ref body) if body.contains("can't draw")));
    }

    #[tokio::test]
    async fn empty_inline_data_is_no_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/jpeg", "data": "" } }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let err = make_generator(&server).generate("a hero").await.unwrap_err();
        assert!(matches!(err, ServiceError::NoImage(_)));
    }

    #[tokio::test]
    async fn blocked_candidate_without_content_is_no_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "finishReason": "IMAGE_SAFETY" }]
            })))
            .mount(&server)
            .await;

        let err = make_generator(&server).generate("a hero").await.unwrap_err();
        assert!(matches!(err, ServiceError::NoImage(ref body) if body.contains("IMAGE_SAFETY")));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTENT_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = make_generator(&server).generate("a hero").await.unwrap_err();
        assert!(matches!(err, ServiceError::Api { status: 500, .. }));
    }
}
