//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator};

/// Records image generation interactions while delegating to an inner implementation.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
        let prompt = prompt.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&prompt).await;
            let input = json!({ "prompt": prompt });
            record_result(&recorder, "image_generator", "generate", &input, &result);
            result
        })
    }
}
