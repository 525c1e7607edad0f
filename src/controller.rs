//! Generation lifecycle for the fixed thumbnail prompt.
//!
//! The controller owns a single [`GenerationState`] and is the only writer.
//! [`GenerationController::trigger`] flips the state to `Loading` before it
//! returns and hands back a future that settles the state exactly once.
//!
//! Overlapping triggers are not cancelled: every trigger settles, and the
//! last settlement to arrive is what remains visible. That includes the
//! fallback `Failed` written when an older trigger's future is dropped, which
//! can replace a newer trigger's `Loading` and make `can_trigger` report true
//! while that request is still in flight. Front-ends are expected to consult
//! [`GenerationController::can_trigger`] before triggering.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::ports::image_generator::{ImageData, ImageGenerator};

/// Message shown when a failure carries no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Where the current generation stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request produced an image.
    Succeeded {
        /// Base64 JPEG payload.
        image_data: ImageData,
    },
    /// The last request failed.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

impl GenerationState {
    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the state is a terminal outcome of a request.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

/// Drives one prompt through an [`ImageGenerator`] and tracks the outcome.
pub struct GenerationController {
    prompt: Arc<str>,
    generator: Arc<dyn ImageGenerator>,
    state: Arc<watch::Sender<GenerationState>>,
}

impl GenerationController {
    /// Create an idle controller for `prompt`.
    pub fn new(generator: Arc<dyn ImageGenerator>, prompt: impl Into<Arc<str>>) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        Self { prompt: prompt.into(), generator, state: Arc::new(state) }
    }

    /// The prompt sent on every trigger.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    /// Read-only feed of state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// False while a request is in flight.
    #[must_use]
    pub fn can_trigger(&self) -> bool {
        !self.state.borrow().is_loading()
    }

    /// Start a generation.
    ///
    /// The state is `Loading` by the time this returns, with any previous
    /// image or error cleared. The returned future performs the remote call
    /// and settles the state to `Succeeded` or `Failed`. If the future is
    /// dropped or the generator panics before settling, the state becomes
    /// `Failed` with [`UNKNOWN_ERROR_MESSAGE`].
    pub fn trigger(&self) -> impl Future<Output = ()> + Send + 'static {
        self.state.send_replace(GenerationState::Loading);
        tracing::debug!("generation started");

        let settlement = Settlement { state: Arc::clone(&self.state), settled: false };
        let generator = Arc::clone(&self.generator);
        let prompt = Arc::clone(&self.prompt);

        async move {
            let next = match generator.generate(&prompt).await {
                Ok(image_data) => {
                    tracing::info!(
                        payload_len = image_data.as_base64().len(),
                        "image generation succeeded"
                    );
                    GenerationState::Succeeded { image_data }
                }
                Err(e) => {
                    tracing::error!(error = ?e, "image generation failed");
                    let message = e.message().unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
                    GenerationState::Failed { message }
                }
            };
            settlement.settle(next);
        }
    }
}

/// Guarantees a terminal state for one trigger.
struct Settlement {
    state: Arc<watch::Sender<GenerationState>>,
    settled: bool,
}

impl Settlement {
    fn settle(mut self, next: GenerationState) {
        self.state.send_replace(next);
        self.settled = true;
    }
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if !self.settled {
            tracing::error!("generation ended without an outcome");
            self.state.send_replace(GenerationState::Failed {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            });
        }
    }
}
