//! Service context that bundles the image generator port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiGenerator;
use crate::adapters::live::imagen::ImagenGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::AppError;
use crate::model::Provider;
use crate::ports::{ImageGenerator, ImageSettings};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator still holds the recorder or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        tracing::debug!(interactions = recorder.len(), "writing cassette");
        recorder.finish()
    }
}

impl ServiceContext {
    /// Create a live context for the given provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(
        provider: Provider,
        settings: ImageSettings,
        config: &Config,
    ) -> Result<Self, AppError> {
        let key = config.gemini_key().ok_or_else(|| AppError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })?;
        let generator: Box<dyn ImageGenerator> = match provider {
            Provider::Imagen => Box::new(ImagenGenerator::new(key, settings)),
            Provider::Gemini => Box::new(GeminiGenerator::new(key, settings)),
        };
        Ok(Self { generator })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live adapter cannot be created.
    pub fn recording(
        provider: Provider,
        settings: ImageSettings,
        config: &Config,
    ) -> Result<(Self, RecordingSession), AppError> {
        let live_ctx = Self::live(provider, settings, config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = std::path::PathBuf::from(".thumbgen/cassettes").join(&timestamp);

        let recorder = Arc::new(Mutex::new(CassetteRecorder::in_session(
            &output_dir,
            "image_generator",
            get_commit_hash(),
        )));

        let recording_gen = RecordingImageGenerator::new(live_ctx.generator, Arc::clone(&recorder));

        let ctx = Self { generator: Box::new(recording_gen) };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, AppError> {
        let replayer = load_cassette(path)
            .map_err(|e| AppError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let generator = Box::new(ReplayingImageGenerator::new(replayer));
        Ok(Self { generator })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
