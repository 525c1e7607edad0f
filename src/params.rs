//! Parameter validation for provider-specific options.

use crate::model::Provider;

/// Aspect ratio used when none is configured; video thumbnails are 16:9.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

const IMAGEN_RATIOS: &[&str] = &["1:1", "3:4", "4:3", "9:16", "16:9"];
const GEMINI_RATIOS: &[&str] =
    &["1:1", "2:3", "3:2", "3:4", "4:3", "4:5", "5:4", "9:16", "16:9", "21:9"];

/// Validate that an aspect ratio is supported by the given provider.
///
/// # Errors
///
/// Returns an error if the ratio is not recognized.
pub fn validate_aspect_ratio(ratio: &str, provider: Provider) -> Result<(), String> {
    let valid = match provider {
        Provider::Imagen => IMAGEN_RATIOS,
        Provider::Gemini => GEMINI_RATIOS,
    };

    if valid.contains(&ratio) {
        Ok(())
    } else {
        Err(format!("Unsupported aspect ratio '{ratio}' for {provider:?}. Valid: {valid:?}"))
    }
}
