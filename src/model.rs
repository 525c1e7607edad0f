//! Model name resolution and provider detection.

/// Endpoints of the Generative Language API that can produce images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Imagen models served through `:predict`.
    Imagen,
    /// Gemini image models served through `:generateContent`.
    Gemini,
}

/// Default model when neither the command line nor the config names one.
pub const DEFAULT_MODEL: &str = "imagen-4";

/// Short name aliases for the supported models.
const ALIASES: &[(&str, &str)] = &[
    ("imagen-4", "imagen-4.0-generate-001"),
    ("imagen-4-ultra", "imagen-4.0-ultra-generate-001"),
    ("imagen-3", "imagen-3.0-generate-002"),
    ("nano-banana", "gemini-2.5-flash-image"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or_else(|| name.to_string(), |&(_, full)| full.to_string())
}

/// Detect the provider from a resolved model name.
///
/// # Errors
///
/// Returns an error if the model name doesn't match a known provider prefix.
pub fn detect_provider(model: &str) -> Result<Provider, String> {
    if model.starts_with("imagen") {
        Ok(Provider::Imagen)
    } else if model.starts_with("gemini") {
        Ok(Provider::Gemini)
    } else {
        Err(format!("Unknown provider for model '{model}'. Expected 'imagen-*' or 'gemini-*'."))
    }
}
