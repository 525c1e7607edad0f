//! Recording adapters that capture interactions to cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction.
///
/// Recording is best effort: failures are logged and the interaction is skipped.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let recorded = recorder
        .lock()
        .map_err(|e| format!("Recorder lock poisoned: {e}"))
        .and_then(|mut guard| guard.record_outcome(port, method, input, result));
    match recorded {
        Ok(seq) => tracing::debug!(port, method, seq, "recorded interaction"),
        Err(e) => tracing::warn!(port, method, error = %e, "skipping interaction"),
    }
}
