//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ServiceError;

/// Retrieve the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|e| format!("Replayer lock poisoned: {e}"))?;
    guard.next_interaction(port, method).map(|i| i.output.clone())
}

/// Deserialize a replayed output recorded with the Ok/Err convention.
///
/// A string `Err` replays as [`ServiceError::Rejected`]; an empty or
/// non-string `Err` replays as [`ServiceError::Unknown`].
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ServiceError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        return Err(match err_val.as_str() {
            Some(msg) if !msg.is_empty() => ServiceError::Rejected(msg.to_string()),
            _ => ServiceError::Unknown,
        });
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok_val)
        .map_err(|e| ServiceError::MalformedResponse(format!("Replayed output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_value_deserializes() {
        let value: String = replay_result(json!({"Ok": "QUJD"})).unwrap();
        assert_eq!(value, "QUJD");
    }

    #[test]
    fn bare_value_deserializes() {
        let value: String = replay_result(json!("QUJD")).unwrap();
        assert_eq!(value, "QUJD");
    }

    #[test]
    fn empty_or_null_err_is_unknown() {
        assert!(matches!(replay_result::<String>(json!({"Err": ""})), Err(ServiceError::Unknown)));
        assert!(matches!(replay_result::<String>(json!({"Err": null})), Err(ServiceError::Unknown)));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let result = replay_result::<String>(json!({"Ok": 42}));
        assert!(matches!(result, Err(ServiceError::MalformedResponse(_))));
    }
}
