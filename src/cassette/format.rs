//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position within the cassette.
    pub seq: u64,
    /// Port name, e.g. `image_generator`.
    pub port: String,
    /// Method name, e.g. `generate`.
    pub method: String,
    /// Serialized call arguments.
    pub input: serde_json::Value,
    /// Serialized `{"Ok": ...}` or `{"Err": ...}` outcome.
    pub output: serde_json::Value,
}
