//! Captures port outcomes for later replay.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use super::format::{Cassette, Interaction};

/// Accumulates outcomes for one port in memory until [`finish`](Self::finish)
/// writes them out as `<dir>/<port>.cassette.yaml`.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Start recording `port` into the session directory `dir`.
    ///
    /// The cassette is named after the directory's last component, which
    /// recording mode sets to a timestamp.
    pub fn in_session(dir: &Path, port: &str, commit: impl Into<String>) -> Self {
        let session = dir.file_name().map_or_else(
            || "session".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self {
            path: dir.join(format!("{port}.cassette.yaml")),
            name: format!("{session}-{port}"),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Number of outcomes captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Capture one call and its outcome as `{"Ok": value}` or `{"Err": message}`.
    ///
    /// Returns the sequence number assigned to the interaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or the `Ok` value cannot be serialized.
    pub fn record_outcome<I, T, E>(
        &mut self,
        port: &str,
        method: &str,
        input: &I,
        outcome: &Result<T, E>,
    ) -> Result<u64, String>
    where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let input = serde_json::to_value(input)
            .map_err(|e| format!("Unserializable input for {port}::{method}: {e}"))?;
        let output = match outcome {
            Ok(value) => serde_json::to_value(value)
                .map(|v| serde_json::json!({ "Ok": v }))
                .map_err(|e| format!("Unserializable output for {port}::{method}: {e}"))?,
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };

        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
        Ok(seq)
    }

    /// Write the cassette to disk, creating the session directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be encoded or written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette)
            .map_err(|e| format!("Failed to encode cassette: {e}"))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        std::fs::write(&self.path, yaml)
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))?;
        Ok(self.path)
    }
}
