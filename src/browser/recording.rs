//! Click recording file written by the in-page click recorder.
//!
//! The recorder itself runs inside the browser; this module reads, imports
//! and clears its output. The file is a JSON array of [`ClickEvent`]s.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Longest element text shown when listing events.
const TEXT_PREVIEW_CHARS: usize = 40;

/// One recorded click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub xpath: String,
    pub tag: String,
    #[serde(default)]
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ClickEvent {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl fmt::Display for ClickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recorded_at() {
            Some(at) => write!(f, "[{}]", at.format("%H:%M:%S%.3f"))?,
            None => write!(f, "[{}]", self.timestamp)?,
        }
        write!(f, " {} <{}> {}", self.kind, self.tag.to_lowercase(), self.xpath)?;
        let text = self.text.trim();
        if !text.is_empty() {
            if text.chars().count() > TEXT_PREVIEW_CHARS {
                let truncated: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
                write!(f, " \"{}...\"", truncated)?;
            } else {
                write!(f, " \"{}\"", text)?;
            }
        }
        Ok(())
    }
}

/// A recorded click session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickRecording {
    pub events: Vec<ClickEvent>,
}

impl ClickRecording {
    /// Loads a recording, returning `None` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording {:?}", path))?;
        let recording: ClickRecording = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recording {:?}", path))?;
        Ok(Some(recording))
    }

    /// Writes the recording as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write recording {:?}", path))?;
        Ok(())
    }

    /// Deletes the recording file. Returns whether there was one.
    pub fn clear(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("Failed to delete recording {:?}", path))?;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
