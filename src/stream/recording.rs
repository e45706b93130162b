//! Sensor Recordings
//!
//! JSON file format for captured sensor frames, replayed by the `classify`
//! command.

use crate::gesture::SensorFrame;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current recording format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Recording metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMetadata {
    /// Unique recording ID
    pub id: Uuid,
    /// Recording name
    pub name: String,
    /// Recording start time
    pub started_at: DateTime<Utc>,
    /// Recording end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total frame count
    pub frame_count: usize,
    /// Sensor tick rate the frames were captured at
    pub tick_hz: u32,
    /// Version of the recording format
    pub format_version: String,
}

impl RecordingMetadata {
    pub fn new(name: impl Into<String>, tick_hz: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            started_at: Utc::now(),
            ended_at: None,
            frame_count: 0,
            tick_hz,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Stamp the end time and frame count
    pub fn finalize(&mut self, frame_count: usize) {
        self.ended_at = Some(Utc::now());
        self.frame_count = frame_count;
    }

    /// Capture duration implied by the frame count and tick rate
    pub fn duration_ms(&self) -> u64 {
        if self.tick_hz == 0 {
            return 0;
        }
        (self.frame_count as u64).saturating_mul(1000) / self.tick_hz as u64
    }
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        Self::new(String::new(), 50)
    }
}

/// A sequence of sensor frames captured at a fixed tick rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub metadata: RecordingMetadata,
    pub frames: Vec<SensorFrame>,
}

impl Recording {
    pub fn new(name: impl Into<String>, tick_hz: u32) -> Self {
        Self {
            metadata: RecordingMetadata::new(name, tick_hz),
            frames: Vec::new(),
        }
    }

    pub fn add_frame(&mut self, frame: SensorFrame) {
        self.frames.push(frame);
    }

    pub fn finalize(&mut self) {
        self.metadata.finalize(self.frames.len());
    }

    /// Save recording to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// A different format version is logged but still loaded; missing
    /// metadata fields fall back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let recording: Recording = serde_json::from_str(&content)?;
        if recording.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %recording.metadata.name,
                found = %recording.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Recording has different format version; some fields may use default values"
            );
        }
        if recording.metadata.frame_count != recording.frames.len() {
            tracing::warn!(
                name = %recording.metadata.name,
                declared = recording.metadata.frame_count,
                actual = recording.frames.len(),
                "Recording frame count does not match metadata"
            );
        }
        Ok(recording)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new("untitled", 50)
    }
}
