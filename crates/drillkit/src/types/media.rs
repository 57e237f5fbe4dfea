//! Recorded audio and pronunciation analysis types.

use serde::{Deserialize, Serialize};

/// A finished recording, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Encoded audio bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `audio/webm`.
    pub mime_type: String,
    /// File name sent with the upload; the server keeps its extension.
    pub file_name: String,
}

impl AudioClip {
    /// Create a clip.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Whether the recording captured nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of server-side pronunciation analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// What the transcription service heard.
    #[serde(default)]
    pub transcript: String,
    /// Similarity to the expected text, 0.0 to 1.0.
    #[serde(default)]
    pub score: Option<f64>,
    /// Feedback text worded by the server.
    #[serde(default)]
    pub feedback: String,
}
