//! Pronunciation analysis for shadowing cards.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::StudyClient;
use crate::error::Result;
use crate::types::{AnalyzeResult, AudioClip};

/// Provides access to the pronunciation analysis endpoint.
///
/// Obtained via [`StudyClient::speech()`].
#[derive(Debug)]
pub struct SpeechActions<'a> {
    pub(crate) client: &'a StudyClient,
}

impl<'a> SpeechActions<'a> {
    /// Upload a recording of the current shadowing card for transcription
    /// and scoring.
    ///
    /// The card must be the server's current French card, otherwise the
    /// server answers with a "card mismatch" error.
    pub async fn analyze(&self, card_id: i64, clip: &AudioClip) -> Result<AnalyzeResult> {
        debug!(card_id, bytes = clip.bytes.len(), mime = %clip.mime_type, "uploading recording");
        let audio = Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name.clone())
            .mime_str(&clip.mime_type)?;
        let form = Form::new()
            .text("cardId", card_id.to_string())
            .part("audio", audio);

        self.client.post_multipart("/api/fr/analyze", form).await
    }
}
