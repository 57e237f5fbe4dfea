//! Text helpers served by the study server: token diff and translation.

use crate::client::StudyClient;
use crate::error::Result;
use crate::request::{DiffRequest, TranslateRequest, TranslateResponse};
use crate::types::DiffResult;

/// Provides access to the text endpoints.
///
/// Obtained via [`StudyClient::text()`].
#[derive(Debug)]
pub struct TextActions<'a> {
    pub(crate) client: &'a StudyClient,
}

impl<'a> TextActions<'a> {
    /// Align the user's answer against the expected text.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use drillkit::StudyClient;
    /// # async fn example() -> drillkit::Result<()> {
    /// let client = StudyClient::builder().build()?;
    /// let diff = client.text().diff("le chat noir", "le chat").await?;
    /// assert_eq!(diff.expected.len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn diff(&self, expected: &str, actual: &str) -> Result<DiffResult> {
        self.client
            .post("/api/diff", &DiffRequest { expected, actual })
            .await
    }

    /// Translate text into the user's language.
    ///
    /// The server answers with an empty string when its translation backend
    /// fails.
    pub async fn translate(&self, text: &str) -> Result<String> {
        let response: TranslateResponse = self
            .client
            .post("/api/translate", &TranslateRequest { text })
            .await?;
        Ok(response.translation)
    }
}
