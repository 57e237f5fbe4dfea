//! Review actions: fetch the next card, reveal it, and rate it.
//!
//! Each deck has its own set of review endpoints under its
//! [`DeckRoute::prefix`].
//!
//! # Example
//!
//! ```no_run
//! use drillkit::{DeckRoute, Ease, StudyClient};
//!
//! # async fn example() -> drillkit::Result<()> {
//! let client = StudyClient::builder().build()?;
//! let review = client.review(DeckRoute::FrenchVocab);
//!
//! if let Some(card) = review.next().await? {
//!     review.reveal().await?;
//!     review.answer(card.card_id, Ease::Good).await?;
//! }
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::client::StudyClient;
use crate::error::Result;
use crate::request::AnswerRequest;
use crate::types::{AnswerOutcome, Card, DeckRoute, Ease};

/// Provides access to the review endpoints of one deck.
///
/// Obtained via [`StudyClient::review()`].
#[derive(Debug)]
pub struct ReviewActions<'a> {
    pub(crate) client: &'a StudyClient,
    pub(crate) route: DeckRoute,
}

impl<'a> ReviewActions<'a> {
    /// The deck these actions operate on.
    pub fn route(&self) -> DeckRoute {
        self.route
    }

    /// Fetch the next due card.
    ///
    /// Returns `None` when the server reports no card due (HTTP 404).
    pub async fn next(&self) -> Result<Option<Card>> {
        let path = format!("{}/next", self.route.prefix());
        let card: Option<Card> = self.client.get_optional(&path).await?;
        debug!(
            route = %self.route,
            card_id = card.as_ref().map(|c| c.card_id),
            "fetched next card"
        );
        Ok(card)
    }

    /// Tell the server the answer side is now shown.
    pub async fn reveal(&self) -> Result<()> {
        let path = format!("{}/reveal", self.route.prefix());
        self.client.post_empty(&path).await
    }

    /// Submit an ease rating for a card.
    ///
    /// The server rejects ratings for cards other than its current one with
    /// a "card mismatch" error.
    pub async fn answer(&self, card_id: i64, ease: Ease) -> Result<AnswerOutcome> {
        let path = format!("{}/answer", self.route.prefix());
        let body = AnswerRequest {
            card_id,
            ease: ease.into(),
        };
        self.client.post(&path, &body).await
    }
}
