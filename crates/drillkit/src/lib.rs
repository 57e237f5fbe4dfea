//! An async Rust client for a flashcard study server.
//!
//! The server schedules cards from language-learning decks (listening
//! dictation, spelling, writing correction, French shadowing) and exposes a
//! small JSON API. This crate provides typed access to it.
//!
//! # Quick Start
//!
//! ```no_run
//! use drillkit::{DeckRoute, Ease, StudyClient};
//!
//! # async fn example() -> drillkit::Result<()> {
//! let client = StudyClient::builder()
//!     .url("http://127.0.0.1:5001")
//!     .user("feng")
//!     .build()?;
//!
//! let review = client.review(DeckRoute::English);
//! while let Some(card) = review.next().await? {
//!     review.reveal().await?;
//!     review.answer(card.card_id, Ease::Good).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Action Groups
//!
//! - [`StudyClient::review()`] - Next card, reveal and answer for one deck
//! - [`StudyClient::text()`] - Token diff and translation
//! - [`StudyClient::speech()`] - Pronunciation analysis of recordings

pub mod actions;
pub mod client;
pub mod error;
mod request;
pub mod types;

pub use client::{ClientBuilder, StudyClient};
pub use error::{Error, Result};
pub use types::{
    AnalyzeResult, AnswerOutcome, AudioClip, Card, CardContent, CardKind, DeckCounts, DeckRoute,
    DiffCounts, DiffResult, Ease, FrenchVocabCard, GenericCard, ListeningCard, ShadowingCard,
    Token, TokenStatus, WordCard, WritingCard,
};
