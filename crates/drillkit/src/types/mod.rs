//! Domain types for the study server.
//!
//! This module contains the data structures exchanged with the server:
//! cards, ease ratings, diff tokens and recordings.

mod card;
mod deck;
mod diff;
mod media;

pub use card::{
    AnswerOutcome, Card, CardContent, CardKind, Ease, FrenchVocabCard, GenericCard, ListeningCard,
    ShadowingCard, WordCard, WritingCard,
};
pub use deck::{DeckCounts, DeckRoute};
pub use diff::{DiffCounts, DiffResult, Token, TokenStatus};
pub use media::{AnalyzeResult, AudioClip};
