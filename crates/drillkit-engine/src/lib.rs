//! Study logic for drillkit: token diffs, pronunciation scoring and the
//! card review session.
//!
//! The [`drillkit`] client maps the study server's endpoints one to one.
//! This crate adds what sits between those endpoints and a user:
//!
//! - [`diff`] - Word-level alignment of an expected text and an answer
//! - [`render`] - Diff tokens as HTML spans or terminal text
//! - [`score`] - Accent-insensitive similarity for spoken attempts
//! - [`capture`] - Microphone, recognizer and player capabilities
//! - [`view`] - What the answer side shows after reveal
//! - [`session`] - The per-card state machine driving all of the above
//!
//! # Quick Start
//!
//! ```no_run
//! use drillkit_engine::{DeckRoute, Ease, LoadOutcome, StudyClient, StudySession};
//!
//! # async fn example() -> drillkit_engine::Result<()> {
//! let client = StudyClient::builder().user("feng").build()?;
//! let mut session = StudySession::new(client, DeckRoute::French);
//!
//! if session.load_next().await? == LoadOutcome::Loaded {
//!     session.reveal("le train part à midi").await?;
//!     session.rate(Ease::Good).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The diff and scoring functions work offline:
//!
//! ```
//! use drillkit_engine::diff::diff;
//!
//! let result = diff("the cat sat", "the dog sat");
//! let counts = result.counts.unwrap();
//! assert_eq!((counts.matched, counts.missing, counts.extra), (2, 1, 1));
//! ```

mod error;

pub mod capture;
pub mod diff;
pub mod render;
pub mod score;
pub mod session;
pub mod view;

pub use error::{Error, Result};

pub use capture::{
    AudioCapture, AudioPlayback, CaptureError, RecognizerEvent, RecordingSession,
    SpeechRecognizer,
};
pub use score::{Assessment, Feedback};
pub use session::{Controls, LoadOutcome, Phase, StatusMessage, StudySession};
pub use view::{
    DictationOutcome, DictationView, InputPanel, PronunciationFeedback, PronunciationView,
    RevealView,
};

// Re-export drillkit types for convenience
pub use drillkit::{
    AnalyzeResult, AnswerOutcome, AudioClip, Card, CardContent, CardKind, ClientBuilder,
    DeckCounts, DeckRoute, DiffCounts, DiffResult, Ease, StudyClient, Token, TokenStatus,
};
