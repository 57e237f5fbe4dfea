//! Error types for drillkit-engine.
//!
//! Errors from the study session fall into three categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`drillkit::Error`] type
//! 2. **Capture errors**: The microphone, recognizer or player refused to work
//! 3. **Session errors**: An action was attempted in the wrong state
//!    (e.g., rating before the answer was revealed)
//!
//! # Example
//!
//! ```no_run
//! use drillkit_engine::{Ease, Error, StudySession};
//!
//! # async fn example(session: &mut StudySession) {
//! match session.rate(Ease::Good).await {
//!     Ok(_) => {}
//!     Err(Error::NotRevealed) => eprintln!("Reveal the answer first"),
//!     Err(Error::Client(e)) => eprintln!("Submission failed: {}", e),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

use drillkit::{CardKind, Ease};

use crate::capture::CaptureError;
use crate::session::Phase;

/// Result type for drillkit-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a study session.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying drillkit client.
    Client(drillkit::Error),

    /// A capture, recognition or playback device failed.
    Capture(CaptureError),

    /// No card is loaded.
    NoCard,

    /// The answer has not been revealed yet.
    NotRevealed,

    /// The action only applies to another card type.
    WrongCardType {
        /// The card type the action needs.
        expected: CardKind,
        /// The type of the current card.
        actual: CardKind,
    },

    /// The card does not offer this ease button.
    EaseNotOffered(Ease),

    /// The action is not allowed in the current phase.
    InvalidPhase {
        /// The attempted action.
        action: &'static str,
        /// The phase the session was in.
        phase: Phase,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            Error::Capture(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::Capture(e) => write!(f, "{}", e),
            Error::NoCard => write!(f, "no card loaded"),
            Error::NotRevealed => write!(f, "answer not revealed yet"),
            Error::WrongCardType { expected, actual } => {
                write!(f, "only available for {} cards, current card is {}", expected, actual)
            }
            Error::EaseNotOffered(ease) => write!(f, "ease {} is not offered for this card", ease),
            Error::InvalidPhase { action, phase } => {
                write!(f, "cannot {} while {}", action, phase)
            }
        }
    }
}

impl From<drillkit::Error> for Error {
    fn from(err: drillkit::Error) -> Self {
        Error::Client(err)
    }
}

impl From<CaptureError> for Error {
    fn from(err: CaptureError) -> Self {
        Error::Capture(err)
    }
}
