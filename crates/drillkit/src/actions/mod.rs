//! Action modules for study server operations.
//!
//! Each module provides a set of related operations grouped by domain.

mod review;
mod speech;
mod text;

pub use review::ReviewActions;
pub use speech::SpeechActions;
pub use text::TextActions;
