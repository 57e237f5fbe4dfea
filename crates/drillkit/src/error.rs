//! Error types for the drillkit crate.
//!
//! This module provides error handling for study server operations.
//!
//! # Error Handling
//!
//! The most common errors you'll encounter are:
//!
//! - [`Error::ConnectionRefused`]: the study server is not running
//! - [`Error::Server`]: the server rejected the request (e.g., a stale card)
//! - [`Error::Forbidden`]: the configured user may not access the deck
//!
//! "No card due" is not an error: [`ReviewActions::next`](crate::actions::ReviewActions::next)
//! returns `Ok(None)` for it.
//!
//! # Example
//!
//! ```no_run
//! use drillkit::{DeckRoute, Error, StudyClient};
//!
//! # async fn example() -> drillkit::Result<()> {
//! let client = StudyClient::builder().user("feng").build()?;
//!
//! match client.review(DeckRoute::English).next().await {
//!     Ok(Some(card)) => println!("Card {}", card.card_id),
//!     Ok(None) => println!("Nothing due"),
//!     Err(Error::ConnectionRefused) => eprintln!("Is the study server running?"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// The error type for study server operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` is the server's `{"error": ...}` text when the body carries
    /// one, otherwise the status reason.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the server.
        message: String,
    },

    /// The user is not allowed to study the requested deck (HTTP 403).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection refused - the study server is likely not running.
    #[error("Could not connect to the study server. Is it running?")]
    ConnectionRefused,

    /// The card payload could not be mapped onto a known card type.
    #[error("Invalid card payload: {0}")]
    InvalidCard(String),

    /// An ease rating outside 1..=4.
    #[error("Invalid ease rating: {0} (expected 1-4)")]
    InvalidEase(u8),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the server could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::ConnectionRefused | Error::Http(_))
    }
}

/// A specialized Result type for study server operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = Error::Server {
            status: 409,
            message: "stale card".to_string(),
        };
        assert_eq!(err.to_string(), "stale card");
        assert!(!err.is_network());
    }

    #[test]
    fn test_connection_refused_is_network() {
        assert!(Error::ConnectionRefused.is_network());
    }
}
