//! Configuration file for the `drillkit` binary.
//!
//! # Example TOML
//!
//! ```toml
//! [server]
//! url = "http://192.168.1.20:5001"
//! user = "feng"
//! timeout_secs = 60
//!
//! [audio]
//! autoplay_delay_ms = 500
//! # `{file}` is replaced by the path to play or record to; without it the
//! # path is appended.
//! player = "mpv --really-quiet {file}"
//! recorder = "arecord -q -f cd -t wav {file}"
//! ```
//!
//! Command-line flags override file values, which override the defaults.

use std::path::Path;
use std::time::Duration;

use drillkit::DeckRoute;
use serde::Deserialize;
use thiserror::Error;

/// Delay before card audio starts, unless configured.
pub const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 300;

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has unexpected fields.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root structure of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Study server connection.
    pub server: ServerConfig,
    /// Audio devices.
    pub audio: AudioConfig,
}

/// `[server]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the study server.
    pub url: Option<String>,
    /// User name sent in the `anki_user` cookie.
    pub user: Option<String>,
    /// Whole-request timeout.
    pub timeout_secs: Option<u64>,
}

/// `[audio]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Delay between showing a card and playing its audio.
    pub autoplay_delay_ms: Option<u64>,
    /// Command that plays an audio file.
    pub player: Option<String>,
    /// Command that records from the microphone into a file until killed.
    pub recorder: Option<String>,
}

impl FileConfig {
    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub user: Option<String>,
    pub deck: Option<DeckRoute>,
}

/// Effective settings after merging flags, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` keeps the client's default URL.
    pub url: Option<String>,
    pub user: Option<String>,
    /// `None` keeps the client's default timeout.
    pub timeout: Option<Duration>,
    pub deck: DeckRoute,
    pub autoplay_delay: Duration,
    pub player: Option<String>,
    pub recorder: Option<String>,
}

impl Settings {
    /// Merge command-line values over file values.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        let user = overrides
            .user
            .or(file.server.user)
            .filter(|u| !u.trim().is_empty());

        Self {
            url: overrides.url.or(file.server.url),
            user,
            timeout: file.server.timeout_secs.map(Duration::from_secs),
            deck: overrides.deck.unwrap_or_default(),
            autoplay_delay: Duration::from_millis(
                file.audio
                    .autoplay_delay_ms
                    .unwrap_or(DEFAULT_AUTOPLAY_DELAY_MS),
            ),
            player: file.audio.player,
            recorder: file.audio.recorder,
        }
    }
}
