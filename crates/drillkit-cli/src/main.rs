//! Terminal client for the flashcard study server.
//!
//! `drillkit study` walks through due cards of one deck: dictation and
//! spelling cards take a typed answer and show a word-level diff, writing
//! cards show the correction, shadowing cards record an attempt and show
//! pronunciation feedback. `drillkit diff` and `drillkit score` run the
//! comparison engines offline.

mod audio;
mod config;
mod study;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drillkit::{DeckRoute, StudyClient};
use drillkit_engine::StudySession;
use drillkit_engine::render::TextStyle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::audio::{CommandPlayer, CommandRecorder};
use crate::config::{FileConfig, Overrides, Settings};

// ============================================================================
// CLI Arguments
// ============================================================================

/// Flashcard study client for dictation, spelling and shadowing decks.
#[derive(Parser, Debug)]
#[command(name = "drillkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Study server URL (default http://127.0.0.1:5001)
    #[arg(long, global = true)]
    url: Option<String>,

    /// User name sent to the server
    #[arg(long, global = true)]
    user: Option<String>,

    /// Deck to study: english, french or french-vocab
    #[arg(long, global = true)]
    deck: Option<DeckRoute>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mark diffs with [-missing-] and {+extra+} instead of colors
    #[arg(long, global = true, default_value_t = false)]
    plain: bool,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Study due cards interactively (default)
    Study,

    /// Compare an answer against the expected text without a server
    Diff {
        /// The correct text
        expected: String,
        /// The text to check
        actual: String,
    },

    /// Score a spoken transcript against the expected sentence
    Score {
        /// The sentence that should have been said
        expected: String,
        /// What the recognizer heard
        transcript: String,
    },
}

fn init_tracing(verbose: u8) {
    let builder = tracing_subscriber::fmt().with_writer(std::io::stderr);
    if std::env::var_os("RUST_LOG").is_some() {
        builder.with_env_filter(EnvFilter::from_default_env()).init();
        return;
    }

    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    builder.with_max_level(log_level).init();
}

fn build_session(settings: &Settings) -> Result<StudySession, Box<dyn std::error::Error>> {
    let mut builder = StudyClient::builder();
    if let Some(url) = &settings.url {
        builder = builder.url(url);
    }
    if let Some(user) = &settings.user {
        builder = builder.user(user);
    }
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;
    info!(url = client.base_url(), deck = %settings.deck, "connecting to study server");

    let mut session =
        StudySession::new(client, settings.deck).with_autoplay_delay(settings.autoplay_delay);
    if let Some(player) = &settings.player {
        session = session.with_playback(CommandPlayer::new(player));
    }
    if let Some(recorder) = &settings.recorder {
        session = session.with_capture(CommandRecorder::new(recorder));
    }
    Ok(session)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let style = if args.plain {
        TextStyle::Markers
    } else {
        TextStyle::Ansi
    };

    match args.command.unwrap_or(Command::Study) {
        Command::Diff { expected, actual } => {
            let result = drillkit_engine::diff::diff(&expected, &actual);
            println!(
                "Expected: {}",
                drillkit_engine::render::render_text(&result.expected, style)
            );
            println!(
                "Actual:   {}",
                drillkit_engine::render::render_text(&result.actual, style)
            );
            if let Some(counts) = result.counts {
                println!(
                    "{} matched, {} missing, {} extra",
                    counts.matched, counts.missing, counts.extra
                );
            }
        }
        Command::Score {
            expected,
            transcript,
        } => {
            let assessment = drillkit_engine::score::assess(&expected, &transcript);
            println!("{}", assessment);
        }
        Command::Study => {
            let file = match &args.config {
                Some(path) => FileConfig::from_file(path)?,
                None => FileConfig::default(),
            };
            let overrides = Overrides {
                url: args.url,
                user: args.user,
                deck: args.deck,
            };
            let settings = Settings::resolve(overrides, file);
            let session = build_session(&settings)?;
            study::run(session, style).await?;
        }
    }

    Ok(())
}
