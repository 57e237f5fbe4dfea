//! The study session: one controller owning the current card.
//!
//! A card moves through these phases:
//!
//! ```text
//! Idle -> Loaded -> [Recording -> Stopped] -> Revealed -> Rated -> Idle (next card)
//! ```
//!
//! Every user action is one `async` method taking `&mut self`, so actions
//! never overlap and each awaits its requests in order. Failures the user
//! must see are written to [`StudySession::status`]; best-effort calls
//! (reveal notification, translation, playback) only log.
//!
//! # Example
//!
//! ```no_run
//! use drillkit_engine::{DeckRoute, Ease, LoadOutcome, StudyClient, StudySession};
//!
//! # async fn example() -> drillkit_engine::Result<()> {
//! let client = StudyClient::builder().user("feng").build()?;
//! let mut session = StudySession::new(client, DeckRoute::English);
//!
//! let mut outcome = session.load_next().await?;
//! while outcome == LoadOutcome::Loaded {
//!     let view = session.reveal("the train leaves at noon").await?;
//!     println!("{:?}", view);
//!     outcome = session.rate(Ease::Good).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use drillkit::{
    Card, CardContent, CardKind, DeckRoute, Ease, ShadowingCard, StudyClient,
};
use tracing::{debug, info, warn};

use crate::capture::{
    AudioCapture, AudioPlayback, NoCapture, NoPlayback, RECOGNIZER_LOCALE, RecognizerEvent,
    RecordingSession, SpeechRecognizer,
};
use crate::error::{Error, Result};
use crate::score::assess;
use crate::view::{
    DictationOutcome, DictationView, InputPanel, PronunciationFeedback, PronunciationView,
    RevealView,
};

/// Delay between loading a card and starting its audio.
pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(300);

/// Where the current card is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No card loaded.
    Idle,
    /// A card is shown and awaiting input.
    Loaded,
    /// Audio is being captured.
    Recording,
    /// A recording has finished.
    Stopped,
    /// The answer is shown; ease buttons are available.
    Revealed,
    /// A rating was accepted.
    Rated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loaded => "loaded",
            Phase::Recording => "recording",
            Phase::Stopped => "stopped",
            Phase::Revealed => "revealed",
            Phase::Rated => "rated",
        };
        f.write_str(name)
    }
}

/// Which controls the user may press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    /// The reveal button.
    pub reveal: bool,
    /// Record / stop buttons.
    pub recorder: bool,
    /// Enabled ease buttons; empty when hidden.
    pub ease: Vec<Ease>,
}

/// Status line text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// The deck has nothing due.
    NoDueCards,
    /// Fetching the next card failed.
    LoadFailed(String),
    /// The microphone could not be used.
    MicrophoneUnavailable(String),
    /// The diff service failed; raw text is shown.
    DiffFailed(String),
    /// Server pronunciation analysis failed.
    AnalyzeFailed(String),
    /// Shadowing reveal without a recording.
    NothingRecorded,
    /// A rating is being submitted.
    Submitting,
    /// Rating submission failed.
    SubmitFailed(String),
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::NoDueCards => write!(f, "No due cards. Well done!"),
            StatusMessage::LoadFailed(e) => write!(f, "Could not load a card: {}", e),
            StatusMessage::MicrophoneUnavailable(e) => write!(f, "Cannot record: {}", e),
            StatusMessage::DiffFailed(e) => write!(f, "Comparison unavailable: {}", e),
            StatusMessage::AnalyzeFailed(e) => write!(f, "Pronunciation analysis failed: {}", e),
            StatusMessage::NothingRecorded => write!(f, "Nothing was recorded for this card."),
            StatusMessage::Submitting => write!(f, "Submitting..."),
            StatusMessage::SubmitFailed(e) => write!(f, "{}", e),
        }
    }
}

/// Result of asking for the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A card is now current.
    Loaded,
    /// The deck has nothing due.
    NoDueCards,
}

/// Controller for studying one deck.
pub struct StudySession {
    client: StudyClient,
    route: DeckRoute,
    capture: Box<dyn AudioCapture>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    playback: Box<dyn AudioPlayback>,
    autoplay_delay: Duration,

    card: Option<Card>,
    phase: Phase,
    answer_shown: bool,
    recording: Option<RecordingSession>,
    revealed: Option<RevealView>,
    controls: Controls,
    status: Option<StatusMessage>,
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("route", &self.route)
            .field("card_id", &self.card.as_ref().map(|c| c.card_id))
            .field("phase", &self.phase)
            .field("answer_shown", &self.answer_shown)
            .field("has_recognizer", &self.recognizer.is_some())
            .finish()
    }
}

impl StudySession {
    /// Create a session without capture, recognition or playback.
    pub fn new(client: StudyClient, route: DeckRoute) -> Self {
        Self {
            client,
            route,
            capture: Box::new(NoCapture),
            recognizer: None,
            playback: Box::new(NoPlayback),
            autoplay_delay: DEFAULT_AUTOPLAY_DELAY,
            card: None,
            phase: Phase::Idle,
            answer_shown: false,
            recording: None,
            revealed: None,
            controls: Controls::default(),
            status: None,
        }
    }

    /// Use a microphone.
    pub fn with_capture(mut self, capture: impl AudioCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    /// Use on-device speech recognition. Shadowing cards are then scored
    /// locally instead of uploading the recording.
    pub fn with_recognizer(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    /// Use an audio player for card audio.
    pub fn with_playback(mut self, playback: impl AudioPlayback + 'static) -> Self {
        self.playback = Box::new(playback);
        self
    }

    /// Change the delay before card audio starts.
    pub fn with_autoplay_delay(mut self, delay: Duration) -> Self {
        self.autoplay_delay = delay;
        self
    }

    /// The deck being studied.
    pub fn route(&self) -> DeckRoute {
        self.route
    }

    /// The underlying client.
    pub fn client(&self) -> &StudyClient {
        &self.client
    }

    /// The current card.
    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the answer of the current card is shown.
    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    /// Enabled controls.
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Status line text, if any.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Capture state of the current card.
    pub fn recording(&self) -> Option<&RecordingSession> {
        self.recording.as_ref()
    }

    /// The reveal result of the current card.
    pub fn revealed(&self) -> Option<&RevealView> {
        self.revealed.as_ref()
    }

    /// Input widget for the current card.
    pub fn input_panel(&self) -> Option<InputPanel> {
        self.card
            .as_ref()
            .map(|card| InputPanel::for_kind(card.content.kind()))
    }

    /// Whether shadowing feedback is computed on-device.
    pub fn scores_locally(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Drop the current card and all state tied to it.
    fn reset(&mut self) {
        self.release_devices();
        self.card = None;
        self.phase = Phase::Idle;
        self.answer_shown = false;
        self.recording = None;
        self.revealed = None;
        self.controls = Controls::default();
        self.status = None;
    }

    /// Stop capture and recognition without keeping a recording.
    fn release_devices(&mut self) {
        let Some(recording) = self.recording.as_mut() else {
            return;
        };
        if recording.is_capturing() {
            recording.set_capturing(false);
            self.capture.release();
        }
        if recording.is_recognizing() {
            recording.set_recognizing(false);
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
    }

    /// Fetch the next due card and make it current.
    ///
    /// Any previous card state, recording included, is discarded first. If
    /// the card has audio, it starts playing after the autoplay delay.
    pub async fn load_next(&mut self) -> Result<LoadOutcome> {
        self.reset();

        let card = match self.client.review(self.route).next().await {
            Ok(Some(card)) => card,
            Ok(None) => {
                info!(route = %self.route, "no due cards");
                self.status = Some(StatusMessage::NoDueCards);
                return Ok(LoadOutcome::NoDueCards);
            }
            Err(e) => {
                warn!(route = %self.route, error = %e, "failed to load next card");
                self.status = Some(StatusMessage::LoadFailed(e.to_string()));
                return Err(e.into());
            }
        };

        let kind = card.content.kind();
        info!(card_id = card.card_id, %kind, "card loaded");
        let audio = card.content.audio_url().map(str::to_string);
        self.card = Some(card);
        self.phase = Phase::Loaded;
        self.controls.reveal = true;
        self.controls.recorder = kind == CardKind::Shadowing;

        if let Some(url) = audio {
            tokio::time::sleep(self.autoplay_delay).await;
            if let Err(e) = self.playback.play(&url) {
                warn!(error = %e, "autoplay failed");
            }
        }

        Ok(LoadOutcome::Loaded)
    }

    /// Play the current card's audio again.
    pub fn replay_audio(&mut self) -> Result<()> {
        let card = self.card.as_ref().ok_or(Error::NoCard)?;
        match card.content.audio_url() {
            Some(url) => self.playback.play(url).map_err(Error::from),
            None => Ok(()),
        }
    }

    fn shadowing_card(&self) -> Result<&ShadowingCard> {
        let card = self.card.as_ref().ok_or(Error::NoCard)?;
        match &card.content {
            CardContent::Shadowing(shadowing) => Ok(shadowing),
            other => Err(Error::WrongCardType {
                expected: CardKind::Shadowing,
                actual: other.kind(),
            }),
        }
    }

    /// Start recording an attempt at the current shadowing card.
    ///
    /// Recording again after a stop replaces the previous attempt.
    pub async fn start_recording(&mut self) -> Result<()> {
        self.shadowing_card()?;
        if !matches!(self.phase, Phase::Loaded | Phase::Stopped) {
            return Err(Error::InvalidPhase {
                action: "start recording",
                phase: self.phase,
            });
        }

        if let Err(e) = self.capture.start() {
            warn!(error = %e, "could not start capture");
            self.status = Some(StatusMessage::MicrophoneUnavailable(e.to_string()));
            return Err(e.into());
        }

        let recognizing = match self.recognizer.as_mut() {
            Some(recognizer) => match recognizer.start(RECOGNIZER_LOCALE) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "speech recognizer failed to start");
                    false
                }
            },
            None => false,
        };

        self.recording = Some(RecordingSession::started(recognizing));
        self.phase = Phase::Recording;
        self.status = None;
        debug!(recognizing, "recording started");
        Ok(())
    }

    /// Feed a recognizer event into the session.
    ///
    /// Final segments are appended to the transcript. An `Ended` event while
    /// still capturing is an unsolicited stop: the recognizer is restarted
    /// once, and left stopped if that restart fails.
    pub fn handle_recognizer_event(&mut self, event: RecognizerEvent) {
        if self.answer_shown {
            return;
        }
        let Some(recording) = self.recording.as_mut() else {
            debug!("recognizer event without a recording");
            return;
        };

        match event {
            RecognizerEvent::Segment { text, is_final } => {
                if is_final {
                    recording.push_segment(&text);
                }
            }
            RecognizerEvent::Ended => {
                if !(recording.is_capturing() && recording.is_recognizing()) {
                    recording.set_recognizing(false);
                    return;
                }
                let Some(recognizer) = self.recognizer.as_mut() else {
                    recording.set_recognizing(false);
                    return;
                };
                match recognizer.start(RECOGNIZER_LOCALE) {
                    Ok(()) => debug!("recognizer restarted after unsolicited stop"),
                    Err(e) => {
                        warn!(error = %e, "recognizer restart failed");
                        recording.set_recognizing(false);
                    }
                }
            }
        }
    }

    /// Stop the current recording and keep the clip.
    pub async fn stop_recording(&mut self) -> Result<()> {
        if self.phase != Phase::Recording {
            return Err(Error::InvalidPhase {
                action: "stop recording",
                phase: self.phase,
            });
        }
        let result = self.finish_recording();
        self.phase = Phase::Stopped;
        if let Err(e) = &result {
            self.status = Some(StatusMessage::MicrophoneUnavailable(e.to_string()));
        }
        result
    }

    /// Stop recognition and capture, keeping the clip when capture succeeds.
    fn finish_recording(&mut self) -> Result<()> {
        let Some(recording) = self.recording.as_mut() else {
            return Ok(());
        };
        if recording.is_recognizing() {
            recording.set_recognizing(false);
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
        if !recording.is_capturing() {
            return Ok(());
        }
        recording.set_capturing(false);
        match self.capture.stop() {
            Ok(clip) => {
                debug!(bytes = clip.bytes.len(), "recording stopped");
                recording.set_clip(clip);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "capture failed to stop cleanly");
                self.capture.release();
                Err(e.into())
            }
        }
    }

    /// Reveal the answer, comparing it with `input` where the card type
    /// takes typed input.
    ///
    /// Calling this again for the same card returns the first result
    /// without contacting the server.
    pub async fn reveal(&mut self, input: &str) -> Result<RevealView> {
        if self.answer_shown {
            if let Some(view) = &self.revealed {
                return Ok(view.clone());
            }
        }
        let card = self.card.clone().ok_or(Error::NoCard)?;

        self.answer_shown = true;
        self.controls.reveal = false;
        self.controls.recorder = false;
        if let Err(e) = self.finish_recording() {
            debug!(error = %e, "recording discarded on reveal");
        }

        if let Err(e) = self.client.review(self.route).reveal().await {
            warn!(card_id = card.card_id, error = %e, "reveal notification failed");
        }

        let view = match &card.content {
            CardContent::Listening(c) => self.reveal_dictation(&c.transcript, input).await,
            CardContent::Word(c) => self.reveal_dictation(&c.word, input).await,
            CardContent::FrenchVocab(c) => self.reveal_dictation(&c.word, input).await,
            CardContent::Writing(c) => RevealView::Correction {
                original: c.original.clone(),
                corrected: c.corrected.clone(),
            },
            CardContent::Shadowing(c) => self.reveal_pronunciation(card.card_id, c).await,
            CardContent::Generic(c) => RevealView::Answer {
                html: if c.answer.is_empty() {
                    card.answer_html.clone()
                } else {
                    c.answer.clone()
                },
            },
        };

        info!(card_id = card.card_id, "answer revealed");
        self.revealed = Some(view.clone());
        self.phase = Phase::Revealed;
        self.controls.ease = card.buttons.clone();
        Ok(view)
    }

    async fn reveal_dictation(&mut self, expected: &str, input: &str) -> RevealView {
        let actual = input.trim();
        let outcome = if actual.is_empty() {
            DictationOutcome::NotAnswered
        } else {
            match self.client.text().diff(expected, actual).await {
                Ok(diff) => DictationOutcome::Aligned(diff),
                Err(e) => {
                    warn!(error = %e, "diff failed, showing raw text");
                    self.status = Some(StatusMessage::DiffFailed(e.to_string()));
                    DictationOutcome::Unaligned
                }
            }
        };

        RevealView::Dictation(DictationView {
            expected: expected.to_string(),
            actual: actual.to_string(),
            outcome,
        })
    }

    async fn reveal_pronunciation(&mut self, card_id: i64, card: &ShadowingCard) -> RevealView {
        let feedback = if self.scores_locally() {
            let transcript = self
                .recording
                .as_ref()
                .map(RecordingSession::transcript)
                .unwrap_or_default();
            let assessment = assess(card.target(), &transcript);
            debug!(score = ?assessment.score, "scored locally");
            Some(PronunciationFeedback::Local(assessment))
        } else {
            match self.recording.as_mut().and_then(RecordingSession::take_clip) {
                Some(clip) => match self.client.speech().analyze(card_id, &clip).await {
                    Ok(result) => Some(PronunciationFeedback::Server(result)),
                    Err(e) => {
                        warn!(error = %e, "pronunciation analysis failed");
                        self.status = Some(StatusMessage::AnalyzeFailed(e.to_string()));
                        None
                    }
                },
                None => {
                    self.status = Some(StatusMessage::NothingRecorded);
                    None
                }
            }
        };

        RevealView::Pronunciation(PronunciationView {
            sentence: card.sentence.clone(),
            word: card.word.clone(),
            english: card.english.clone(),
            feedback,
        })
    }

    /// Submit an ease rating for the revealed card, then load the next one.
    ///
    /// Controls are disabled while the rating is submitted. If submission
    /// fails they are enabled again, the server's message is put in the
    /// status line, and the current card stays.
    ///
    /// If the rating is accepted but the next card cannot be fetched, the
    /// error is returned with no card loaded and the session back in
    /// [`Phase::Idle`]; call [`load_next`](Self::load_next) to retry.
    pub async fn rate(&mut self, ease: Ease) -> Result<LoadOutcome> {
        let card = self.card.as_ref().ok_or(Error::NoCard)?;
        if !self.answer_shown {
            return Err(Error::NotRevealed);
        }
        if !card.offers(ease) {
            return Err(Error::EaseNotOffered(ease));
        }
        if self.phase != Phase::Revealed {
            return Err(Error::InvalidPhase {
                action: "rate",
                phase: self.phase,
            });
        }
        let card_id = card.card_id;

        let ease_buttons = std::mem::take(&mut self.controls.ease);
        self.controls.reveal = false;
        self.status = Some(StatusMessage::Submitting);

        match self.client.review(self.route).answer(card_id, ease).await {
            Ok(outcome) => {
                info!(card_id, ease = u8::from(ease), advanced = outcome.card_advanced, "card rated");
                self.phase = Phase::Rated;
                self.load_next().await
            }
            Err(e) => {
                warn!(card_id, error = %e, "rating submission failed");
                self.status = Some(StatusMessage::SubmitFailed(e.to_string()));
                self.controls.ease = ease_buttons;
                self.controls.reveal = true;
                Err(e.into())
            }
        }
    }

    /// Translate text, e.g. the expected sentence after reveal.
    ///
    /// Best effort: failures and empty translations give `None`.
    pub async fn translate(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        match self.client.text().translate(text).await {
            Ok(translation) if !translation.trim().is_empty() => Some(translation),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "translation failed");
                None
            }
        }
    }
}
