//! Audio capture, speech recognition and playback capabilities.
//!
//! The study session never talks to devices directly. Hosts plug in
//! implementations of these traits: a terminal recorder, a browser bridge,
//! or fakes in tests. Every method is synchronous; implementations that
//! need background work own their own threads or child processes.

use std::fmt;

use drillkit::AudioClip;

/// Locale requested from speech recognizers for shadowing practice.
pub const RECOGNIZER_LOCALE: &str = "fr-FR";

/// A failure reported by a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user or the OS refused access to the device.
    PermissionDenied,
    /// No such capability on this host.
    Unavailable(String),
    /// The device failed while in use.
    Device(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied => write!(f, "microphone access denied"),
            CaptureError::Unavailable(what) => write!(f, "{} unavailable", what),
            CaptureError::Device(msg) => write!(f, "device error: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Records audio from a microphone.
pub trait AudioCapture {
    /// Acquire the device and start recording.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop recording, release the device and return what was captured.
    fn stop(&mut self) -> Result<AudioClip, CaptureError>;

    /// Release the device, discarding any recording. Safe to call when idle.
    fn release(&mut self);
}

/// On-device speech recognition running next to a capture.
///
/// Recognized text and unsolicited stops are delivered back to the session
/// as [`RecognizerEvent`]s.
pub trait SpeechRecognizer {
    /// Start (or restart) recognition for a locale.
    fn start(&mut self, locale: &str) -> Result<(), CaptureError>;

    /// Stop recognition.
    fn stop(&mut self);
}

/// Something a recognizer reports while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    /// A piece of recognized text. Only final segments are kept.
    Segment {
        /// Recognized text.
        text: String,
        /// Whether the recognizer will not revise this segment.
        is_final: bool,
    },
    /// The recognizer stopped.
    Ended,
}

/// Plays card audio.
pub trait AudioPlayback {
    /// Play audio from a URL, usually a `data:` URL.
    fn play(&mut self, url: &str) -> Result<(), CaptureError>;
}

/// Capture for hosts without a microphone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl AudioCapture for NoCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable("microphone".to_string()))
    }

    fn stop(&mut self) -> Result<AudioClip, CaptureError> {
        Err(CaptureError::Unavailable("microphone".to_string()))
    }

    fn release(&mut self) {}
}

/// Playback for hosts without audio output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlayback;

impl AudioPlayback for NoPlayback {
    fn play(&mut self, _url: &str) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable("audio output".to_string()))
    }
}

/// Capture state for the current card.
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    capturing: bool,
    recognizing: bool,
    segments: Vec<String>,
    clip: Option<AudioClip>,
}

impl RecordingSession {
    pub(crate) fn started(recognizing: bool) -> Self {
        Self {
            capturing: true,
            recognizing,
            ..Default::default()
        }
    }

    /// Whether audio is being captured right now.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Whether the recognizer is expected to be running.
    pub fn is_recognizing(&self) -> bool {
        self.recognizing
    }

    /// Finalized recognized text, space-joined.
    pub fn transcript(&self) -> String {
        self.segments.join(" ").trim().to_string()
    }

    /// The finished recording, once capture has stopped.
    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub(crate) fn push_segment(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.segments.push(text.to_string());
        }
    }

    pub(crate) fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    pub(crate) fn set_recognizing(&mut self, recognizing: bool) {
        self.recognizing = recognizing;
    }

    pub(crate) fn set_clip(&mut self, clip: AudioClip) {
        self.clip = Some(clip);
    }

    pub(crate) fn take_clip(&mut self) -> Option<AudioClip> {
        self.clip.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_joins_final_segments() {
        let mut recording = RecordingSession::started(true);
        recording.push_segment(" bonjour ");
        recording.push_segment("");
        recording.push_segment("madame");
        assert_eq!(recording.transcript(), "bonjour madame");
    }

    #[test]
    fn test_no_capture_is_unavailable() {
        let mut capture = NoCapture;
        let err = capture.start().unwrap_err();
        assert_eq!(err.to_string(), "microphone unavailable");
        capture.release();
    }
}
