//! Audio devices backed by external commands.
//!
//! The terminal has no microphone or speaker API of its own, so recording
//! and playback shell out to whatever the user configures (`arecord`,
//! `sox`, `mpv`, `afplay`, ...).

use std::io::Write;
use std::process::{Child, Command, Stdio};

use base64::prelude::*;
use drillkit::AudioClip;
use drillkit_engine::{AudioCapture, AudioPlayback, CaptureError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Placeholder replaced by the audio file path in command templates.
const FILE_PLACEHOLDER: &str = "{file}";

/// Split a command template into program and arguments, substituting the
/// file path for `{file}` or appending it when there is no placeholder.
fn build_command(template: &str, file: &str) -> Result<Command, CaptureError> {
    let mut words: Vec<String> = template.split_whitespace().map(str::to_string).collect();
    if words.is_empty() {
        return Err(CaptureError::Unavailable("audio command".to_string()));
    }
    if words.iter().any(|w| w.contains(FILE_PLACEHOLDER)) {
        for word in &mut words {
            *word = word.replace(FILE_PLACEHOLDER, file);
        }
    } else {
        words.push(file.to_string());
    }

    let mut command = Command::new(&words[0]);
    command
        .args(&words[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    Ok(command)
}

fn spawn_error(program: &str, err: std::io::Error) -> CaptureError {
    match err.kind() {
        std::io::ErrorKind::NotFound => CaptureError::Unavailable(format!("'{}'", program)),
        std::io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied,
        _ => CaptureError::Device(err.to_string()),
    }
}

fn program_name(template: &str) -> &str {
    template.split_whitespace().next().unwrap_or(template)
}

fn stop_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "audio command already exited");
    }
    let _ = child.wait();
}

/// File extension for an audio MIME type.
fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/mp4" | "audio/aac" => "m4a",
        _ => "audio",
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), CaptureError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CaptureError::Device("not a data URL".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CaptureError::Device("malformed data URL".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| CaptureError::Device("data URL is not base64".to_string()))?;
    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| CaptureError::Device(format!("invalid base64 audio: {}", e)))?;
    Ok((mime.to_string(), bytes))
}

/// Records by running a command that writes to a file until it is killed.
#[derive(Debug)]
pub struct CommandRecorder {
    template: String,
    child: Option<Child>,
    file: Option<NamedTempFile>,
}

impl CommandRecorder {
    /// Recorder for a command template such as `arecord -f cd -t wav {file}`.
    ///
    /// Recordings are WAV files.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            child: None,
            file: None,
        }
    }
}

impl AudioCapture for CommandRecorder {
    fn start(&mut self) -> Result<(), CaptureError> {
        self.release();

        let file = tempfile::Builder::new()
            .prefix("drillkit-rec-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        let path = file.path().to_string_lossy().into_owned();
        let child = build_command(&self.template, &path)?
            .spawn()
            .map_err(|e| spawn_error(program_name(&self.template), e))?;

        debug!(pid = child.id(), path = %path, "recorder started");
        self.child = Some(child);
        self.file = Some(file);
        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip, CaptureError> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| CaptureError::Device("recorder is not running".to_string()))?;
        stop_child(&mut child);

        let file = self
            .file
            .take()
            .ok_or_else(|| CaptureError::Device("recording file missing".to_string()))?;
        let bytes = std::fs::read(file.path()).map_err(|e| CaptureError::Device(e.to_string()))?;
        if bytes.is_empty() {
            return Err(CaptureError::Device("recorder produced no audio".to_string()));
        }
        debug!(bytes = bytes.len(), "recording finished");
        Ok(AudioClip::new(bytes, "audio/wav", "attempt.wav"))
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            stop_child(&mut child);
        }
        self.file = None;
    }
}

impl Drop for CommandRecorder {
    fn drop(&mut self) {
        self.release();
    }
}

/// Plays audio by running a command on a file.
///
/// Playback runs in the background; starting another clip stops the
/// previous one.
#[derive(Debug)]
pub struct CommandPlayer {
    template: String,
    current: Option<(Child, Option<NamedTempFile>)>,
}

impl CommandPlayer {
    /// Player for a command template such as `mpv --really-quiet {file}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            current: None,
        }
    }

    fn stop_current(&mut self) {
        if let Some((mut child, _file)) = self.current.take() {
            stop_child(&mut child);
        }
    }
}

impl AudioPlayback for CommandPlayer {
    fn play(&mut self, url: &str) -> Result<(), CaptureError> {
        self.stop_current();

        let (target, file) = if url.starts_with("data:") {
            let (mime, bytes) = decode_data_url(url)?;
            let mut file = tempfile::Builder::new()
                .prefix("drillkit-play-")
                .suffix(&format!(".{}", extension_for_mime(&mime)))
                .tempfile()
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            file.write_all(&bytes)
                .and_then(|()| file.flush())
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            (file.path().to_string_lossy().into_owned(), Some(file))
        } else {
            (url.to_string(), None)
        };

        let child = build_command(&self.template, &target)?
            .spawn()
            .map_err(|e| spawn_error(program_name(&self.template), e))?;
        debug!(pid = child.id(), "playback started");
        self.current = Some((child, file));
        Ok(())
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop_current();
    }
}
