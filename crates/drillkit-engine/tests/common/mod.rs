//! Common test utilities for drillkit-engine session tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use drillkit_engine::{
    AudioCapture, AudioClip, AudioPlayback, CaptureError, DeckRoute, SpeechRecognizer,
    StudyClient, StudySession,
};
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a session for `route` connected to the mock server, without
/// autoplay delay.
pub fn session_for_mock(server: &MockServer, route: DeckRoute) -> StudySession {
    let client = StudyClient::builder().url(server.uri()).build().unwrap();
    StudySession::new(client, route).with_autoplay_delay(Duration::ZERO)
}

/// Create a successful JSON response.
pub fn mock_json<T: Serialize>(body: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Create an error response in the server's `{error}` shape.
#[allow(dead_code)]
pub fn mock_error(status: u16, error: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": error }))
}

/// Mount a mock for one endpoint (expect exactly 1 call).
pub async fn mock_endpoint(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
    mock_endpoint_times(server, verb, route, response, 1).await;
}

/// Mount a mock for one endpoint with expected call count.
pub async fn mock_endpoint_times(
    server: &MockServer,
    verb: &str,
    route: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Mount a mock that can be called any number of times (for best-effort calls).
#[allow(dead_code)]
pub async fn mock_endpoint_any(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(response)
        .expect(Times::from(0..))
        .mount(server)
        .await;
}

/// A card payload with the given type and data.
#[allow(dead_code)]
pub fn card_json(card_id: i64, kind: &str, data: serde_json::Value) -> serde_json::Value {
    json!({
        "cardId": card_id,
        "type": kind,
        "data": data,
        "questionHtml": "<div class=\"q\">question</div>",
        "answerHtml": "<div class=\"a\">answer</div>",
        "buttons": [1, 2, 3, 4],
        "counts": {"due": 3, "new": 1, "learning": 0}
    })
}

#[allow(dead_code)]
pub fn listening_card_json(card_id: i64) -> serde_json::Value {
    card_json(
        card_id,
        "listening",
        json!({
            "prompt": "Listen and type the sentence.",
            "transcript": "The cat sat.",
            "source": "CLB9",
            "audioUrl": "data:audio/mpeg;base64,SUQz"
        }),
    )
}

#[allow(dead_code)]
pub fn shadowing_card_json(card_id: i64) -> serde_json::Value {
    card_json(
        card_id,
        "shadowing",
        json!({
            "sentence": "Le chat dort.",
            "word": "chat",
            "english": "The cat sleeps.",
            "audioUrl": ""
        }),
    )
}

/// Shared record of what the fake devices were asked to do.
pub type CallLog = Arc<Mutex<Vec<String>>>;

#[allow(dead_code)]
pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Microphone that returns a fixed clip.
#[derive(Clone, Default)]
pub struct FakeCapture {
    pub log: CallLog,
    pub deny: bool,
}

impl AudioCapture for FakeCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        self.log.lock().unwrap().push("capture.start".to_string());
        if self.deny {
            return Err(CaptureError::PermissionDenied);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip, CaptureError> {
        self.log.lock().unwrap().push("capture.stop".to_string());
        Ok(AudioClip::new(vec![1, 2, 3, 4], "audio/webm", "attempt.webm"))
    }

    fn release(&mut self) {
        self.log.lock().unwrap().push("capture.release".to_string());
    }
}

/// Recognizer whose restarts can be made to fail.
#[derive(Clone, Default)]
pub struct FakeRecognizer {
    pub log: CallLog,
    /// Fail every start after this many successful ones.
    pub fail_after: Option<usize>,
}

impl SpeechRecognizer for FakeRecognizer {
    fn start(&mut self, locale: &str) -> Result<(), CaptureError> {
        let mut log = self.log.lock().unwrap();
        let started = log.iter().filter(|c| c.starts_with("recognizer.start")).count();
        log.push(format!("recognizer.start {}", locale));
        match self.fail_after {
            Some(limit) if started >= limit => {
                Err(CaptureError::Device("recognizer busy".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().push("recognizer.stop".to_string());
    }
}

/// Player that records the URLs it was asked to play.
#[derive(Clone, Default)]
pub struct FakePlayer {
    pub log: CallLog,
}

impl AudioPlayback for FakePlayer {
    fn play(&mut self, url: &str) -> Result<(), CaptureError> {
        self.log.lock().unwrap().push(format!("play {}", url));
        Ok(())
    }
}
