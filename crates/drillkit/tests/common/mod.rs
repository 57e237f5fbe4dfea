//! Common test utilities for study server client tests.

use drillkit::StudyClient;
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a client connected to the mock server.
pub fn client_for_mock(server: &MockServer) -> StudyClient {
    StudyClient::builder().url(server.uri()).build().unwrap()
}

/// Create a successful JSON response.
pub fn mock_json<T: Serialize>(body: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Create an error response in the server's `{error}` shape.
#[allow(dead_code)] // Not all test files use this
pub fn mock_error(status: u16, error: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": error }))
}

/// A listening card payload as the server sends it.
#[allow(dead_code)]
pub fn listening_card_json(card_id: i64) -> serde_json::Value {
    json!({
        "cardId": card_id,
        "type": "listening",
        "data": {
            "prompt": "Listen and type the sentence.",
            "transcript": "The train leaves at noon.",
            "source": "CLB9",
            "audioUrl": "data:audio/mpeg;base64,SUQz"
        },
        "questionHtml": "<div class=\"q\">[sound:a.mp3]</div>",
        "answerHtml": "<div class=\"a\">The train leaves at noon.</div>",
        "buttons": [1, 2, 3, 4],
        "counts": {"due": 2, "new": 5, "learning": 0, "words_total": 40, "words_learned": 12, "words_remaining": 28}
    })
}

/// Mount a mock for one endpoint (expect exactly 1 call).
pub async fn mock_endpoint(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
