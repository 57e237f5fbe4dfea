//! Tests for pronunciation analysis.

mod common;

use common::{client_for_mock, mock_endpoint, mock_error, mock_json, setup_mock_server};
use drillkit::{AudioClip, Error};
use serde_json::json;
use wiremock::Mock;
use wiremock::matchers::{body_string_contains, method, path};

fn clip() -> AudioClip {
    AudioClip::new(b"OggS fake audio".to_vec(), "audio/ogg", "recording.ogg")
}

#[tokio::test]
async fn test_analyze_uploads_multipart() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    Mock::given(method("POST"))
        .and(path("/api/fr/analyze"))
        .and(body_string_contains("name=\"cardId\""))
        .and(body_string_contains("name=\"audio\"; filename=\"recording.ogg\""))
        .and(body_string_contains("OggS fake audio"))
        .respond_with(mock_json(json!({
            "transcript": "bonjour",
            "score": 0.92,
            "feedback": "very close"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.speech().analyze(99, &clip()).await.unwrap();
    assert_eq!(result.transcript, "bonjour");
    assert_eq!(result.score, Some(0.92));
    assert_eq!(result.feedback, "very close");
}

#[tokio::test]
async fn test_analyze_transcription_unavailable() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    mock_endpoint(
        &server,
        "POST",
        "/api/fr/analyze",
        mock_error(503, "transcription failed"),
    )
    .await;

    let err = client.speech().analyze(99, &clip()).await.unwrap_err();
    match err {
        Error::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "transcription failed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
