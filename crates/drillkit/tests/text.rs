//! Tests for diff and translation actions.

mod common;

use common::{client_for_mock, mock_endpoint, mock_error, mock_json, setup_mock_server};
use drillkit::{Error, Token, TokenStatus};
use serde_json::json;
use wiremock::Mock;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_diff() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    Mock::given(method("POST"))
        .and(path("/api/diff"))
        .and(body_json(json!({"expected": "le chat", "actual": "le"})))
        .respond_with(mock_json(json!({
            "expected": [
                {"text": "le", "status": "match"},
                {"text": "chat", "status": "missing"}
            ],
            "actual": [{"text": "le", "status": "match"}],
            "counts": {"match": 1, "missing": 1, "extra": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let diff = client.text().diff("le chat", "le").await.unwrap();
    assert_eq!(
        diff.expected,
        vec![
            Token::new("le", TokenStatus::Match),
            Token::new("chat", TokenStatus::Missing)
        ]
    );
    assert_eq!(diff.actual.len(), 1);
    assert_eq!(diff.counts.unwrap().missing, 1);
}

#[tokio::test]
async fn test_diff_server_failure() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    mock_endpoint(&server, "POST", "/api/diff", mock_error(502, "bad gateway")).await;

    let err = client.text().diff("a", "b").await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 502, .. }));
}

#[tokio::test]
async fn test_translate() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    Mock::given(method("POST"))
        .and(path("/api/translate"))
        .and(body_json(json!({"text": "Il fait beau."})))
        .respond_with(mock_json(json!({"translation": "天气很好。"})))
        .expect(1)
        .mount(&server)
        .await;

    let translation = client.text().translate("Il fait beau.").await.unwrap();
    assert_eq!(translation, "天气很好。");
}

#[tokio::test]
async fn test_translate_missing_field() {
    let server = setup_mock_server().await;
    let client = client_for_mock(&server);

    mock_endpoint(&server, "POST", "/api/translate", mock_json(json!({}))).await;

    let translation = client.text().translate("x").await.unwrap();
    assert_eq!(translation, "");
}
