//! Internal request and response bodies for the study server protocol.

use serde::{Deserialize, Serialize};

/// Body of `POST {route}/answer`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnswerRequest {
    pub card_id: i64,
    pub ease: u8,
}

/// Body of `POST /api/diff`.
#[derive(Debug, Serialize)]
pub(crate) struct DiffRequest<'a> {
    pub expected: &'a str,
    pub actual: &'a str,
}

/// Body of `POST /api/translate`.
#[derive(Debug, Serialize)]
pub(crate) struct TranslateRequest<'a> {
    pub text: &'a str,
}

/// Response of `POST /api/translate`.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateResponse {
    #[serde(default)]
    pub translation: String,
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
