//! Token diff types shared by the diff endpoint and the local diff engine.

use serde::{Deserialize, Serialize};

/// How a token relates to the other side of the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// Present on both sides.
    Match,
    /// Expected but absent from the user's text.
    Missing,
    /// Typed by the user but not expected.
    Extra,
}

impl TokenStatus {
    /// CSS class used when rendering the token as HTML.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenStatus::Match => "diff-match",
            TokenStatus::Missing => "diff-miss",
            TokenStatus::Extra => "diff-extra",
        }
    }
}

/// A word or punctuation mark with its alignment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text.
    pub text: String,
    /// Alignment status.
    pub status: TokenStatus,
}

impl Token {
    /// Create a token.
    pub fn new(text: impl Into<String>, status: TokenStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

/// Per-status token totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffCounts {
    /// Tokens found on both sides.
    #[serde(rename = "match")]
    pub matched: usize,
    /// Expected tokens the user left out.
    pub missing: usize,
    /// User tokens that were not expected.
    pub extra: usize,
}

impl DiffCounts {
    /// Record one token.
    pub fn add(&mut self, status: TokenStatus) {
        match status {
            TokenStatus::Match => self.matched += 1,
            TokenStatus::Missing => self.missing += 1,
            TokenStatus::Extra => self.extra += 1,
        }
    }

    /// True when nothing was missing or extra.
    pub fn is_exact(&self) -> bool {
        self.missing == 0 && self.extra == 0
    }
}

/// Alignment of an expected phrase against the user's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Expected tokens, each `match` or `missing`.
    #[serde(default)]
    pub expected: Vec<Token>,
    /// User tokens, each `match` or `extra`.
    #[serde(default)]
    pub actual: Vec<Token>,
    /// Totals, when the producer reports them.
    #[serde(default)]
    pub counts: Option<DiffCounts>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_server_diff() {
        let diff: DiffResult = serde_json::from_value(json!({
            "expected": [
                {"text": "le", "status": "match"},
                {"text": "chat", "status": "missing"}
            ],
            "actual": [{"text": "le", "status": "match"}],
            "counts": {"match": 1, "missing": 1, "extra": 0}
        }))
        .unwrap();

        assert_eq!(diff.expected[1], Token::new("chat", TokenStatus::Missing));
        assert_eq!(diff.counts.unwrap().matched, 1);
        assert!(!diff.counts.unwrap().is_exact());
    }

    #[test]
    fn test_decode_without_counts() {
        let diff: DiffResult = serde_json::from_value(json!({"expected": [], "actual": []})).unwrap();
        assert_eq!(diff.counts, None);
    }
}
