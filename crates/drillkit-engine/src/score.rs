//! Pronunciation similarity scoring for shadowing practice.
//!
//! A spoken attempt arrives as recognized text. Both it and the expected
//! sentence are normalized (accents stripped, lowercased, punctuation
//! collapsed), then compared by edit distance:
//!
//! ```text
//! score = 1 - distance / max(len(expected), len(actual))
//! ```
//!
//! # Example
//!
//! ```
//! use drillkit_engine::score::{Feedback, assess};
//!
//! let assessment = assess("chat", "chats");
//! assert_eq!(assessment.score, Some(0.8));
//! assert_eq!(assessment.feedback, Feedback::Decent);
//! ```

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Scores at or above this are "very close".
pub const VERY_CLOSE_THRESHOLD: f64 = 0.85;

/// Scores at or above this (and below [`VERY_CLOSE_THRESHOLD`]) are "decent".
pub const DECENT_THRESHOLD: f64 = 0.60;

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, 'œ' | 'æ' | 'ç' | '\'' | '-')
}

/// Normalize text for comparison.
///
/// Decomposes to NFD, drops characters with a nonzero canonical combining
/// class, lowercases, turns every run of characters other than
/// `a-z œ æ ç ' -` into a single space, and trims.
pub fn normalize(text: &str) -> String {
    let lowered = text
        .nfd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for c in lowered.chars() {
        if is_kept(c) {
            if in_gap && !out.is_empty() {
                out.push(' ');
            }
            out.push(c);
            in_gap = false;
        } else {
            in_gap = true;
        }
    }
    out
}

/// Edit distance with unit cost for insertions, deletions and substitutions.
///
/// Works on Unicode scalar values with a single rolling row of
/// `len(b) + 1` entries.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        // row[j] still holds the previous row here; `diagonal` is prev[j - 1].
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitute = diagonal + usize::from(ca != *cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(substitute);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Similarity of two texts after normalization, from 0.0 to 1.0.
///
/// Returns 0.0 when either side normalizes to nothing.
pub fn similarity(expected: &str, actual: &str) -> f64 {
    let expected = normalize(expected);
    let actual = normalize(actual);
    if expected.is_empty() || actual.is_empty() {
        return 0.0;
    }

    let distance = levenshtein(&expected, &actual);
    let max_len = expected.chars().count().max(actual.chars().count());
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}

/// Qualitative feedback for a spoken attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Score of at least 0.85.
    VeryClose,
    /// Score from 0.60 up to 0.85.
    Decent,
    /// Score below 0.60.
    LargeDeviation,
    /// Nothing was recognized, so nothing was scored.
    NoSpeech,
}

impl Feedback {
    /// Tier for a similarity score.
    pub fn for_score(score: f64) -> Self {
        if score >= VERY_CLOSE_THRESHOLD {
            Feedback::VeryClose
        } else if score >= DECENT_THRESHOLD {
            Feedback::Decent
        } else {
            Feedback::LargeDeviation
        }
    }

    /// Advice shown to the learner.
    pub fn message(self) -> &'static str {
        match self {
            Feedback::VeryClose => "very close pronunciation, keep it up!",
            Feedback::Decent => "decent, mind the stress and liaison.",
            Feedback::LargeDeviation => "large deviation, re-listen to the original and retry.",
            Feedback::NoSpeech => "No valid text recognized, please try again.",
        }
    }
}

/// A scored spoken attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// What the recognizer heard.
    pub transcript: String,
    /// Similarity score; `None` when nothing was recognized.
    pub score: Option<f64>,
    /// Feedback tier.
    pub feedback: Feedback,
}

impl Assessment {
    /// Score as a whole percentage. Halves round to even.
    pub fn percent(&self) -> Option<u32> {
        self.score.map(|s| (s * 100.0).round_ties_even() as u32)
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "Match {}%: {}", pct, self.feedback.message()),
            None => f.write_str(self.feedback.message()),
        }
    }
}

/// Score recognized speech against the expected text.
///
/// Blank recognized text short-circuits to [`Feedback::NoSpeech`].
pub fn assess(expected: &str, transcript: &str) -> Assessment {
    let transcript = transcript.trim();
    if transcript.is_empty() {
        return Assessment {
            transcript: String::new(),
            score: None,
            feedback: Feedback::NoSpeech,
        };
    }

    let score = similarity(expected, transcript);
    Assessment {
        transcript: transcript.to_string(),
        score: Some(score),
        feedback: Feedback::for_score(score),
    }
}
