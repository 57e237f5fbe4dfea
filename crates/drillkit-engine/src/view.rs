//! What the study screen shows for the current card.

use drillkit::{AnalyzeResult, CardKind, DiffCounts, DiffResult};
use serde::Serialize;

use crate::render::{EMPTY_ANSWER_HTML, EMPTY_ANSWER_TEXT, TextStyle, escape_html, render_html, render_text};
use crate::score::Assessment;

/// Input widget shown while a card is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPanel {
    /// A text box for dictation and spelling.
    TypedAnswer,
    /// Record / stop buttons for shadowing.
    Recorder,
    /// Nothing to enter; the card is revealed directly.
    RevealOnly,
}

impl InputPanel {
    /// Panel for a card type.
    pub fn for_kind(kind: CardKind) -> Self {
        match kind {
            CardKind::Listening | CardKind::Word | CardKind::FrenchVocab => InputPanel::TypedAnswer,
            CardKind::Shadowing => InputPanel::Recorder,
            CardKind::Writing | CardKind::Generic => InputPanel::RevealOnly,
        }
    }
}

/// The answer side of a card after reveal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealView {
    /// Typed answer compared against the expected text.
    Dictation(DictationView),
    /// Writing correction block.
    Correction {
        /// Text as originally written.
        original: String,
        /// Corrected text.
        corrected: String,
    },
    /// Shadowing result.
    Pronunciation(PronunciationView),
    /// Answer HTML for cards without a dedicated layout.
    Answer {
        /// Answer side HTML.
        html: String,
    },
}

/// How a dictation answer was compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "diff", rename_all = "snake_case")]
pub enum DictationOutcome {
    /// The user left the answer empty; nothing was compared.
    NotAnswered,
    /// Token alignment from the diff service.
    Aligned(DiffResult),
    /// The diff service failed; raw text is shown instead.
    Unaligned,
}

/// Dictation reveal: expected text next to the user's answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictationView {
    /// The text the user should have typed.
    pub expected: String,
    /// What the user typed.
    pub actual: String,
    /// Comparison result.
    pub outcome: DictationOutcome,
}

impl DictationView {
    /// Token totals, when the text was aligned.
    pub fn counts(&self) -> Option<DiffCounts> {
        match &self.outcome {
            DictationOutcome::Aligned(diff) => diff.counts,
            _ => None,
        }
    }

    /// Expected side as HTML.
    pub fn expected_html(&self) -> String {
        match &self.outcome {
            DictationOutcome::Aligned(diff) => render_html(&diff.expected),
            _ => escape_html(&self.expected),
        }
    }

    /// User side as HTML.
    pub fn actual_html(&self) -> String {
        match &self.outcome {
            DictationOutcome::NotAnswered => EMPTY_ANSWER_HTML.to_string(),
            DictationOutcome::Aligned(diff) => render_html(&diff.actual),
            DictationOutcome::Unaligned => escape_html(&self.actual),
        }
    }

    /// Expected side for a terminal.
    pub fn expected_text(&self, style: TextStyle) -> String {
        match &self.outcome {
            DictationOutcome::Aligned(diff) => render_text(&diff.expected, style),
            _ => self.expected.clone(),
        }
    }

    /// User side for a terminal.
    pub fn actual_text(&self, style: TextStyle) -> String {
        match &self.outcome {
            DictationOutcome::NotAnswered => EMPTY_ANSWER_TEXT.to_string(),
            DictationOutcome::Aligned(diff) => render_text(&diff.actual, style),
            DictationOutcome::Unaligned => self.actual.clone(),
        }
    }
}

/// Shadowing reveal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationView {
    /// Sentence the user repeated.
    pub sentence: String,
    /// Vocabulary word.
    pub word: String,
    /// English translation.
    pub english: String,
    /// Feedback, if any could be produced.
    pub feedback: Option<PronunciationFeedback>,
}

/// Pronunciation feedback from one of the two scoring strategies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PronunciationFeedback {
    /// Scored locally from on-device recognition.
    Local(Assessment),
    /// Scored by the server from an uploaded recording.
    Server(AnalyzeResult),
}

impl PronunciationFeedback {
    /// What was heard.
    pub fn transcript(&self) -> &str {
        match self {
            PronunciationFeedback::Local(a) => &a.transcript,
            PronunciationFeedback::Server(r) => &r.transcript,
        }
    }

    /// Similarity score, when one was computed.
    pub fn score(&self) -> Option<f64> {
        match self {
            PronunciationFeedback::Local(a) => a.score,
            PronunciationFeedback::Server(r) => r.score,
        }
    }

    /// Feedback text for the learner.
    pub fn message(&self) -> String {
        match self {
            PronunciationFeedback::Local(a) => a.to_string(),
            PronunciationFeedback::Server(r) => r.feedback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillkit::{Token, TokenStatus};

    #[test]
    fn test_panels_by_kind() {
        assert_eq!(InputPanel::for_kind(CardKind::Listening), InputPanel::TypedAnswer);
        assert_eq!(InputPanel::for_kind(CardKind::FrenchVocab), InputPanel::TypedAnswer);
        assert_eq!(InputPanel::for_kind(CardKind::Shadowing), InputPanel::Recorder);
        assert_eq!(InputPanel::for_kind(CardKind::Writing), InputPanel::RevealOnly);
    }

    #[test]
    fn test_not_answered_shows_placeholder() {
        let view = DictationView {
            expected: "Tom & Jerry".to_string(),
            actual: String::new(),
            outcome: DictationOutcome::NotAnswered,
        };
        assert_eq!(view.expected_html(), "Tom &amp; Jerry");
        assert_eq!(view.actual_html(), EMPTY_ANSWER_HTML);
        assert_eq!(view.actual_text(TextStyle::Markers), EMPTY_ANSWER_TEXT);
        assert_eq!(view.counts(), None);
    }

    #[test]
    fn test_unaligned_falls_back_to_escaped_raw_text() {
        let view = DictationView {
            expected: "a < b".to_string(),
            actual: "a > b".to_string(),
            outcome: DictationOutcome::Unaligned,
        };
        assert_eq!(view.expected_html(), "a &lt; b");
        assert_eq!(view.actual_html(), "a &gt; b");
    }

    #[test]
    fn test_aligned_renders_tokens() {
        let view = DictationView {
            expected: "le chat".to_string(),
            actual: "le".to_string(),
            outcome: DictationOutcome::Aligned(DiffResult {
                expected: vec![
                    Token::new("le", TokenStatus::Match),
                    Token::new("chat", TokenStatus::Missing),
                ],
                actual: vec![Token::new("le", TokenStatus::Match)],
                counts: None,
            }),
        };
        assert_eq!(
            view.expected_html(),
            r#"<span class="diff-match">le</span> <span class="diff-miss">chat</span>"#
        );
        assert_eq!(view.expected_text(TextStyle::Markers), "le [-chat-]");
    }
}
