//! Card-related types.
//!
//! The server sends every card as `{cardId, type, data, ...}` where `data`
//! changes shape with `type`. [`Card`] decodes that into the [`CardContent`]
//! tagged union so callers can match on the card type exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::DeckCounts;

/// A card to study, as served by `GET {route}/next`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "CardPayload")]
pub struct Card {
    /// The card ID.
    pub card_id: i64,
    /// Type-specific card content.
    pub content: CardContent,
    /// The question side as rendered by the scheduler (HTML).
    pub question_html: String,
    /// The answer side as rendered by the scheduler (HTML).
    pub answer_html: String,
    /// Ease ratings the scheduler offers for this card.
    pub buttons: Vec<Ease>,
    /// Deck progress counters, when the server includes them.
    pub counts: Option<DeckCounts>,
}

impl Card {
    /// Whether `ease` is one of the card's answer buttons.
    pub fn offers(&self, ease: Ease) -> bool {
        self.buttons.contains(&ease)
    }
}

/// Content of a card, one variant per study mode.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    /// Sentence dictation from audio.
    Listening(ListeningCard),
    /// Single-word spelling from audio.
    Word(WordCard),
    /// Writing correction, shown without user input.
    Writing(WritingCard),
    /// French word dictation with English/Chinese glosses.
    FrenchVocab(FrenchVocabCard),
    /// Repeat a French sentence aloud.
    Shadowing(ShadowingCard),
    /// A deck without a dedicated layout.
    Generic(GenericCard),
}

impl CardContent {
    /// The card type discriminant.
    pub fn kind(&self) -> CardKind {
        match self {
            CardContent::Listening(_) => CardKind::Listening,
            CardContent::Word(_) => CardKind::Word,
            CardContent::Writing(_) => CardKind::Writing,
            CardContent::FrenchVocab(_) => CardKind::FrenchVocab,
            CardContent::Shadowing(_) => CardKind::Shadowing,
            CardContent::Generic(_) => CardKind::Generic,
        }
    }

    /// Audio attached to the card, usually a `data:` URL.
    pub fn audio_url(&self) -> Option<&str> {
        let url = match self {
            CardContent::Listening(c) => c.audio_url.as_deref(),
            CardContent::Word(c) => c.audio_url.as_deref(),
            CardContent::FrenchVocab(c) => c.audio_url.as_deref(),
            CardContent::Shadowing(c) => c.audio_url.as_deref(),
            CardContent::Writing(_) | CardContent::Generic(_) => None,
        };
        url.filter(|u| !u.is_empty())
    }

    /// Instruction shown above the input.
    pub fn prompt(&self) -> &str {
        match self {
            CardContent::Listening(c) => &c.prompt,
            CardContent::Word(c) => &c.prompt,
            CardContent::Writing(c) => &c.prompt,
            CardContent::FrenchVocab(c) => &c.prompt,
            CardContent::Shadowing(c) => &c.sentence,
            CardContent::Generic(c) => &c.prompt,
        }
    }
}

/// The card type discriminant, matching the wire `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// `listening`
    Listening,
    /// `word`
    Word,
    /// `writing`
    Writing,
    /// `french_vocab`
    FrenchVocab,
    /// `shadowing`
    Shadowing,
    /// `generic`
    Generic,
}

impl CardKind {
    /// The wire name of the card type.
    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Listening => "listening",
            CardKind::Word => "word",
            CardKind::Writing => "writing",
            CardKind::FrenchVocab => "french_vocab",
            CardKind::Shadowing => "shadowing",
            CardKind::Generic => "generic",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        match name {
            "listening" => Some(CardKind::Listening),
            "word" => Some(CardKind::Word),
            "writing" => Some(CardKind::Writing),
            "french_vocab" => Some(CardKind::FrenchVocab),
            "shadowing" => Some(CardKind::Shadowing),
            "generic" => Some(CardKind::Generic),
            _ => None,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentence dictation card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListeningCard {
    /// Instruction text.
    pub prompt: String,
    /// The sentence the user should type.
    pub transcript: String,
    /// Where the audio came from.
    pub source: String,
    /// Sentence audio.
    pub audio_url: Option<String>,
}

/// Spelling card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WordCard {
    /// Instruction text.
    pub prompt: String,
    /// The word the user should type.
    pub word: String,
    /// Word audio.
    pub audio_url: Option<String>,
}

/// Writing correction card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WritingCard {
    /// Instruction text.
    pub prompt: String,
    /// The text as originally written.
    pub original: String,
    /// The corrected text.
    pub corrected: String,
}

/// French vocabulary dictation card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrenchVocabCard {
    /// Instruction text.
    pub prompt: String,
    /// The French word the user should type.
    pub word: String,
    /// English gloss.
    pub english: String,
    /// Chinese gloss.
    pub chinese: String,
    /// Word audio.
    pub audio_url: Option<String>,
}

/// Shadowing card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowingCard {
    /// French example sentence to repeat.
    pub sentence: String,
    /// The vocabulary word the sentence illustrates.
    pub word: String,
    /// English translation of the sentence.
    pub english: String,
    /// Sentence audio.
    pub audio_url: Option<String>,
}

impl ShadowingCard {
    /// Text a spoken attempt is compared against.
    pub fn target(&self) -> &str {
        if self.sentence.trim().is_empty() {
            &self.word
        } else {
            &self.sentence
        }
    }
}

/// Card from a deck without a dedicated layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericCard {
    /// Question HTML.
    pub prompt: String,
    /// Answer HTML.
    pub answer: String,
}

/// Answer ease for reviewing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Ease {
    /// Mark the card as failed (Again).
    Again = 1,
    /// Mark the card as hard.
    Hard = 2,
    /// Mark the card as good.
    Good = 3,
    /// Mark the card as easy.
    Easy = 4,
}

impl Ease {
    /// All ratings, lowest first.
    pub const ALL: [Ease; 4] = [Ease::Again, Ease::Hard, Ease::Good, Ease::Easy];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Ease::Again => "again",
            Ease::Hard => "hard",
            Ease::Good => "good",
            Ease::Easy => "easy",
        }
    }
}

impl From<Ease> for u8 {
    fn from(ease: Ease) -> u8 {
        ease as u8
    }
}

impl TryFrom<u8> for Ease {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Ease::Again),
            2 => Ok(Ease::Hard),
            3 => Ok(Ease::Good),
            4 => Ok(Ease::Easy),
            other => Err(Error::InvalidEase(other)),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", *self as u8, self.label())
    }
}

/// Result of `POST {route}/answer`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnswerOutcome {
    /// Server status, normally `"ok"`.
    pub status: String,
    /// Set when the scheduler had already moved past the card, e.g. after a
    /// lost response to an earlier submission.
    pub card_advanced: bool,
}

/// The raw wire shape of a card.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardPayload {
    card_id: i64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    question_html: Option<String>,
    #[serde(default)]
    answer_html: Option<String>,
    #[serde(default)]
    buttons: Vec<u8>,
    #[serde(default)]
    counts: Option<DeckCounts>,
}

impl TryFrom<CardPayload> for Card {
    type Error = Error;

    fn try_from(payload: CardPayload) -> Result<Self, Self::Error> {
        let kind = CardKind::from_wire(&payload.kind)
            .ok_or_else(|| Error::InvalidCard(format!("unknown card type '{}'", payload.kind)))?;

        let data = match payload.data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        let content = decode_content(kind, data)
            .map_err(|e| Error::InvalidCard(format!("bad {} data: {}", kind, e)))?;

        let buttons = if payload.buttons.is_empty() {
            Ease::ALL.to_vec()
        } else {
            payload
                .buttons
                .into_iter()
                .map(Ease::try_from)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Card {
            card_id: payload.card_id,
            content,
            question_html: payload.question_html.unwrap_or_default(),
            answer_html: payload.answer_html.unwrap_or_default(),
            buttons,
            counts: payload.counts,
        })
    }
}

fn decode_content(kind: CardKind, data: serde_json::Value) -> serde_json::Result<CardContent> {
    Ok(match kind {
        CardKind::Listening => CardContent::Listening(serde_json::from_value(data)?),
        CardKind::Word => CardContent::Word(serde_json::from_value(data)?),
        CardKind::Writing => CardContent::Writing(serde_json::from_value(data)?),
        CardKind::FrenchVocab => CardContent::FrenchVocab(serde_json::from_value(data)?),
        CardKind::Shadowing => CardContent::Shadowing(serde_json::from_value(data)?),
        CardKind::Generic => CardContent::Generic(serde_json::from_value(data)?),
    })
}
