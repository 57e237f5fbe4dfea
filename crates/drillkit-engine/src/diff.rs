//! Token-level alignment of an expected phrase against a typed answer.
//!
//! The study server exposes the same alignment as `POST /api/diff`; this
//! module computes it locally so the diff works offline and can be tested
//! without a server.
//!
//! Alignment works on tokens (words and punctuation marks), compared
//! case-insensitively. It repeatedly takes the longest run of equal tokens
//! and recurses into the unmatched stretches on either side, which keeps
//! whole phrases together instead of scattering single-word matches.
//!
//! # Example
//!
//! ```
//! use drillkit_engine::diff::diff;
//! use drillkit_engine::TokenStatus;
//!
//! let result = diff("Le chat noir dort.", "le chien noir dort");
//! let statuses: Vec<_> = result.expected.iter().map(|t| t.status).collect();
//! assert_eq!(
//!     statuses,
//!     [
//!         TokenStatus::Match,
//!         TokenStatus::Missing,
//!         TokenStatus::Match,
//!         TokenStatus::Match,
//!         TokenStatus::Missing,
//!     ]
//! );
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use drillkit::{DiffCounts, DiffResult, Token, TokenStatus};
use regex_lite::Regex;

/// Words (optionally joined by one apostrophe) and individual punctuation marks.
const TOKEN_PATTERN: &str = r#"[A-Za-zÀ-ÖØ-öø-ÿŒœ0-9]+(?:['’][A-Za-zÀ-ÖØ-öø-ÿŒœ0-9]+)?|[.,!?;:()"“”‘’]"#;

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Split text into word and punctuation tokens.
///
/// Characters that are neither word characters nor recognized punctuation
/// are dropped.
pub fn tokenize(text: &str) -> Vec<&str> {
    token_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Align `actual` against `expected`.
///
/// Expected tokens come back as `match` or `missing`, actual tokens as
/// `match` or `extra`, each side in its original order and casing.
pub fn diff(expected: &str, actual: &str) -> DiffResult {
    let expected_tokens = tokenize(expected);
    let actual_tokens = tokenize(actual);

    let a: Vec<String> = expected_tokens.iter().map(|t| t.to_lowercase()).collect();
    let b: Vec<String> = actual_tokens.iter().map(|t| t.to_lowercase()).collect();

    let mut result = DiffResult {
        expected: Vec::with_capacity(a.len()),
        actual: Vec::with_capacity(b.len()),
        counts: None,
    };
    let mut counts = DiffCounts::default();

    let mut i = 0;
    let mut j = 0;
    for block in matching_blocks(&a, &b) {
        for text in &expected_tokens[i..block.a] {
            result.expected.push(Token::new(*text, TokenStatus::Missing));
            counts.add(TokenStatus::Missing);
        }
        for text in &actual_tokens[j..block.b] {
            result.actual.push(Token::new(*text, TokenStatus::Extra));
            counts.add(TokenStatus::Extra);
        }
        for k in 0..block.size {
            result
                .expected
                .push(Token::new(expected_tokens[block.a + k], TokenStatus::Match));
            result
                .actual
                .push(Token::new(actual_tokens[block.b + k], TokenStatus::Match));
            counts.add(TokenStatus::Match);
        }
        i = block.a + block.size;
        j = block.b + block.size;
    }
    for text in &expected_tokens[i..] {
        result.expected.push(Token::new(*text, TokenStatus::Missing));
        counts.add(TokenStatus::Missing);
    }
    for text in &actual_tokens[j..] {
        result.actual.push(Token::new(*text, TokenStatus::Extra));
        counts.add(TokenStatus::Extra);
    }

    result.counts = Some(counts);
    result
}

/// A run of `size` equal tokens at `a[a..a+size]` and `b[b..b+size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

/// All matching blocks in ascending order, found by longest-match recursion.
fn matching_blocks(a: &[String], b: &[String]) -> Vec<Block> {
    let mut b_positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (j, token) in b.iter().enumerate() {
        b_positions.entry(token.as_str()).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, &b_positions, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a, block.b));
    blocks
}

/// Longest run of equal tokens within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the run starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[String],
    b_positions: &HashMap<&str, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Block {
    let mut best = Block {
        a: alo,
        b: blo,
        size: 0,
    };
    // run_len[j] = length of the equal run ending at a[i-1], b[j]
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for (i, token) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run_len = HashMap::new();
        if let Some(positions) = b_positions.get(token.as_str()) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run_len.insert(j, k);
                if k > best.size {
                    best = Block {
                        a: i + 1 - k,
                        b: j + 1 - k,
                        size: k,
                    };
                }
            }
        }
        run_len = next_run_len;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(tokens: &[Token]) -> Vec<TokenStatus> {
        tokens.iter().map(|t| t.status).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            tokenize("Hello, world! (It's 5 o'clock.)"),
            ["Hello", ",", "world", "!", "(", "It's", "5", "o'clock", ".", ")"]
        );
    }

    #[test]
    fn test_tokenize_french() {
        assert_eq!(tokenize("L’œuvre d'art — très belle…"), ["L’œuvre", "d'art", "très", "belle"]);
        assert_eq!(tokenize("« Ça va ? »"), ["Ça", "va", "?"]);
    }

    #[test]
    fn test_tokenize_single_apostrophe_join() {
        // Only one apostrophe joins; the rest starts a new token.
        assert_eq!(tokenize("aujourd'hui"), ["aujourd'hui"]);
        assert_eq!(tokenize("rock'n'roll"), ["rock'n", "roll"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  — … ").is_empty());
    }

    #[test]
    fn test_identical_is_all_match() {
        let result = diff("The train leaves at noon.", "the TRAIN leaves at noon.");
        assert!(result.expected.iter().all(|t| t.status == TokenStatus::Match));
        assert!(result.actual.iter().all(|t| t.status == TokenStatus::Match));
        assert!(result.counts.unwrap().is_exact());
        // Each side keeps its own casing.
        assert_eq!(result.actual[1].text, "TRAIN");
        assert_eq!(result.expected[1].text, "train");
    }

    #[test]
    fn test_empty_actual_is_all_missing() {
        let result = diff("le chat", "");
        assert_eq!(statuses(&result.expected), [TokenStatus::Missing, TokenStatus::Missing]);
        assert!(result.actual.is_empty());
        assert_eq!(result.counts.unwrap().missing, 2);
    }

    #[test]
    fn test_empty_expected_is_all_extra() {
        let result = diff("", "bonjour");
        assert!(result.expected.is_empty());
        assert_eq!(statuses(&result.actual), [TokenStatus::Extra]);
    }

    #[test]
    fn test_missing_word() {
        let result = diff("le chat", "le");
        assert_eq!(
            result.expected,
            [Token::new("le", TokenStatus::Match), Token::new("chat", TokenStatus::Missing)]
        );
        assert_eq!(result.actual, [Token::new("le", TokenStatus::Match)]);
    }

    #[test]
    fn test_substitution_is_missing_plus_extra() {
        let result = diff("I have a cat", "I have a dog");
        assert_eq!(texts(&result.expected), ["I", "have", "a", "cat"]);
        assert_eq!(result.expected[3].status, TokenStatus::Missing);
        assert_eq!(result.actual[3], Token::new("dog", TokenStatus::Extra));
        let counts = result.counts.unwrap();
        assert_eq!((counts.matched, counts.missing, counts.extra), (3, 1, 1));
    }

    #[test]
    fn test_inserted_words() {
        let result = diff("see you soon", "see you very very soon");
        assert!(result.expected.iter().all(|t| t.status == TokenStatus::Match));
        assert_eq!(
            statuses(&result.actual),
            [
                TokenStatus::Match,
                TokenStatus::Match,
                TokenStatus::Extra,
                TokenStatus::Extra,
                TokenStatus::Match
            ]
        );
    }

    #[test]
    fn test_longest_run_wins_over_early_single_match() {
        // "a" appears early in actual, but the longer run "b c d" anchors the alignment.
        let result = diff("a b c d", "x b c d a");
        assert_eq!(
            statuses(&result.expected),
            [
                TokenStatus::Missing,
                TokenStatus::Match,
                TokenStatus::Match,
                TokenStatus::Match
            ]
        );
        assert_eq!(
            statuses(&result.actual),
            [
                TokenStatus::Extra,
                TokenStatus::Match,
                TokenStatus::Match,
                TokenStatus::Match,
                TokenStatus::Extra
            ]
        );
    }

    #[test]
    fn test_punctuation_counts_as_tokens() {
        let result = diff("Oui, merci.", "oui merci");
        assert_eq!(
            statuses(&result.expected),
            [TokenStatus::Match, TokenStatus::Missing, TokenStatus::Match, TokenStatus::Missing]
        );
    }

    #[test]
    fn test_token_order_is_preserved() {
        let result = diff("one two three four", "four three two one");
        assert_eq!(texts(&result.expected), ["one", "two", "three", "four"]);
        assert_eq!(texts(&result.actual), ["four", "three", "two", "one"]);
        assert_eq!(result.counts.unwrap().matched, 1);
    }
}
