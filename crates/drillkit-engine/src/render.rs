//! Rendering of diff tokens as HTML or terminal text.
//!
//! Tokens are joined with single spaces, except that no space goes before
//! closing punctuation (`, . ; ! ? ) : ] ” ’`) or after an opening bracket
//! or quote (`( { “ ‘`).
//!
//! # Example
//!
//! ```
//! use drillkit_engine::render::render_html;
//! use drillkit_engine::{Token, TokenStatus};
//!
//! let html = render_html(&[
//!     Token::new("le", TokenStatus::Match),
//!     Token::new("chat", TokenStatus::Missing),
//! ]);
//! assert_eq!(
//!     html,
//!     r#"<span class="diff-match">le</span> <span class="diff-miss">chat</span>"#
//! );
//! ```

use drillkit::{Token, TokenStatus};

/// Shown in place of the user's answer when they typed nothing.
pub const EMPTY_ANSWER_TEXT: &str = "(not filled in)";

/// HTML form of [`EMPTY_ANSWER_TEXT`].
pub const EMPTY_ANSWER_HTML: &str = r#"<span class="diff-empty">(not filled in)</span>"#;

const CLOSING: &[char] = &[',', '.', ';', '!', '?', ')', ':', ']', '”', '’'];
const OPENING: &[char] = &['(', '{', '“', '‘'];

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Whether no space may precede this token.
pub fn is_closing(text: &str) -> bool {
    single_char(text).is_some_and(|c| CLOSING.contains(&c))
}

/// Whether no space may follow this token.
pub fn is_opening(text: &str) -> bool {
    single_char(text).is_some_and(|c| OPENING.contains(&c))
}

/// Join rendered pieces, spacing by the text each piece was rendered from.
pub fn join_with_spacing<'a, I>(pieces: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut out = String::new();
    let mut after_opening = false;
    let mut first = true;
    for (text, rendered) in pieces {
        if !first && !after_opening && !is_closing(text) {
            out.push(' ');
        }
        out.push_str(&rendered);
        after_opening = is_opening(text);
        first = false;
    }
    out
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render tokens as `<span class="diff-...">` elements.
pub fn render_html(tokens: &[Token]) -> String {
    join_with_spacing(tokens.iter().map(|token| {
        (
            token.text.as_str(),
            format!(
                r#"<span class="{}">{}</span>"#,
                token.status.css_class(),
                escape_html(&token.text)
            ),
        )
    }))
}

/// How to mark token status in plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// ANSI colors: matches green, missing red and underlined, extra yellow
    /// and struck through.
    #[default]
    Ansi,
    /// Plain markers: `[-missing-]` and `{+extra+}`.
    Markers,
}

/// Render tokens for a terminal.
pub fn render_text(tokens: &[Token], style: TextStyle) -> String {
    join_with_spacing(
        tokens
            .iter()
            .map(|token| (token.text.as_str(), style_token(&token.text, token.status, style))),
    )
}

fn style_token(text: &str, status: TokenStatus, style: TextStyle) -> String {
    match (style, status) {
        (TextStyle::Ansi, TokenStatus::Match) => format!("\x1b[32m{}\x1b[0m", text),
        (TextStyle::Ansi, TokenStatus::Missing) => format!("\x1b[31;4m{}\x1b[0m", text),
        (TextStyle::Ansi, TokenStatus::Extra) => format!("\x1b[33;9m{}\x1b[0m", text),
        (TextStyle::Markers, TokenStatus::Match) => text.to_string(),
        (TextStyle::Markers, TokenStatus::Missing) => format!("[-{}-]", text),
        (TextStyle::Markers, TokenStatus::Extra) => format!("{{+{}+}}", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .map(|w| Token::new(*w, TokenStatus::Match))
            .collect()
    }

    #[test]
    fn test_no_space_before_closing_punctuation() {
        for mark in [")", ",", ".", "!", "?", ":", "]", "”", "’", ";"] {
            let out = render_text(&matched(&["word", mark]), TextStyle::Markers);
            assert_eq!(out, format!("word{}", mark), "mark {:?}", mark);
        }
    }

    #[test]
    fn test_no_space_after_opening_bracket() {
        for mark in ["(", "{", "“", "‘"] {
            let out = render_text(&matched(&[mark, "word"]), TextStyle::Markers);
            assert_eq!(out, format!("{}word", mark), "mark {:?}", mark);
        }
    }

    #[test]
    fn test_sentence_spacing() {
        let tokens = matched(&["He", "said", ":", "“", "yes", "”", "(", "twice", ")", "."]);
        assert_eq!(
            render_text(&tokens, TextStyle::Markers),
            "He said: “yes” (twice)."
        );
    }

    #[test]
    fn test_plain_quote_is_spaced() {
        let tokens = matched(&["say", "\"", "hi", "\""]);
        assert_eq!(render_text(&tokens, TextStyle::Markers), "say \" hi \"");
    }

    #[test]
    fn test_render_html_spans() {
        let tokens = vec![
            Token::new("le", TokenStatus::Match),
            Token::new("chat", TokenStatus::Missing),
        ];
        assert_eq!(
            render_html(&tokens),
            r#"<span class="diff-match">le</span> <span class="diff-miss">chat</span>"#
        );
    }

    #[test]
    fn test_render_html_extra_and_punctuation() {
        let tokens = vec![
            Token::new("oui", TokenStatus::Extra),
            Token::new(",", TokenStatus::Match),
        ];
        assert_eq!(
            render_html(&tokens),
            r#"<span class="diff-extra">oui</span><span class="diff-match">,</span>"#
        );
    }

    #[test]
    fn test_render_html_escapes_text() {
        let tokens = vec![Token::new("<b>&", TokenStatus::Extra)];
        assert_eq!(
            render_html(&tokens),
            r#"<span class="diff-extra">&lt;b&gt;&amp;</span>"#
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"l'été <"chaud"> & sec"#),
            "l&#39;été &lt;&quot;chaud&quot;&gt; &amp; sec"
        );
    }

    #[test]
    fn test_markers() {
        let tokens = vec![
            Token::new("I", TokenStatus::Match),
            Token::new("cat", TokenStatus::Missing),
            Token::new("dog", TokenStatus::Extra),
        ];
        assert_eq!(render_text(&tokens, TextStyle::Markers), "I [-cat-] {+dog+}");
    }

    #[test]
    fn test_ansi_wraps_and_resets() {
        let out = render_text(&[Token::new("chat", TokenStatus::Missing)], TextStyle::Ansi);
        assert!(out.starts_with("\x1b[31;4m"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(render_html(&[]), "");
    }
}
