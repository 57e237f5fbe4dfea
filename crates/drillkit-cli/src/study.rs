//! Interactive study loop on the terminal.

use std::io::Write;

use drillkit::{Card, CardContent, Ease};
use drillkit_engine::render::TextStyle;
use drillkit_engine::{InputPanel, LoadOutcome, RevealView, StudySession};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

type BoxError = Box<dyn std::error::Error>;

/// Line reader over stdin. `None` means the user asked to quit.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim().to_string();
        if line == ":q" {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Study until the deck runs out or the user quits.
pub async fn run(mut session: StudySession, style: TextStyle) -> Result<(), BoxError> {
    let mut prompt = Prompt::new();
    println!("Studying the {} deck. Type :q to quit.", session.route());

    let mut outcome = session.load_next().await?;
    loop {
        if outcome == LoadOutcome::NoDueCards {
            if let Some(status) = session.status() {
                println!("{}", status);
            }
            return Ok(());
        }
        let Some(card) = session.card() else {
            return Ok(());
        };
        show_card(card);

        let Some(answer) = collect_answer(&mut session, &mut prompt).await? else {
            return Ok(());
        };
        let view = session.reveal(&answer).await?;
        show_view(&view, style);
        if let Some(status) = session.status() {
            println!("({})", status);
        }

        outcome = match rate_card(&mut session, &mut prompt, &view).await? {
            Some(outcome) => outcome,
            None => return Ok(()),
        };
    }
}

fn show_card(card: &Card) {
    println!();
    match card.counts {
        Some(counts) => println!(
            "[{}] due {} | new {} | learning {}",
            card.content.kind(),
            counts.due,
            counts.new,
            counts.learning
        ),
        None => println!("[{}]", card.content.kind()),
    }

    let prompt = card.content.prompt();
    if prompt.trim().is_empty() {
        println!("{}", strip_tags(&card.question_html));
    } else {
        println!("{}", prompt);
    }
    if let CardContent::Writing(writing) = &card.content {
        println!("  {}", writing.original);
    }
}

async fn collect_answer(
    session: &mut StudySession,
    prompt: &mut Prompt,
) -> Result<Option<String>, BoxError> {
    match session.input_panel() {
        Some(InputPanel::TypedAnswer) => loop {
            let Some(line) = prompt.ask("(:r replays audio) > ").await? else {
                return Ok(None);
            };
            if line == ":r" {
                if let Err(e) = session.replay_audio() {
                    println!("({})", e);
                }
                continue;
            }
            return Ok(Some(line));
        },
        Some(InputPanel::Recorder) => record(session, prompt).await,
        Some(InputPanel::RevealOnly) | None => {
            let answer = prompt.ask("Press Enter to reveal ").await?;
            Ok(answer.map(|_| String::new()))
        }
    }
}

async fn record(session: &mut StudySession, prompt: &mut Prompt) -> Result<Option<String>, BoxError> {
    loop {
        let Some(line) = prompt
            .ask("Enter to record, :r to replay, :s to reveal without recording ")
            .await?
        else {
            return Ok(None);
        };
        match line.as_str() {
            ":r" => {
                if let Err(e) = session.replay_audio() {
                    println!("({})", e);
                }
                continue;
            }
            ":s" => return Ok(Some(String::new())),
            _ => {}
        }

        if let Err(e) = session.start_recording().await {
            println!("({})", e);
            continue;
        }
        let stop = prompt.ask("Recording... press Enter to stop ").await?;
        if let Err(e) = session.stop_recording().await {
            println!("({})", e);
        }
        if stop.is_none() {
            return Ok(None);
        }

        let Some(next) = prompt.ask("Enter to reveal, :a to record again ").await? else {
            return Ok(None);
        };
        if next != ":a" {
            return Ok(Some(String::new()));
        }
    }
}

fn show_view(view: &RevealView, style: TextStyle) {
    match view {
        RevealView::Dictation(dictation) => {
            println!("Expected: {}", dictation.expected_text(style));
            println!("You:      {}", dictation.actual_text(style));
            if let Some(counts) = dictation.counts() {
                println!(
                    "{} matched, {} missing, {} extra",
                    counts.matched, counts.missing, counts.extra
                );
            }
        }
        RevealView::Correction { original, corrected } => {
            println!("Original:  {}", original);
            println!("Corrected: {}", corrected);
        }
        RevealView::Pronunciation(pronunciation) => {
            println!("{}", pronunciation.sentence);
            if !pronunciation.word.is_empty() {
                println!("Word: {}", pronunciation.word);
            }
            if !pronunciation.english.is_empty() {
                println!("English: {}", pronunciation.english);
            }
            if let Some(feedback) = &pronunciation.feedback {
                if !feedback.transcript().is_empty() {
                    println!("Heard: {}", feedback.transcript());
                }
                println!("{}", feedback.message());
            }
        }
        RevealView::Answer { html } => println!("{}", strip_tags(html)),
    }
}

/// Text worth translating after reveal.
fn translatable(view: &RevealView) -> Option<&str> {
    match view {
        RevealView::Dictation(dictation) => Some(&dictation.expected),
        RevealView::Correction { corrected, .. } => Some(corrected),
        RevealView::Pronunciation(pronunciation) => Some(&pronunciation.sentence),
        RevealView::Answer { .. } => None,
    }
}

async fn rate_card(
    session: &mut StudySession,
    prompt: &mut Prompt,
    view: &RevealView,
) -> Result<Option<LoadOutcome>, BoxError> {
    let buttons: Vec<String> = session
        .controls()
        .ease
        .iter()
        .map(|ease| format!("{}={}", u8::from(*ease), ease.label()))
        .collect();
    let question = format!("Rate ({}), :t translates > ", buttons.join(" "));

    loop {
        let Some(line) = prompt.ask(&question).await? else {
            return Ok(None);
        };
        if line == ":t" {
            match translatable(view) {
                Some(text) => match session.translate(text).await {
                    Some(translation) => println!("{}", translation),
                    None => println!("(no translation)"),
                },
                None => println!("(nothing to translate)"),
            }
            continue;
        }

        let ease = match line.parse::<u8>().map_err(|e| e.to_string()).and_then(|n| {
            Ease::try_from(n).map_err(|e| e.to_string())
        }) {
            Ok(ease) => ease,
            Err(e) => {
                debug!(input = %line, error = %e, "unreadable rating");
                println!("(enter one of the numbers shown)");
                continue;
            }
        };

        match session.rate(ease).await {
            Ok(outcome) => return Ok(Some(outcome)),
            // The rating went through but the next card did not load.
            Err(e) if session.card().is_none() => {
                println!("({})", e);
                return reload(session, prompt).await;
            }
            Err(e) => println!("({})", e),
        }
    }
}

async fn reload(
    session: &mut StudySession,
    prompt: &mut Prompt,
) -> Result<Option<LoadOutcome>, BoxError> {
    loop {
        if prompt
            .ask("Press Enter to load the next card ")
            .await?
            .is_none()
        {
            return Ok(None);
        }
        match session.load_next().await {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(e) => println!("({})", e),
        }
    }
}

/// Plain text of a small HTML fragment.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillkit_engine::{DictationOutcome, DictationView};

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<div class=\"q\">Tom &amp; <b>Jerry</b></div><br>run"),
            "Tom & Jerry run"
        );
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_translatable_text() {
        let view = RevealView::Dictation(DictationView {
            expected: "The cat sat.".to_string(),
            actual: String::new(),
            outcome: DictationOutcome::NotAnswered,
        });
        assert_eq!(translatable(&view), Some("The cat sat."));

        let view = RevealView::Answer {
            html: "<b>x</b>".to_string(),
        };
        assert_eq!(translatable(&view), None);
    }
}
