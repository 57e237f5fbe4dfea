//! Demonstrates the study session against a live server.
//!
//! Run with: `cargo run --example session_demo`
//!
//! Prerequisites:
//! - The study server running on http://127.0.0.1:5001
//! - At least one due card in the English deck
//!
//! Every card is answered with a fixed sentence and rated "good".

use drillkit_engine::render::TextStyle;
use drillkit_engine::{DeckRoute, Ease, LoadOutcome, RevealView, StudyClient, StudySession};

const ANSWER: &str = "the quick brown fox";

#[tokio::main]
async fn main() -> drillkit_engine::Result<()> {
    let client = StudyClient::builder().build()?;
    let mut session = StudySession::new(client, DeckRoute::English);

    let mut outcome = session.load_next().await?;
    let mut reviewed = 0;
    while outcome == LoadOutcome::Loaded && reviewed < 3 {
        if let Some(card) = session.card() {
            println!("\nCard {} ({})", card.card_id, card.content.kind());
        }

        match session.reveal(ANSWER).await? {
            RevealView::Dictation(dictation) => {
                println!("  expected: {}", dictation.expected_text(TextStyle::Markers));
                println!("  answered: {}", dictation.actual_text(TextStyle::Markers));
            }
            other => println!("  revealed: {:?}", other),
        }

        outcome = session.rate(Ease::Good).await?;
        reviewed += 1;
    }

    if let Some(status) = session.status() {
        println!("\n{}", status);
    }
    println!("Reviewed {} cards", reviewed);
    Ok(())
}
