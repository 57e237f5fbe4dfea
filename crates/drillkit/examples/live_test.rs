//! Live test against a running study server.
//!
//! Run with: cargo run --example live_test
//!
//! This test is SAFE - it fetches and reveals cards but never submits a
//! rating, so no card is rescheduled.

use drillkit::{DeckRoute, StudyClient};

#[tokio::main]
async fn main() -> drillkit::Result<()> {
    let client = StudyClient::builder()
        .user(std::env::var("DRILLKIT_USER").unwrap_or_default())
        .build()?;

    println!("=== Study Server Live Test ({}) ===\n", client.base_url());

    // ========== REVIEW ACTIONS ==========
    for route in DeckRoute::ALL {
        println!("--- Deck: {} ---", route);
        let review = client.review(route);
        match review.next().await {
            Ok(Some(card)) => {
                println!("[OK] Card {} ({})", card.card_id, card.content.kind());
                println!("     Prompt: {}", card.content.prompt());
                println!("     Buttons: {:?}", card.buttons);
                if let Some(counts) = card.counts {
                    println!("     Due {} / new {} / learning {}", counts.due, counts.new, counts.learning);
                }
                review.reveal().await?;
                println!("[OK] Reveal acknowledged");
            }
            Ok(None) => println!("[OK] No due cards"),
            Err(drillkit::Error::ConnectionRefused) => {
                eprintln!("Could not connect. Is the study server running?");
                std::process::exit(1);
            }
            Err(e) => println!("[ERR] {}", e),
        }
        println!();
    }

    // ========== TEXT ACTIONS ==========
    println!("--- Text Actions ---");

    let diff = client
        .text()
        .diff("The train leaves at noon.", "the train leave at noon")
        .await?;
    println!("[OK] Diff counts: {:?}", diff.counts);

    let translation = client.text().translate("Le train part à midi.").await?;
    println!("[OK] Translation: {:?}", translation);

    println!("\n=== Live Test Complete ===");
    Ok(())
}
