//! Live countdown for a pending inscription.

use std::io::Write;

use anyhow::Result;
use inscribe_core::api::decode_cache_key;
use inscribe_core::confirmation::WorkflowState;
use inscribe_core::countdown::Tick;

use super::{App, format_remaining};

pub async fn run(app: &App, raw_cache_key: &str) -> Result<()> {
    let cache_key = decode_cache_key(raw_cache_key);
    let mut controller = app.controller(&cache_key);
    if matches!(controller.load(), WorkflowState::NotFound) {
        anyhow::bail!("This inscription is no longer pending. Please start a new submission.");
    }
    if let Some(record) = controller.record() {
        println!(
            "{} ({}) — fee {:.2}",
            record.participant.name,
            record.participant.type_description,
            record.participant.value
        );
    }

    let Some(mut ticker) = controller.ticker() else {
        return Ok(());
    };
    while let Some(tick) = ticker.tick().await {
        match tick {
            Tick::Remaining(secs) => {
                print!("\rTime left to confirm: {} ", format_remaining(secs));
                let _ = std::io::stdout().flush();
            },
            Tick::Expired => {
                println!();
                controller.expire_if_due().await;
                println!("The confirmation window has expired; the inscription was cancelled.");
            },
        }
    }
    Ok(())
}
