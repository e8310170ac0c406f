//! Cancel a pending inscription.

use anyhow::Result;
use inscribe_core::api::decode_cache_key;
use inscribe_core::confirmation::WorkflowState;

use super::App;

pub async fn run(app: &App, raw_cache_key: &str) -> Result<()> {
    let cache_key = decode_cache_key(raw_cache_key);
    let mut controller = app.controller(&cache_key);
    if matches!(controller.load(), WorkflowState::NotFound) {
        anyhow::bail!("This inscription is no longer pending. Please start a new submission.");
    }
    if controller.expire_if_due().await {
        println!("The confirmation window had already expired; the inscription was cancelled.");
        return Ok(());
    }

    match controller.cancel().await {
        Ok(()) => {
            println!("Inscription cancelled.");
            Ok(())
        },
        Err(err) => anyhow::bail!("{}", err.user_message()),
    }
}
