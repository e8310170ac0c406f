//! Show pending inscriptions and their remaining time.
//!
//! Read-only: listing never starts a window, so a record submitted but not
//! yet opened shows as "window not started".

use anyhow::Result;
use inscribe_core::api::decode_cache_key;
use inscribe_core::countdown::remaining_secs;

use super::{App, format_remaining};

pub fn run(app: &App, cache_key: Option<&str>) -> Result<()> {
    let keys = match cache_key {
        Some(raw) => vec![decode_cache_key(raw)],
        None => app.store.pending_keys(),
    };
    if keys.is_empty() {
        println!("No pending inscriptions.");
        return Ok(());
    }

    for key in keys {
        match app.store.load(&key) {
            Some(record) => {
                let window = match app.store.timer_started_at(&key) {
                    Some(started_at_ms) => {
                        let left =
                            remaining_secs(app.clock.now_ms(), started_at_ms, app.window_secs);
                        if left == 0 {
                            "expired (run `inscribe sweep` to clean up)".to_string()
                        } else {
                            format!("{} left", format_remaining(left))
                        }
                    },
                    None => "window not started".to_string(),
                };
                println!(
                    "{key}  {} ({})  {window}",
                    record.participant.name, record.participant.type_description
                );
            },
            None => println!("{key}  no pending inscription"),
        }
    }
    Ok(())
}
