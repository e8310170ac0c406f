//! Expire every pending inscription whose window has lapsed.
//!
//! Best-effort cancel against the service, unconditional local clear — the
//! same terminal transition the live countdown takes, applied to windows
//! that lapsed while nothing was running.

use anyhow::Result;

use super::App;

pub async fn run(app: &App) -> Result<()> {
    let mut expired = 0usize;
    for cache_key in app.store.pending_keys() {
        // A record whose window never started has nothing to expire.
        if app.store.timer_started_at(&cache_key).is_none() {
            continue;
        }
        let mut controller = app.controller(&cache_key);
        controller.load();
        if controller.expire_if_due().await {
            println!("{cache_key}  expired and cancelled");
            expired += 1;
        }
    }
    if expired == 0 {
        println!("Nothing to expire.");
    } else {
        println!("{expired} inscription(s) expired.");
    }
    Ok(())
}
