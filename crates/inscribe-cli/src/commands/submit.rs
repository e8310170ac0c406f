//! Submit a new inscription and hold it pending confirmation.

use anyhow::Result;
use chrono::NaiveDate;
use inscribe_core::api::{ParticipantSubmission, Responsible, SubmitRequest};
use inscribe_core::pending::PendingInscriptionRecord;

use super::App;

pub async fn run(
    app: &App,
    name: String,
    birth_date: NaiveDate,
    gender: String,
    responsible_name: String,
    responsible_email: String,
) -> Result<()> {
    let request = SubmitRequest {
        responsible: Responsible {
            name: responsible_name,
            email: responsible_email,
        },
        participant: ParticipantSubmission {
            name,
            birth_date,
            gender,
        },
    };

    let response = match app.api.submit(&request).await {
        Ok(response) => response,
        Err(err) => anyhow::bail!("{}", err.user_message()),
    };

    // Persist immediately so the reservation survives a restart; the window
    // itself starts on the first confirmation step, not here.
    let record = PendingInscriptionRecord {
        cache_key: response.cache_key.clone(),
        participant: response.participant.clone(),
    };
    app.store.save(&response.cache_key, &record);

    println!("Inscription accepted and held for confirmation.");
    println!("  cache key:   {}", response.cache_key);
    println!(
        "  participant: {} ({})",
        record.participant.name, record.participant.type_description
    );
    println!("  fee:         {:.2}", record.participant.value);
    println!(
        "Confirm within {} minutes of opening it: inscribe confirm {}",
        app.window_secs / 60,
        response.cache_key
    );
    Ok(())
}
