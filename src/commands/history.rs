use tracing::info;

use crate::api::currency::CurrencyClient;
use crate::models::state::{AppEvent, AppState};
use crate::services::rate_service;
use crate::utils::format::format_amount;
use crate::utils::table::Table;

/// Fetch the pair's history, print the table, and keep the narrowed series
/// in the snapshot for the chart command.
pub async fn execute(
    client: &CurrencyClient,
    state: &AppState,
) -> Result<Vec<AppEvent>, String> {
    info!("📜 Fetching history for {}/{}", state.base, state.target);

    let seq = state.next_seq();
    let (records, series) = rate_service::load_history(client, &state.base, &state.target).await?;

    let mut table = Table::new(&["Time", "Pair", "Rate", "Amount", "Converted"]);
    for record in &records {
        table.add_row([
            record.created_at.clone(),
            format!("{}/{}", record.base_code, record.target_code),
            format_amount(record.rate),
            format_amount(record.amount),
            format_amount(record.converted),
        ]);
    }
    print!("{}", table);
    println!("{} record(s), {} plottable point(s)", records.len(), series.len());

    Ok(vec![
        AppEvent::HistoryRequested { seq },
        AppEvent::HistoryLoaded { seq, series },
    ])
}
