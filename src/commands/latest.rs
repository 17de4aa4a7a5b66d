use tracing::info;

use crate::api::currency::{CurrencyClient, LatestResponse};
use crate::models::state::{AppEvent, AppState};
use crate::services::rate_service;
use crate::utils::format::format_amount;
use crate::utils::table::Table;

/// Fetch and display the latest rates for the current base currency
pub async fn execute(
    client: &CurrencyClient,
    state: &AppState,
) -> Result<Vec<AppEvent>, String> {
    info!("📈 Fetching latest rates for base {}", state.base);

    let latest = rate_service::fetch_latest(client, &state.base).await?;
    print_table(&latest);

    Ok(vec![AppEvent::LatestLoaded(latest)])
}

/// Print the latest-rates table
pub fn print_table(latest: &LatestResponse) {
    if latest.rates.is_empty() {
        println!("No rates available for base {}", latest.base);
        return;
    }

    let mut table = Table::new(&["Code", "Rate"]);
    for (code, rate) in &latest.rates {
        table.add_row([code.clone(), format_amount(Some(*rate))]);
    }

    println!("Latest rates (base {}):", latest.base);
    print!("{}", table);
}
