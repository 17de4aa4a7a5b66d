use tracing::info;

use crate::api::currency::CurrencyClient;
use crate::models::state::{AppEvent, AppState};
use crate::services::rate_service;
use crate::utils::format::{format_amount, parse_amount};

/// Convert the current amount (or an explicit one) for the current pair
pub async fn execute(
    client: &CurrencyClient,
    state: &AppState,
    args: &[&str],
) -> Result<Vec<AppEvent>, String> {
    let amount = match args.first() {
        Some(raw) => parse_amount(raw)?,
        None => state.amount,
    };

    info!("💱 Converting {} {} -> {}", amount, state.base, state.target);

    let seq = state.next_seq();
    let response = rate_service::run_conversion(client, &state.base, &state.target, amount).await?;

    println!(
        "{} {} = {} {} (rate {})",
        format_amount(Some(amount)),
        state.base,
        format_amount(response.converted),
        state.target,
        format_amount(response.rate),
    );

    Ok(vec![
        AppEvent::ConvertRequested { seq },
        AppEvent::ConvertCompleted { seq, response },
    ])
}
