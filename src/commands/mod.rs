pub mod chart;
pub mod convert;
pub mod history;
pub mod latest;

use tracing::{error, warn};

use crate::api::currency::CurrencyClient;
use crate::models::state::{reduce, AppEvent, AppState};
use crate::services::rate_service;
use crate::utils::format::{format_amount, parse_amount};

/// Dispatch one input line against the current snapshot and return the next
/// snapshot. Every mutation flows through reducer events; command failures
/// become an error event plus a printed message.
pub async fn handle_line(client: &CurrencyClient, state: AppState, line: &str) -> AppState {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return state;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "base" => set_base(client, args).await,
        "target" => set_target(args),
        "amount" => set_amount(args),
        "latest" => latest::execute(client, &state).await,
        "convert" => convert::execute(client, &state, args).await,
        "history" => history::execute(client, &state).await,
        "chart" => chart::execute(client, &state, args).await,
        "show" => {
            print_state(&state);
            Ok(Vec::new())
        }
        "help" => {
            print_help();
            Ok(Vec::new())
        }
        _ => Err(format!("❌ Unknown command: '{}'. Type `help` for usage.", command)),
    };

    match result {
        Ok(events) => events.into_iter().fold(state, |s, e| reduce(&s, e)),
        Err(e) => {
            error!("Command '{}' failed: {}", command, e);
            let user_message = friendly_error(&e);
            println!("{}", user_message);
            reduce(&state, AppEvent::ErrorOccurred(user_message))
        }
    }
}

/// Map raw error text to something presentable. Transport failures get a
/// generic hint; anything already user-shaped passes through.
fn friendly_error(message: &str) -> String {
    if message.contains("Rate Limited") {
        "⚠️ The rate service is throttling requests. Please try again in a moment.".to_string()
    } else if message.contains("Request Error") {
        "⚠️ Network error: having trouble reaching the rate service. Please try again.".to_string()
    } else if message.starts_with('❌') || message.starts_with('⚠') {
        message.to_string()
    } else {
        format!("❌ {}", message)
    }
}

/// Set the base currency and refresh the latest table for it
async fn set_base(client: &CurrencyClient, args: &[&str]) -> Result<Vec<AppEvent>, String> {
    let raw = args.first().ok_or("❌ Usage: `base <CODE>`".to_string())?;
    let code = rate_service::parse_code(raw)?;

    let mut events = vec![AppEvent::SetBase(code.clone())];

    match rate_service::fetch_latest(client, &code).await {
        Ok(latest) => {
            latest::print_table(&latest);
            events.push(AppEvent::LatestLoaded(latest));
        }
        Err(e) => {
            // The base still changes; the refresh just failed
            warn!("Failed to refresh latest rates for {}: {}", code, e);
            println!("{}", friendly_error(&e));
        }
    }

    Ok(events)
}

fn set_target(args: &[&str]) -> Result<Vec<AppEvent>, String> {
    let raw = args.first().ok_or("❌ Usage: `target <CODE>`".to_string())?;
    let code = rate_service::parse_code(raw)?;
    println!("Target currency set to {}", code);
    Ok(vec![AppEvent::SetTarget(code)])
}

fn set_amount(args: &[&str]) -> Result<Vec<AppEvent>, String> {
    let raw = args.first().ok_or("❌ Usage: `amount <NUMBER>`".to_string())?;
    let value = parse_amount(raw)?;
    println!("Amount set to {}", format_amount(Some(value)));
    Ok(vec![AppEvent::SetAmount(value)])
}

fn print_state(state: &AppState) {
    println!("Pair:           {}/{}", state.base, state.target);
    println!("Amount:         {}", format_amount(Some(state.amount)));
    match &state.latest {
        Some(latest) => println!("Latest rates:   {} entries (base {})", latest.rates.len(), latest.base),
        None => println!("Latest rates:   (not loaded)"),
    }
    match &state.conversion {
        Some(c) => println!(
            "Last conversion: {} {} -> {} {}",
            format_amount(c.amount),
            c.base_code,
            format_amount(c.converted),
            c.target_code
        ),
        None => println!("Last conversion: (none)"),
    }
    println!("History points: {}", state.history.len());
    if let Some(err) = &state.last_error {
        println!("Last error:     {}", err);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  base <CODE>             set the base currency and refresh latest rates");
    println!("  target <CODE>           set the target currency");
    println!("  amount <NUMBER>         set the conversion amount");
    println!("  latest                  show the latest rates for the base currency");
    println!("  convert [amount]        convert the amount for the current pair");
    println!("  history                 show the rate history for the current pair");
    println!("  chart [svg|png] [path]  write the history chart to a file");
    println!("  show                    print the current state");
    println!("  quit                    exit");
}
