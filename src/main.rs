use std::io::{self, Write};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod models;
mod services;
mod utils;

use api::currency::CurrencyClient;
use models::state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("ratescope=info".parse().unwrap()))
        .with_target(true)
        .init();

    info!("💱 Starting ratescope...");
    info!("  ratescope - currency rates, conversions and history charts");
    info!("");

    let base_url = match std::env::var("RATE_API_BASE") {
        Ok(url) => url,
        Err(_) => {
            error!("RATE_API_BASE not set (put it in .env or the environment)");
            return;
        }
    };
    info!("Using rate API at {}", base_url);

    let client = CurrencyClient::new(base_url);
    let mut state = AppState::new();

    println!("ratescope — type `help` for commands, `quit` to exit.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}/{}> ", state.base, state.target);
        let _ = io::stdout().flush();

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }

        state = commands::handle_line(&client, state, input).await;
    }

    info!("Shutting down");
}
