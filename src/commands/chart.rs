use tracing::info;

use crate::api::currency::CurrencyClient;
use crate::models::state::{AppEvent, AppState};
use crate::services::{chart_service, rate_service};
use crate::services::chart_service::Viewport;

/// Write the rate history chart to a file.
///
/// `chart [svg|png] [path]` — uses the series already held in the snapshot,
/// fetching it first when none is loaded. `chart out.svg` infers the format
/// from the extension.
pub async fn execute(
    client: &CurrencyClient,
    state: &AppState,
    args: &[&str],
) -> Result<Vec<AppEvent>, String> {
    let (format_arg, path_arg) = match args.first() {
        Some(first) if first.contains('.') => {
            let fmt = first.rsplit('.').next().unwrap_or("svg").to_lowercase();
            (fmt, Some(*first))
        }
        Some(first) => (first.to_lowercase(), args.get(1).copied()),
        None => ("svg".to_string(), None),
    };

    let mut events = Vec::new();
    let series = if state.history.is_empty() {
        info!("No history loaded, fetching {}/{}", state.base, state.target);
        let seq = state.next_seq();
        let (_, series) = rate_service::load_history(client, &state.base, &state.target).await?;
        events.push(AppEvent::HistoryRequested { seq });
        events.push(AppEvent::HistoryLoaded { seq, series: series.clone() });
        series
    } else {
        state.history.clone()
    };

    if series.is_empty() {
        return Err("❌ No plottable rate history for this pair.".to_string());
    }

    match format_arg.as_str() {
        "svg" => {
            let path = path_arg.unwrap_or("chart.svg");
            let scene = chart_service::build_scene(&series, Viewport::default());
            let svg = chart_service::scene_to_svg(&scene);
            std::fs::write(path, svg)
                .map_err(|e| format!("Failed to write chart file: {}", e))?;
            info!("✓ Chart written to {}", path);
            println!("Chart written to {} ({} points)", path, series.len());
        }
        "png" => {
            let path = path_arg.unwrap_or("chart.png");
            chart_service::write_png_chart(&series, &state.base, &state.target, path, 1024, 768)?;
            info!("✓ Chart written to {}", path);
            println!("Chart written to {} ({} points)", path, series.len());
        }
        other => {
            return Err(format!(
                "❌ Unknown chart format: '{}'. Use `chart svg` or `chart png`.",
                other
            ));
        }
    }

    Ok(events)
}
