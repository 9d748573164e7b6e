use super::context::AppContext;
use super::display::{self, genre_names, print_section_header};
use super::spinner::with_spinner;
use crate::output::Output;
use chrono::{Local, TimeZone};
use cinepick_core::WatchHistoryStore;
use cinepick_models::MovieId;
use cinepick_sources::MovieCatalog;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;

pub async fn run_watch(id: MovieId, rating: Option<f64>, output: &Output) -> Result<()> {
    if let Some(r) = rating {
        if !(0.0..=10.0).contains(&r) {
            return Err(eyre!("Rating must be between 0 and 10, got {}", r));
        }
    }

    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;
    let details = with_spinner("Fetching movie details...", catalog.movie_details(id)).await?;

    let recommender = ctx.recommender()?;
    recommender
        .add_to_watch_history(&details, rating)
        .map_err(|e| eyre!("Failed to save watch history: {}", e))?;

    if ctx.show_alerts() {
        output.success(format!("Added '{}' to your watch history", details.title));
    }
    Ok(())
}

fn format_watched_at(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

pub async fn run_history(clear: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let history = ctx.history();

    if clear {
        history
            .clear()
            .map_err(|e| eyre!("Failed to clear watch history: {}", e))?;
        output.success("Watch history cleared");
        return Ok(());
    }

    let items = history.load();
    if !output.is_human() {
        output.data(&items);
        return Ok(());
    }

    print_section_header("Watch History", output);
    if items.is_empty() {
        output.info("Nothing watched yet. Use `cinepick watch <id>` to add a movie.");
        return Ok(());
    }

    let mut table = display::styled_table();
    table.set_header(vec![
        display::header_cell("#"),
        display::header_cell("Movie ID"),
        display::header_cell("Genres"),
        display::header_cell("Rating"),
        display::header_cell("Watched"),
    ]);
    for (idx, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(item.movie_id),
            Cell::new(genre_names(&item.genres)),
            Cell::new(format!("{:.1}", item.rating)),
            Cell::new(format_watched_at(item.timestamp)),
        ]);
    }
    output.println(table.to_string());
    output.println(format!("{} of {} entries", items.len(), ctx.config.recommendations.history_limit));
    Ok(())
}
