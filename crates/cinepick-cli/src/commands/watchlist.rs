use super::context::AppContext;
use super::display::{self, print_section_header};
use super::spinner::with_spinner;
use crate::output::Output;
use crate::WatchlistCommands;
use cinepick_core::WatchlistAction;
use cinepick_models::MovieId;
use cinepick_sources::MovieCatalog;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use futures::future::join_all;
use serde_json::json;
use tracing::debug;

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::Add { id } => toggle(id, WatchlistAction::Add, output),
        WatchlistCommands::Remove { id } => toggle(id, WatchlistAction::Remove, output),
        WatchlistCommands::List => list(output).await,
    }
}

fn toggle(id: MovieId, action: WatchlistAction, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let watchlist = ctx.watchlist();
    let was_listed = watchlist.contains(id);

    let ids = watchlist
        .toggle(id, action)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;

    if !output.is_human() {
        output.data(&json!({ "action": action, "movieId": id, "watchlist": ids }));
        return Ok(());
    }

    match (action, was_listed) {
        (WatchlistAction::Add, true) => output.info(format!("Movie {} is already on your watchlist", id)),
        (WatchlistAction::Remove, false) => output.info(format!("Movie {} was not on your watchlist", id)),
        (WatchlistAction::Add, false) if ctx.show_alerts() => {
            output.success(format!("Added movie {} to your watchlist", id))
        }
        (WatchlistAction::Remove, true) if ctx.show_alerts() => {
            output.success(format!("Removed movie {} from your watchlist", id))
        }
        _ => {}
    }
    Ok(())
}

async fn list(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let ids = ctx.watchlist().list();

    if !output.is_human() {
        output.data(&ids);
        return Ok(());
    }

    print_section_header("Watchlist", output);
    if ids.is_empty() {
        output.info("Your watchlist is empty. Use `cinepick watchlist add <id>` to add a movie.");
        return Ok(());
    }

    // Titles are a nicety; the ids alone are still listed when TMDB is unavailable
    let titles: Vec<Option<String>> = match ctx.catalog() {
        Ok(catalog) => {
            let lookups = ids.iter().map(|id| catalog.movie_details(*id));
            with_spinner("Fetching titles...", join_all(lookups))
                .await
                .into_iter()
                .map(|result| match result {
                    Ok(details) => Some(details.title),
                    Err(e) => {
                        debug!("Title lookup failed: {}", e);
                        None
                    }
                })
                .collect()
        }
        Err(e) => {
            debug!("Listing watchlist without titles: {}", e);
            vec![None; ids.len()]
        }
    };

    let mut table = display::styled_table();
    table.set_header(vec![display::header_cell("Movie ID"), display::header_cell("Title")]);
    for (id, title) in ids.iter().zip(titles) {
        table.add_row(vec![Cell::new(id), Cell::new(title.unwrap_or_else(|| "-".to_string()))]);
    }
    output.println(table.to_string());
    Ok(())
}
