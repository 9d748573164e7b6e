use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

pub async fn run_clear(all: bool, history: bool, watchlist: bool, credentials: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    if all {
        clear_history(&ctx, output)?;
        clear_watchlist(&ctx, output)?;
        clear_credentials(&ctx, output)?;
        output.success("Watch history, watchlist and credentials cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if history {
        clear_history(&ctx, output)?;
        cleared_anything = true;
    }

    if watchlist {
        clear_watchlist(&ctx, output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(&ctx, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --history, --watchlist, --credentials, or --all");
        output.println("\nExample: cinepick clear --history");
    }

    Ok(())
}

fn clear_history(ctx: &AppContext, output: &Output) -> Result<()> {
    ctx.history()
        .clear()
        .map_err(|e| eyre!("Failed to clear watch history: {}", e))?;
    output.success("Cleared watch history");
    Ok(())
}

fn clear_watchlist(ctx: &AppContext, output: &Output) -> Result<()> {
    ctx.watchlist()
        .clear()
        .map_err(|e| eyre!("Failed to clear watchlist: {}", e))?;
    output.success("Cleared watchlist");
    Ok(())
}

fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
