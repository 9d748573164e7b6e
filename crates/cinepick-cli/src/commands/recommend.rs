use super::context::AppContext;
use super::display::print_movie_page;
use super::spinner::with_spinner;
use crate::output::Output;
use color_eyre::Result;
use tracing::info;

pub async fn run_recommend(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let recommender = ctx.recommender()?;

    let watched = recommender.history().len();
    let heading = if watched == 0 {
        output.info("No watch history yet. Showing popular movies; use `cinepick watch <id>` to personalise.");
        "Popular Movies"
    } else {
        "Recommended For You"
    };

    let results = with_spinner("Finding something to watch...", recommender.get_recommendations()).await?;
    info!(history = watched, results = results.results.len(), "Recommendations ready");

    print_movie_page(output, heading, &results);
    Ok(())
}
