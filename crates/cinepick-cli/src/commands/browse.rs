use super::context::AppContext;
use super::display::{self, print_movie_page};
use super::spinner::with_spinner;
use crate::output::Output;
use clap::Args;
use cinepick_core::{filter_movies, MovieFilter};
use cinepick_models::{builtin_genres, genre_by_name, genre_name, GenreId, MovieId, MoviePage};
use cinepick_sources::MovieCatalog;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use tracing::warn;

/// Paging and filter flags shared by the listing commands
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Result page
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Only show movies rated at least this much (0-10)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Only show movies of this genre (id or name)
    #[arg(long)]
    pub genre: Option<String>,
}

impl ListArgs {
    pub fn filter(&self) -> Result<MovieFilter> {
        let genre = self.genre.as_deref().map(resolve_genre).transpose()?;
        Ok(MovieFilter {
            min_rating: self.min_rating.unwrap_or(0.0),
            genre,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Popular,
    TopRated,
    Trending,
}

impl Listing {
    fn title(self) -> &'static str {
        match self {
            Listing::Popular => "Popular Movies",
            Listing::TopRated => "Top Rated Movies",
            Listing::Trending => "Trending This Week",
        }
    }
}

pub fn resolve_genre(input: &str) -> Result<GenreId> {
    genre_by_name(input).ok_or_else(|| eyre!("Unknown genre '{}'. Run `cinepick genres` to list them.", input))
}

/// Keep the page metadata, narrow the results
fn apply_filter(mut page: MoviePage, filter: &MovieFilter) -> MoviePage {
    if filter.is_active() {
        page.results = filter_movies(&page.results, filter);
    }
    page
}

pub async fn run_listing(listing: Listing, args: ListArgs, output: &Output) -> Result<()> {
    let filter = args.filter()?;
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let page = with_spinner(format!("Fetching {}...", listing.title().to_lowercase()), async {
        match listing {
            Listing::Popular => catalog.popular_movies(args.page).await,
            Listing::TopRated => catalog.top_rated_movies(args.page).await,
            Listing::Trending => catalog.trending_movies(args.page).await,
        }
    })
    .await?;

    print_movie_page(output, listing.title(), &apply_filter(page, &filter));
    Ok(())
}

pub async fn run_search(query: &str, page: u32, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let results = with_spinner(format!("Searching for '{}'...", query), catalog.search_movies(query, page)).await?;
    print_movie_page(output, &format!("Results for '{}'", query.trim()), &results);
    Ok(())
}

pub async fn run_genre(genre: &str, page: u32, min_rating: Option<f64>, output: &Output) -> Result<()> {
    let genre_id = resolve_genre(genre)?;
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let name = genre_name(genre_id).map(str::to_string).unwrap_or_else(|| genre_id.to_string());
    let results = with_spinner(format!("Fetching {} movies...", name), catalog.movies_by_genre(genre_id, page)).await?;

    let filter = MovieFilter {
        min_rating: min_rating.unwrap_or(0.0),
        genre: None,
    };
    print_movie_page(output, &format!("{} Movies", name), &apply_filter(results, &filter));
    Ok(())
}

pub async fn run_show(id: MovieId, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let (details, credits, stream, recommended) = with_spinner("Fetching movie details...", async {
        tokio::join!(
            catalog.movie_details(id),
            catalog.movie_credits(id),
            catalog.movie_stream(id),
            catalog.movie_recommendations(id),
        )
    })
    .await;

    let details = details?;
    // Credits, stream and related movies are extras; the details page renders without them
    let credits = credits
        .map_err(|e| warn!(movie_id = id, "Failed to fetch credits: {}", e))
        .ok();
    let stream = stream
        .map_err(|e| warn!(movie_id = id, "Failed to fetch videos: {}", e))
        .ok();
    let related = match recommended {
        Ok(page) if !page.is_empty() => page.results,
        _ => catalog
            .similar_movies(id)
            .await
            .map(|page| page.results)
            .unwrap_or_else(|e| {
                warn!(movie_id = id, "Failed to fetch similar movies: {}", e);
                Vec::new()
            }),
    };

    let in_watchlist = ctx.watchlist().contains(id);
    display::print_details(output, &details, credits.as_ref(), stream.as_ref(), &related, in_watchlist);
    Ok(())
}

pub async fn run_genres(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    // Fall back to the built-in table when TMDB is unreachable or not configured
    let genres = match ctx.catalog() {
        Ok(catalog) => match with_spinner("Fetching genres...", catalog.genres()).await {
            Ok(genres) if !genres.is_empty() => genres,
            Ok(_) => builtin_genres(),
            Err(e) => {
                warn!("Failed to fetch genres, using built-in list: {}", e);
                builtin_genres()
            }
        },
        Err(e) => {
            warn!("{}", e);
            builtin_genres()
        }
    };

    if !output.is_human() {
        output.data(&genres);
        return Ok(());
    }

    let mut table = display::styled_table();
    table.set_header(vec![display::header_cell("ID"), display::header_cell("Genre")]);
    for genre in &genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    output.println(table.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinepick_models::Movie;

    fn movie(id: MovieId, vote: f64, genres: &[GenreId]) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            genre_ids: genres.to_vec(),
            vote_average: vote,
            vote_count: 0,
            popularity: 0.0,
            original_language: None,
        }
    }

    #[test]
    fn test_list_args_filter() {
        let args = ListArgs { page: 1, min_rating: Some(6.5), genre: Some("Comedy".into()) };
        assert_eq!(args.filter().unwrap(), MovieFilter { min_rating: 6.5, genre: Some(35) });

        let bad = ListArgs { page: 1, min_rating: None, genre: Some("nope".into()) };
        assert!(bad.filter().is_err());
    }

    #[test]
    fn test_apply_filter_keeps_page_metadata() {
        let page = MoviePage {
            page: 2,
            results: vec![movie(1, 5.0, &[28]), movie(2, 8.0, &[28])],
            total_pages: 9,
            total_results: 180,
        };
        let filter = MovieFilter { min_rating: 7.0, genre: None };
        let filtered = apply_filter(page, &filter);

        assert_eq!(filtered.page, 2);
        assert_eq!(filtered.total_pages, 9);
        assert_eq!(filtered.results.len(), 1);
        assert_eq!(filtered.results[0].id, 2);
    }
}
