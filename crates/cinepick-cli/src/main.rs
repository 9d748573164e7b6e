use clap::{ArgAction, Parser, Subcommand};
use cinepick_models::MovieId;
use commands::browse::{self, Listing, ListArgs};
use commands::{clear, config, history, recommend, watchlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinepick")]
#[command(about = "cinepick - Find something to watch from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Personalised recommendations from your watch history
    #[command(long_about = "Recommend movies based on the genres of the movies you watched recently. With an empty history, or when TMDB cannot be reached for the personalised lists, popular movies are shown instead.")]
    Recommend,

    /// Popular movies
    Popular {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Top rated movies
    TopRated {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Movies trending this week
    Trending {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Search movies by title
    Search {
        /// Search text
        query: String,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Movies of one genre, most popular first
    #[command(long_about = "List movies of a genre, most popular first. The genre can be given by TMDB id (28) or by name (action, \"science fiction\"). Run `cinepick genres` for the full list.")]
    Genre {
        /// Genre id or name
        genre: String,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Only show movies rated at least this much (0-10)
        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Show details, cast and where to stream a movie
    Show {
        /// TMDB movie id
        id: MovieId,
    },

    /// Mark a movie as watched
    #[command(long_about = "Add a movie to your local watch history. Re-watching a movie moves it to the front. Only the 20 most recent movies are kept, and the rating defaults to 7 when omitted.")]
    Watch {
        /// TMDB movie id
        id: MovieId,

        /// Your rating (0-10)
        #[arg(long)]
        rating: Option<f64>,
    },

    /// Show the local watch history
    History {
        /// Delete the watch history
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },

    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },

    /// List the movie genres
    Genres,

    /// Configure credentials and settings
    #[command(long_about = "Manage configuration and credentials for cinepick. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Clear local data
    #[command(long_about = "Clear local data or stored credentials. Use --history to clear the watch history, --watchlist to clear the watchlist, --credentials to clear stored credentials, or --all to clear everything.")]
    Clear {
        /// Clear history, watchlist and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the watch history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Add a movie to the watchlist
    Add {
        /// TMDB movie id
        id: MovieId,
    },
    /// Remove a movie from the watchlist
    Remove {
        /// TMDB movie id
        id: MovieId,
    },
    /// List the watchlist
    List,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show credentials unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure TMDB access
    #[command(long_about = "Configure TMDB credentials and connection settings. Provide either a v3 API key or a v4 read access token; without either flag you will be prompted. Get one at https://www.themoviedb.org/settings/api.")]
    Tmdb {
        /// TMDB v3 API key
        #[arg(long, conflicts_with = "access_token")]
        api_key: Option<String>,

        /// TMDB v4 read access token
        #[arg(long)]
        access_token: Option<String>,

        /// API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Response language (e.g. en-US)
        #[arg(long)]
        language: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Configure recommendation settings
    Recommendations {
        /// Watch history entries to keep
        #[arg(long)]
        history_limit: Option<usize>,

        /// Favourite genres to fetch recommendations for
        #[arg(long)]
        top_genres: Option<usize>,

        /// Maximum recommendations to show
        #[arg(long)]
        max_results: Option<usize>,

        /// Rating recorded by `watch` when --rating is omitted
        #[arg(long)]
        default_rating: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Recommend => recommend::run_recommend(&output).await,
        Commands::Popular { list } => browse::run_listing(Listing::Popular, list, &output).await,
        Commands::TopRated { list } => browse::run_listing(Listing::TopRated, list, &output).await,
        Commands::Trending { list } => browse::run_listing(Listing::Trending, list, &output).await,
        Commands::Search { query, page } => browse::run_search(&query, page, &output).await,
        Commands::Genre { genre, page, min_rating } => browse::run_genre(&genre, page, min_rating, &output).await,
        Commands::Show { id } => browse::run_show(id, &output).await,
        Commands::Genres => browse::run_genres(&output).await,
        Commands::Watch { id, rating } => history::run_watch(id, rating, &output).await,
        Commands::History { clear } => history::run_history(clear, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, history, watchlist, credentials } => {
            clear::run_clear(all, history, watchlist, credentials, &output).await
        }
    };

    // Structured error for JSON consumers; color-eyre still reports on stderr
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(e.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_flags() {
        let cli = Cli::try_parse_from(["cinepick", "top-rated", "--page", "3", "--min-rating", "7.5", "--genre", "drama"]).unwrap();
        match cli.command {
            Commands::TopRated { list } => {
                assert_eq!(list.page, 3);
                assert_eq!(list.min_rating, Some(7.5));
                assert_eq!(list.genre.as_deref(), Some("drama"));
            }
            _ => panic!("expected top-rated"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cinepick", "history", "-vv", "--output", "json-pretty"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, output::OutputFormat::JsonPretty);
        assert!(matches!(cli.command, Commands::History { clear: false }));
    }

    #[test]
    fn test_tmdb_key_and_token_conflict() {
        let result = Cli::try_parse_from(["cinepick", "config", "tmdb", "--api-key", "a", "--access-token", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_watch_rating() {
        let cli = Cli::try_parse_from(["cinepick", "watch", "603", "--rating", "9"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { id: 603, rating: Some(r) } if r == 9.0));
    }
}
