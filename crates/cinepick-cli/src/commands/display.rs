use crate::output::{Output, OutputFormat};
use cinepick_core::{page_window, PageSlot};
use cinepick_models::{genre_name, Credits, GenreId, Movie, MovieDetails, MoviePage, StreamSource};
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

const OVERVIEW_WIDTH: usize = 60;
const CAST_SHOWN: usize = 8;
const RELATED_SHOWN: usize = 5;

pub fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn header_cell(title: &str) -> Cell {
    Cell::new(title)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)
}

pub fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.chars().count()).bright_cyan()));
}

/// Comma-separated genre names; unknown ids are shown as numbers
pub fn genre_names(ids: &[GenreId]) -> String {
    ids.iter()
        .map(|id| genre_name(*id).map(str::to_string).unwrap_or_else(|| id.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn format_runtime(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Pagination bar such as `1 … 4 [5] 6 … 10`
pub fn format_page_window(current: u32, total: u32) -> String {
    page_window(current, total, 1)
        .into_iter()
        .map(|slot| match slot {
            PageSlot::Page(p) if p == current => format!("[{}]", p),
            PageSlot::Page(p) => p.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn movie_table(movies: &[Movie]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Year"),
        header_cell("Rating"),
        header_cell("Genres"),
        header_cell("Overview"),
    ]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(movie.year().map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(genre_names(&movie.genre_ids)),
            Cell::new(truncate(&movie.overview, OVERVIEW_WIDTH)),
        ]);
    }
    table
}

/// A listing page: JSON as-is, or a table with a pagination footer
pub fn print_movie_page(output: &Output, heading: &str, page: &MoviePage) {
    if output.is_quiet() && output.is_human() {
        return;
    }
    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => output.data(page),
        OutputFormat::Human => {
            print_section_header(heading, output);
            if page.results.is_empty() {
                output.info("No movies found");
                return;
            }
            output.println(movie_table(&page.results).to_string());
            if page.total_pages > 1 {
                output.println(format!(
                    "Page {}  ({} results)",
                    format_page_window(page.page, page.total_pages),
                    page.total_results
                ));
                if let Some(next) = page.next_page() {
                    output.println(format!("{}", format!("More: --page {}", next).bright_black()));
                }
            }
        }
    }
}

pub fn print_details(
    output: &Output,
    details: &MovieDetails,
    credits: Option<&Credits>,
    stream: Option<&StreamSource>,
    related: &[Movie],
    in_watchlist: bool,
) {
    if !output.is_human() {
        output.data(&json!({
            "details": details,
            "credits": credits,
            "stream": stream,
            "related": related,
            "inWatchlist": in_watchlist,
        }));
        return;
    }

    let title = match details.year() {
        Some(year) => format!("{} ({})", details.title, year),
        None => details.title.clone(),
    };
    print_section_header(&title, output);
    if let Some(tagline) = &details.tagline {
        output.println(format!("{}", tagline.italic()));
    }

    let mut table = styled_table();
    table.add_row(vec![Cell::new("ID"), Cell::new(details.id)]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{:.1} ({} votes)", details.vote_average, details.vote_count)),
    ]);
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    table.add_row(vec![Cell::new("Genres"), Cell::new(genres.join(", "))]);
    if let Some(runtime) = details.runtime {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(format_runtime(runtime))]);
    }
    if let Some(credits) = credits {
        let directors: Vec<&str> = credits.directors().map(|d| d.name.as_str()).collect();
        if !directors.is_empty() {
            table.add_row(vec![Cell::new("Director"), Cell::new(directors.join(", "))]);
        }
    }
    if let Some(homepage) = &details.homepage {
        table.add_row(vec![Cell::new("Homepage"), Cell::new(homepage)]);
    }
    if let Some(stream) = stream {
        let label = match stream {
            StreamSource::Youtube { .. } => "Trailer",
            StreamSource::Stream { .. } => "Watch",
        };
        table.add_row(vec![Cell::new(label), Cell::new(stream.url())]);
    }
    table.add_row(vec![
        Cell::new("Watchlist"),
        Cell::new(if in_watchlist { "✓".green().to_string() } else { "✗".red().to_string() }),
    ]);
    output.println(table.to_string());

    if !details.overview.is_empty() {
        output.println(&details.overview);
    }

    if let Some(credits) = credits {
        if !credits.cast.is_empty() {
            let mut cast = styled_table();
            cast.set_header(vec![header_cell("Cast"), header_cell("Character")]);
            for member in credits.cast.iter().take(CAST_SHOWN) {
                cast.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
            }
            output.println(cast.to_string());
        }
    }

    if !related.is_empty() {
        let shown = &related[..related.len().min(RELATED_SHOWN)];
        print_section_header("You Might Also Like", output);
        output.println(movie_table(shown).to_string());
    }
}
