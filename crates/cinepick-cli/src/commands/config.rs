use super::display::{header_cell, print_section_header, styled_table};
use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use cinepick_config::{Config, CredentialStore, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Tmdb { api_key, access_token, base_url, language, timeout_secs } => {
            configure_tmdb(api_key, access_token, base_url, language, timeout_secs, output)
        }
        ConfigCommands::Recommendations { history_limit, top_genres, max_results, default_rating } => {
            configure_recommendations(history_limit, top_genres, max_results, default_rating, output)
        }
    }
}

fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(cred_store)
}

/// Validate, then write the config file
fn save_config(config: &Config, path_manager: &PathManager) -> Result<()> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = load_config(&path_manager)?;
    let cred_store = load_credentials(&path_manager)?;

    let secret = |value: Option<&String>| match value {
        Some(v) if full => v.clone(),
        Some(v) => mask_string(v),
        None => "<not set>".to_string(),
    };
    let api_key = secret(cred_store.get_tmdb_api_key());
    let access_token = secret(cred_store.get_tmdb_access_token());

    if !output.is_human() {
        output.data(&json!({
            "config_file": config_file.display().to_string(),
            "config": config,
            "credentials": {
                "tmdb_api_key": api_key,
                "tmdb_access_token": access_token,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    print_section_header("Configuration", output);
    if !config_file.exists() {
        output.warn(format!("No configuration file at {}; showing defaults", config_file.display()));
    }

    let mut info_table = styled_table();
    info_table.set_header(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    println!("{}", info_table);

    let mut tmdb_table = styled_table();
    tmdb_table.set_header(vec![header_cell("TMDB")]);
    tmdb_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.tmdb.base_url)]);
    tmdb_table.add_row(vec![Cell::new("Language"), Cell::new(&config.tmdb.language)]);
    tmdb_table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{} seconds", config.tmdb.timeout_secs))]);
    tmdb_table.add_row(vec![Cell::new("API Key"), Cell::new(api_key)]);
    tmdb_table.add_row(vec![Cell::new("Access Token"), Cell::new(access_token)]);
    println!("{}", tmdb_table);

    let recs = &config.recommendations;
    let mut recs_table = styled_table();
    recs_table.set_header(vec![header_cell("Recommendations")]);
    recs_table.add_row(vec![Cell::new("History Limit"), Cell::new(recs.history_limit)]);
    recs_table.add_row(vec![Cell::new("Top Genres"), Cell::new(recs.top_genres)]);
    recs_table.add_row(vec![Cell::new("Max Results"), Cell::new(recs.max_results)]);
    recs_table.add_row(vec![Cell::new("Default Rating"), Cell::new(format!("{:.1}", recs.default_rating))]);
    println!("{}", recs_table);

    let mut display_table = styled_table();
    display_table.set_header(vec![header_cell("Display")]);
    display_table.add_row(vec![
        Cell::new("Show Alerts"),
        Cell::new(if config.display.show_alerts { "✓".green().to_string() } else { "✗".red().to_string() }),
    ]);
    println!("{}", display_table);

    if std::env::var("TMDB_API_KEY").is_ok() || std::env::var("TMDB_ACCESS_TOKEN").is_ok() {
        output.info(format!("{}", "TMDB credentials from the environment take priority over stored ones".bright_black()));
    }
    Ok(())
}

fn configure_tmdb(
    api_key_arg: Option<String>,
    access_token_arg: Option<String>,
    base_url: Option<String>,
    language: Option<String>,
    timeout_secs: Option<u64>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&path_manager)?;
    let mut cred_store = load_credentials(&path_manager)?;

    let settings_given = base_url.is_some() || language.is_some() || timeout_secs.is_some();
    if let Some(url) = base_url {
        config.tmdb.base_url = url;
    }
    if let Some(lang) = language {
        config.tmdb.language = lang;
    }
    if let Some(secs) = timeout_secs {
        config.tmdb.timeout_secs = secs;
    }

    match (api_key_arg, access_token_arg) {
        (Some(key), _) => cred_store.set_tmdb_api_key(key),
        (None, Some(token)) => cred_store.set_tmdb_access_token(token),
        (None, None) if !settings_given => {
            print_section_header("TMDB Setup", output);
            output.println("Create an API key at https://www.themoviedb.org/settings/api");
            output.println("");

            let use_token = prompts::prompt_yes_no("Use a v4 read access token instead of a v3 API key?", Some(false))?;
            let label = if use_token { "TMDB read access token" } else { "TMDB API key" };
            let secret = prompts::prompt_password(label)?;
            if secret.trim().is_empty() {
                return Err(eyre!("{} is required", label));
            }
            if use_token {
                cred_store.set_tmdb_access_token(secret.trim().to_string());
            } else {
                cred_store.set_tmdb_api_key(secret.trim().to_string());
            }

            config.tmdb.language = prompts::prompt_string("Response language", Some(config.tmdb.language.as_str()))?;
        }
        (None, None) => {}
    }

    save_config(&config, &path_manager)?;
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", path_manager.credentials_file().display(), e))?;

    output.success("TMDB settings saved");
    output.println(format!("  Base URL: {}", config.tmdb.base_url));
    output.println(format!("  Language: {}", config.tmdb.language));
    Ok(())
}

fn configure_recommendations(
    history_limit: Option<usize>,
    top_genres: Option<usize>,
    max_results: Option<usize>,
    default_rating: Option<f64>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let mut config = load_config(&path_manager)?;

    if history_limit.is_none() && top_genres.is_none() && max_results.is_none() && default_rating.is_none() {
        output.warn("No setting specified. Use --history-limit, --top-genres, --max-results or --default-rating");
        return Ok(());
    }

    let recs = &mut config.recommendations;
    if let Some(limit) = history_limit {
        recs.history_limit = limit;
    }
    if let Some(count) = top_genres {
        recs.top_genres = count;
    }
    if let Some(max) = max_results {
        recs.max_results = max;
    }
    if let Some(rating) = default_rating {
        recs.default_rating = rating;
    }

    save_config(&config, &path_manager)?;
    output.success("Recommendation settings saved");
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
