use cinepick_models::{DEFAULT_RATING, WATCH_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Watch history entries kept on disk
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Genres fanned out to the catalog per recommendation run
    #[serde(default = "default_top_genres")]
    pub top_genres: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Rating recorded by `watch` when none is given
    #[serde(default = "default_rating")]
    pub default_rating: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_alerts: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("default_rating must be between 0 and 10, got {0}")]
    RatingOutOfRange(f64),
    #[error("tmdb.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

fn default_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_history_limit() -> usize {
    WATCH_HISTORY_LIMIT
}

fn default_top_genres() -> usize {
    3
}

fn default_max_results() -> usize {
    20
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn default_true() -> bool {
    true
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            top_genres: default_top_genres(),
            max_results: default_max_results(),
            default_rating: default_rating(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_alerts: default_true() }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if present, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let recs = &self.recommendations;
        if recs.history_limit == 0 {
            return Err(ConfigError::ZeroLimit("recommendations.history_limit"));
        }
        if recs.top_genres == 0 {
            return Err(ConfigError::ZeroLimit("recommendations.top_genres"));
        }
        if recs.max_results == 0 {
            return Err(ConfigError::ZeroLimit("recommendations.max_results"));
        }
        if !(0.0..=10.0).contains(&recs.default_rating) {
            return Err(ConfigError::RatingOutOfRange(recs.default_rating));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(ConfigError::ZeroLimit("tmdb.timeout_secs"));
        }
        if !self.tmdb.base_url.starts_with("http://") && !self.tmdb.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.tmdb.base_url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.language = "de-DE".to_string();
        config.recommendations.top_genres = 5;
        config.display.show_alerts = false;

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.tmdb.language, "de-DE");
        assert_eq!(loaded.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(loaded.recommendations.top_genres, 5);
        assert_eq!(loaded.recommendations.history_limit, 20);
        assert!(!loaded.display.show_alerts);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[recommendations]\nmax_results = 10\n").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.recommendations.max_results, 10);
        assert_eq!(config.recommendations.default_rating, 7.0);
        assert_eq!(config.tmdb.timeout_secs, 10);
        assert!(config.display.show_alerts);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.recommendations.top_genres, 3);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.recommendations.history_limit = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit("recommendations.history_limit"))
        );

        config.recommendations.history_limit = 20;
        config.recommendations.default_rating = 11.0;
        assert_eq!(config.validate(), Err(ConfigError::RatingOutOfRange(11.0)));

        config.recommendations.default_rating = 7.0;
        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));
    }
}
