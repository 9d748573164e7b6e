pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ConfigError, DisplayConfig, RecommendationConfig, TmdbConfig, DEFAULT_TMDB_BASE_URL};
pub use credentials::{CredentialStore, TmdbAuth};
pub use paths::{PathManager, container_base_path};
