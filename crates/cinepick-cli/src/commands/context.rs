use cinepick_config::{Config, CredentialStore, PathManager};
use cinepick_core::{FileStore, LocalWatchHistory, Recommender, RecommenderOptions, Watchlist};
use cinepick_sources::{SourceError, TmdbClient};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

/// Paths, validated config and local storage shared by the commands
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    store: Arc<FileStore>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();

        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let store_dir = paths.store_dir();
        let store = FileStore::new(&store_dir)
            .map_err(|e| eyre!("Failed to open local store at {}: {}", store_dir.display(), e))?;
        debug!(store = %store_dir.display(), "Local store ready");

        Ok(Self {
            paths,
            config,
            store: Arc::new(store),
        })
    }

    /// TMDB client using environment or stored credentials
    pub fn catalog(&self) -> Result<Arc<TmdbClient>> {
        let credentials_file = self.paths.credentials_file();
        let mut cred_store = CredentialStore::new(credentials_file.clone());
        cred_store
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let auth = cred_store.tmdb_auth().ok_or(SourceError::NotConfigured)?;
        Ok(Arc::new(TmdbClient::from_config(&self.config.tmdb, auth)))
    }

    pub fn history(&self) -> Arc<LocalWatchHistory> {
        Arc::new(LocalWatchHistory::new(self.store.clone()))
    }

    pub fn watchlist(&self) -> Watchlist {
        Watchlist::new(self.store.clone())
    }

    pub fn recommender(&self) -> Result<Recommender> {
        Ok(Recommender::with_options(
            self.catalog()?,
            self.history(),
            RecommenderOptions::from(&self.config.recommendations),
        ))
    }

    pub fn show_alerts(&self) -> bool {
        self.config.display.show_alerts
    }
}
