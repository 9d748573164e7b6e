use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const TMDB_API_KEY: &str = "tmdb_api_key";
const TMDB_ACCESS_TOKEN: &str = "tmdb_access_token";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// How requests to TMDB are authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmdbAuth {
    /// v3 API key, sent as the `api_key` query parameter
    ApiKey(String),
    /// v4 read access token, sent as a bearer token
    AccessToken(String),
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get(TMDB_API_KEY)
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn get_tmdb_access_token(&self) -> Option<&String> {
        self.get(TMDB_ACCESS_TOKEN)
    }

    pub fn set_tmdb_access_token(&mut self, token: String) {
        self.set(TMDB_ACCESS_TOKEN.to_string(), token);
    }

    /// Resolve TMDB auth: environment first, then stored values.
    /// An access token wins over an API key at the same level.
    pub fn tmdb_auth(&self) -> Option<TmdbAuth> {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let Some(token) = env("TMDB_ACCESS_TOKEN") {
            return Some(TmdbAuth::AccessToken(token));
        }
        if let Some(key) = env("TMDB_API_KEY") {
            return Some(TmdbAuth::ApiKey(key));
        }
        self.stored_tmdb_auth()
    }

    fn stored_tmdb_auth(&self) -> Option<TmdbAuth> {
        self.get_tmdb_access_token()
            .filter(|t| !t.is_empty())
            .map(|t| TmdbAuth::AccessToken(t.clone()))
            .or_else(|| {
                self.get_tmdb_api_key()
                    .filter(|k| !k.is_empty())
                    .map(|k| TmdbAuth::ApiKey(k.clone()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("abc123".to_string());
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_tmdb_api_key().map(String::as_str), Some("abc123"));
        assert_eq!(loaded.get_tmdb_access_token(), None);
    }

    #[test]
    fn test_stored_auth_prefers_access_token() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        assert_eq!(store.stored_tmdb_auth(), None);

        store.set_tmdb_api_key("key".to_string());
        assert_eq!(store.stored_tmdb_auth(), Some(TmdbAuth::ApiKey("key".to_string())));

        store.set_tmdb_access_token("token".to_string());
        assert_eq!(store.stored_tmdb_auth(), Some(TmdbAuth::AccessToken("token".to_string())));

        store.remove("tmdb_access_token");
        store.set_tmdb_api_key(String::new());
        assert_eq!(store.stored_tmdb_auth(), None);
    }
}
