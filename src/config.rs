use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Connection details for the hosted backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Absent means run offline on the built-in listings and in-memory accounts
    pub backend: Option<BackendConfig>,
    /// Where OAuth providers send the browser back to
    pub redirect_to: String,
    /// OAuth provider behind the "Continue with ..." button
    pub oauth_provider: String,
    pub scroll_threshold: u32,
    /// tracing filter directive used when RUST_LOG is unset
    pub log_filter: String,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: None,
            redirect_to: "http://localhost:3000".to_string(),
            oauth_provider: "google".to_string(),
            scroll_threshold: crate::view::DEFAULT_SCROLL_THRESHOLD,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Defaults, then the optional file, then environment overrides
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<AppConfig> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => AppConfig::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `ESTATE_SCOUT_REDIRECT`
    /// and `ESTATE_SCOUT_LOG` from the given lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let url = lookup("SUPABASE_URL").filter(|v| !v.is_empty());
        let key = lookup("SUPABASE_ANON_KEY").filter(|v| !v.is_empty());

        if let Some(backend) = self.backend.as_mut() {
            if let Some(url) = url {
                backend.url = url;
            }
            if let Some(key) = key {
                backend.anon_key = key;
            }
        } else if let (Some(url), Some(anon_key)) = (url, key) {
            self.backend = Some(BackendConfig {
                url,
                anon_key,
                timeout_secs: default_timeout_secs(),
            });
        }

        if let Some(redirect) = lookup("ESTATE_SCOUT_REDIRECT") {
            self.redirect_to = redirect;
        }
        if let Some(filter) = lookup("ESTATE_SCOUT_LOG") {
            self.log_filter = filter;
        }
    }
}
