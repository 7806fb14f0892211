//! Shared HTTP plumbing for the hosted backend (REST tables and auth API).

use crate::config::BackendConfig;
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use std::time::Duration;

/// Thin wrapper around a reqwest client that knows the project URL and anon key
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: Url,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("estate-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.url)
            .with_context(|| format!("Invalid backend URL: {}", config.url))?;

        Ok(Self {
            client,
            base_url,
            anon_key: config.anon_key.clone(),
        })
    }

    /// Resolve a path such as `auth/v1/signup` against the project URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    /// Start a request carrying the project key; `bearer` overrides the anon token
    pub fn request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = SupabaseClient::new(&config("https://demo.supabase.co/")).unwrap();
        let url = client.endpoint("/auth/v1/token").unwrap();
        assert_eq!(url.as_str(), "https://demo.supabase.co/auth/v1/token");
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(SupabaseClient::new(&config("not a url")).is_err());
    }
}
