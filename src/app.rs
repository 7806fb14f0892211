//! Application context - wires providers, view and auth together
//!
//! Everything the page needs is passed in explicitly; nothing lives in
//! globals. `App::shutdown` tears down the session subscription.

use crate::auth::{AuthFailure, AuthGateway, IdentityProvider, MemoryIdentity, SupabaseAuth};
use crate::config::AppConfig;
use crate::listings::{ListingSource, ListingStore, StaticListings, SupabaseListings};
use crate::supabase::SupabaseClient;
use crate::view::ViewController;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AppContext {
    pub config: AppConfig,
    listings: Arc<dyn ListingSource>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        listings: Arc<dyn ListingSource>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config,
            listings,
            identity,
        }
    }

    /// Hosted backend when configured, otherwise built-in listings and
    /// in-memory accounts
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let listings: Arc<dyn ListingSource>;
        let identity: Arc<dyn IdentityProvider>;
        match &config.backend {
            Some(backend) => {
                let client = SupabaseClient::new(backend)?;
                info!("Using hosted backend at {}", backend.url);
                listings = Arc::new(SupabaseListings::new(client.clone()));
                identity = Arc::new(SupabaseAuth::new(client));
            }
            None => {
                info!("No backend configured, running offline");
                listings = Arc::new(StaticListings::new());
                identity = Arc::new(MemoryIdentity::new());
            }
        }

        Ok(Self::new(config, listings, identity))
    }

    /// Load listings, look up any existing session and start listening for
    /// session changes
    pub async fn bootstrap(self) -> Result<App> {
        let listings = match self.listings.list_all_listings().await {
            Ok(listings) => listings,
            Err(err) => {
                warn!(
                    "Failed to load listings from {}: {:#}",
                    self.listings.source_name(),
                    err
                );
                info!("Using built-in listings instead...");
                StaticListings::listings()
            }
        };
        let store = ListingStore::new(listings).context("Listing source returned bad data")?;

        let mut view = ViewController::with_scroll_threshold(store, self.config.scroll_threshold);
        let mut auth = AuthGateway::new(self.identity, self.config.redirect_to.clone());
        auth.restore(&mut view).await;

        info!(
            "🏠 Ready with {} listings ({} auth)",
            view.store().len(),
            auth.provider_name()
        );

        Ok(App {
            config: self.config,
            listings: self.listings,
            view,
            auth,
        })
    }
}

/// A bootstrapped page: the view controller plus its auth gateway
pub struct App {
    pub config: AppConfig,
    listings: Arc<dyn ListingSource>,
    pub view: ViewController,
    pub auth: AuthGateway,
}

impl App {
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthFailure> {
        self.auth.login(&mut self.view, email, password).await
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(), AuthFailure> {
        self.auth
            .register(&mut self.view, email, password, display_name)
            .await
    }

    /// The "Continue with ..." button
    pub async fn continue_with_oauth(&mut self) -> Result<(), AuthFailure> {
        let provider = self.config.oauth_provider.clone();
        self.auth.login_with_oauth(&mut self.view, &provider).await
    }

    pub async fn logout(&mut self) -> Result<(), AuthFailure> {
        self.auth.logout(&mut self.view).await
    }

    /// Re-fetch listings from the source; the current set stays on failure
    pub async fn reload_listings(&mut self) -> Result<()> {
        let listings = self
            .listings
            .list_all_listings()
            .await
            .with_context(|| format!("Failed to reload from {}", self.listings.source_name()))?;
        self.view.set_listings(ListingStore::new(listings)?);
        Ok(())
    }

    pub fn shutdown(mut self) {
        self.auth.shutdown();
        info!("Shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl ListingSource for FailingSource {
        async fn list_all_listings(&self) -> Result<Vec<Listing>> {
            anyhow::bail!("connection refused")
        }

        fn source_name(&self) -> &'static str {
            "Failing"
        }
    }

    struct DuplicateSource;

    #[async_trait]
    impl ListingSource for DuplicateSource {
        async fn list_all_listings(&self) -> Result<Vec<Listing>> {
            let mut listings = StaticListings::listings();
            listings.push(listings[0].clone());
            Ok(listings)
        }

        fn source_name(&self) -> &'static str {
            "Duplicate"
        }
    }

    #[tokio::test]
    async fn test_offline_bootstrap() {
        let app = AppContext::from_config(AppConfig::default())
            .unwrap()
            .bootstrap()
            .await
            .unwrap();
        assert_eq!(app.view.results().len(), 6);
        assert!(app.view.session().is_none());
        assert!(app.auth.is_listening());
        app.shutdown();
    }

    #[tokio::test]
    async fn test_failed_source_falls_back_to_builtin_listings() {
        let context = AppContext::new(
            AppConfig::default(),
            Arc::new(FailingSource),
            Arc::new(MemoryIdentity::new()),
        );
        let mut app = context.bootstrap().await.unwrap();
        assert_eq!(app.view.store().len(), 6);
        assert!(app.reload_listings().await.is_err());
        assert_eq!(app.view.store().len(), 6);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let context = AppContext::new(
            AppConfig::default(),
            Arc::new(DuplicateSource),
            Arc::new(MemoryIdentity::new()),
        );
        assert!(context.bootstrap().await.is_err());
    }

    #[tokio::test]
    async fn test_app_auth_round_trip() {
        let identity = Arc::new(MemoryIdentity::new());
        let context = AppContext::new(
            AppConfig::default(),
            Arc::new(StaticListings::new()),
            identity.clone(),
        );
        let mut app = context.bootstrap().await.unwrap();

        app.register("noor@example.com", "hunter22", "Noor").await.unwrap();
        assert!(app.view.state().is_authenticated());

        app.logout().await.unwrap();
        assert!(!app.view.state().is_authenticated());

        app.continue_with_oauth().await.unwrap();
        assert_eq!(identity.pending_oauth().as_deref(), Some("google"));
    }
}
