use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Where the page's listings come from
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn list_all_listings(&self) -> Result<Vec<Listing>>;

    /// Shown in log lines, e.g. "Supabase"
    fn source_name(&self) -> &'static str;
}
