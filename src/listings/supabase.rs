use crate::listings::traits::ListingSource;
use crate::models::Listing;
use crate::supabase::SupabaseClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, warn};

/// Listings read from the hosted `properties` table
pub struct SupabaseListings {
    client: SupabaseClient,
    table: String,
}

impl SupabaseListings {
    pub fn new(client: SupabaseClient) -> Self {
        Self::with_table(client, "properties")
    }

    pub fn with_table(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn parse_rows(body: &str) -> Result<Vec<Listing>> {
        serde_json::from_str(body).context("Failed to decode listing rows")
    }
}

#[async_trait]
impl ListingSource for SupabaseListings {
    async fn list_all_listings(&self) -> Result<Vec<Listing>> {
        let mut url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .request(Method::GET, url, None)
            .send()
            .await
            .context("Failed to fetch listings")?;

        if !response.status().is_success() {
            warn!("Listing table returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of listing rows", body.len());

        let listings = Self::parse_rows(&body)?;
        info!("✅ Loaded {} listings from {}", listings.len(), self.table);
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::StaticListings;

    #[test]
    fn test_parse_rows_matches_table_shape() {
        let rows = serde_json::to_string(&StaticListings::listings()).unwrap();
        let parsed = SupabaseListings::parse_rows(&rows).unwrap();
        assert_eq!(parsed, StaticListings::listings());
    }

    #[test]
    fn test_parse_rows_rejects_unknown_category() {
        let body = r#"[{"id":"1","title":"x","type":"castle","price":1,"bedrooms":1,
            "bathrooms":1,"size":1,"location":"x","area":"x","description":"x",
            "created_at":"2024-01-15T10:00:00Z","updated_at":"2024-01-15T10:00:00Z"}]"#;
        assert!(SupabaseListings::parse_rows(body).is_err());
    }

    #[test]
    fn test_parse_rows_accepts_decimal_price_and_size() {
        let body = r#"[{"id":"7","title":"Garden loft","type":"townhouse","price":2450000.0,
            "bedrooms":2,"bathrooms":2,"size":2800.5,"location":"Arabian Ranches",
            "area":"Ranches","description":"Loft with a private garden",
            "created_at":"2024-01-15T10:00:00Z","updated_at":"2024-01-15T10:00:00Z"}]"#;
        let parsed = SupabaseListings::parse_rows(body).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].price, 2_450_000.0);
        assert_eq!(parsed[0].size, 2800.5);
    }
}
