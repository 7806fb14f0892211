use crate::listings::traits::ListingSource;
use crate::models::{Category, Listing};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

/// Built-in listings served when no remote table is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticListings;

impl StaticListings {
    pub fn new() -> Self {
        Self
    }

    /// The six showcase listings
    pub fn listings() -> Vec<Listing> {
        vec![
            Listing {
                id: "1".to_string(),
                title: "Luxury Penthouse in Dubai Marina".to_string(),
                category: Category::Apartment,
                price: 4_500_000.0,
                bedrooms: 3,
                bathrooms: 4,
                size: 2800.0,
                location: "Dubai Marina".to_string(),
                area: "Marina".to_string(),
                description: "Stunning penthouse with panoramic views of Dubai Marina and the Arabian Gulf. Features premium finishes, private elevator access, and expansive terraces.".to_string(),
                images: images(&[
                    "photo-1512917774080-9991f1c4c750",
                    "photo-1613490493576-7fde63acd811",
                    "photo-1560448204-e02f11c3d0e2",
                ]),
                amenities: tags(&["Swimming Pool", "Gym", "Concierge", "Valet Parking", "Private Beach", "Spa"]),
                featured: true,
                created_at: listed_on(15),
                updated_at: listed_on(15),
            },
            Listing {
                id: "2".to_string(),
                title: "Modern Villa in Emirates Hills".to_string(),
                category: Category::Villa,
                price: 12_000_000.0,
                bedrooms: 5,
                bathrooms: 6,
                size: 6500.0,
                location: "Emirates Hills".to_string(),
                area: "Emirates Hills".to_string(),
                description: "Spectacular contemporary villa with golf course views. Features smart home technology, infinity pool, and meticulously landscaped gardens.".to_string(),
                images: images(&[
                    "photo-1600596542815-ffad4c1539a9",
                    "photo-1600607687939-ce8a6c25118c",
                    "photo-1600566753376-12c8ab7fb75b",
                ]),
                amenities: tags(&["Private Pool", "Golf Course View", "Smart Home", "Maid Room", "Garden", "Garage"]),
                featured: true,
                created_at: listed_on(14),
                updated_at: listed_on(14),
            },
            Listing {
                id: "3".to_string(),
                title: "Elegant Townhouse in Jumeirah Village Circle".to_string(),
                category: Category::Townhouse,
                price: 2_800_000.0,
                bedrooms: 4,
                bathrooms: 3,
                size: 3200.0,
                location: "Jumeirah Village Circle".to_string(),
                area: "JVC".to_string(),
                description: "Beautiful townhouse in a family-friendly community. Features modern design, private garden, and close proximity to schools and parks.".to_string(),
                images: images(&[
                    "photo-1568605114967-8130f3a36994",
                    "photo-1570129477492-45c003edd2be",
                    "photo-1600047509807-ba8f99d2cdde",
                ]),
                amenities: tags(&["Private Garden", "Community Pool", "Playground", "Parking", "Storage Room"]),
                featured: false,
                created_at: listed_on(13),
                updated_at: listed_on(13),
            },
            Listing {
                id: "4".to_string(),
                title: "Contemporary Apartment in Downtown Dubai".to_string(),
                category: Category::Apartment,
                price: 3_200_000.0,
                bedrooms: 2,
                bathrooms: 3,
                size: 1800.0,
                location: "Downtown Dubai".to_string(),
                area: "Downtown".to_string(),
                description: "Stylish apartment with Burj Khalifa views. Located in the heart of Dubai with access to world-class dining, shopping, and entertainment.".to_string(),
                images: images(&[
                    "photo-1512918728675-ed5a9ecdebfd",
                    "photo-1600210492486-724fe5c67fb0",
                    "photo-1600607687644-c7171b42498b",
                ]),
                amenities: tags(&["Burj Khalifa View", "Gym", "Swimming Pool", "Concierge", "Metro Access"]),
                featured: true,
                created_at: listed_on(12),
                updated_at: listed_on(12),
            },
            Listing {
                id: "5".to_string(),
                title: "Luxury Villa in Palm Jumeirah".to_string(),
                category: Category::Villa,
                price: 15_000_000.0,
                bedrooms: 6,
                bathrooms: 7,
                size: 8000.0,
                location: "Palm Jumeirah".to_string(),
                area: "Palm".to_string(),
                description: "Exclusive beachfront villa on the iconic Palm Jumeirah. Features private beach access, infinity pool, and unobstructed sea views.".to_string(),
                images: images(&[
                    "photo-1600047508788-786a5629b57c",
                    "photo-1600566752355-35792bedcfea",
                    "photo-1600607687920-4e2a09cf159d",
                ]),
                amenities: tags(&["Private Beach", "Infinity Pool", "Cinema Room", "Wine Cellar", "Elevator", "Staff Quarters"]),
                featured: true,
                created_at: listed_on(11),
                updated_at: listed_on(11),
            },
            Listing {
                id: "6".to_string(),
                title: "Modern Townhouse in Arabian Ranches".to_string(),
                category: Category::Townhouse,
                price: 3_500_000.0,
                bedrooms: 4,
                bathrooms: 4,
                size: 3800.0,
                location: "Arabian Ranches".to_string(),
                area: "Arabian Ranches".to_string(),
                description: "Spacious family townhouse in prestigious gated community. Features landscaped garden, community amenities, and golf course proximity.".to_string(),
                images: images(&[
                    "photo-1600585154340-be6161a56a0c",
                    "photo-1600607687939-ce8a6c25118c",
                    "photo-1600566752734-eb6fc8958bdd",
                ]),
                amenities: tags(&["Golf Course Access", "Community Pool", "Tennis Courts", "Kids Play Area", "BBQ Area"]),
                featured: false,
                created_at: listed_on(10),
                updated_at: listed_on(10),
            },
        ]
    }
}

#[async_trait]
impl ListingSource for StaticListings {
    async fn list_all_listings(&self) -> Result<Vec<Listing>> {
        let listings = Self::listings();
        info!("📋 Serving {} built-in listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Static"
    }
}

fn images(photo_ids: &[&str]) -> Vec<String> {
    photo_ids
        .iter()
        .map(|id| format!("https://images.unsplash.com/{}?w=800&h=600&fit=crop", id))
        .collect()
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// 10:00 UTC on the given day of January 2024
fn listed_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_fixture_has_six_unique_listings() {
        let listings = StaticListings::new().list_all_listings().await.unwrap();
        assert_eq!(listings.len(), 6);

        let ids: HashSet<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_fixture_covers_every_category() {
        let listings = StaticListings::listings();
        for category in Category::all() {
            assert!(listings.iter().any(|l| l.category == category));
        }
        assert!(listings.iter().all(|l| l.cover_image().is_some()));
    }

    #[test]
    fn test_fixture_timestamps() {
        let listings = StaticListings::listings();
        assert_eq!(listings[0].created_at.to_rfc3339(), "2024-01-15T10:00:00+00:00");
        assert_eq!(listings[5].updated_at.to_rfc3339(), "2024-01-10T10:00:00+00:00");
    }
}
