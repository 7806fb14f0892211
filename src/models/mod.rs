pub mod format;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regions offered by the area selector, in display order.
pub const DUBAI_AREAS: [&str; 12] = [
    "Dubai Marina",
    "Downtown Dubai",
    "Palm Jumeirah",
    "Emirates Hills",
    "Jumeirah Beach Residence",
    "Arabian Ranches",
    "Jumeirah Village Circle",
    "Business Bay",
    "Dubai Hills Estate",
    "DIFC",
    "Jumeirah Lakes Towers",
    "The Greens",
];

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Apartment,
    Townhouse,
    Villa,
}

impl Category {
    pub fn all() -> [Category; 3] {
        [Category::Apartment, Category::Townhouse, Category::Villa]
    }

    /// Lowercase label, as stored in the backing table and matched by text search
    pub fn label(&self) -> &'static str {
        match self {
            Category::Apartment => "apartment",
            Category::Townhouse => "townhouse",
            Category::Villa => "villa",
        }
    }

    /// Plural heading used by the filter panel checkboxes
    pub fn plural(&self) -> &'static str {
        match self {
            Category::Apartment => "Apartments",
            Category::Townhouse => "Townhouses",
            Category::Villa => "Villas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" | "apartments" => Ok(Category::Apartment),
            "townhouse" | "townhouses" => Ok(Category::Townhouse),
            "villa" | "villas" => Ok(Category::Villa),
            other => anyhow::bail!("Unknown property category: {}", other),
        }
    }
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    /// Asking price in AED
    pub price: f64,
    /// 0 means studio
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Square feet
    pub size: f64,
    pub location: String,
    pub area: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// First image, used as the card cover
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_studio(&self) -> bool {
        self.bedrooms == 0
    }
}

/// Authenticated user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl User {
    /// Name shown in the header, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Proof of authentication issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_singular_and_plural() {
        assert_eq!("Villas".parse::<Category>().unwrap(), Category::Villa);
        assert_eq!(" apartment ".parse::<Category>().unwrap(), Category::Apartment);
        assert!("penthouse".parse::<Category>().is_err());
    }

    #[test]
    fn test_listing_deserializes_type_key() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "id": "9",
            "title": "Sea view flat",
            "type": "apartment",
            "price": 1_200_000,
            "bedrooms": 0,
            "bathrooms": 1,
            "size": 540,
            "location": "Dubai Marina",
            "area": "Marina",
            "description": "Compact studio",
            "created_at": "2024-01-15T10:00:00Z",
            "updated_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(listing.category, Category::Apartment);
        assert!(listing.is_studio());
        assert!(listing.images.is_empty());
        assert_eq!(listing.cover_image(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = User {
            id: "u1".to_string(),
            email: "sara@example.com".to_string(),
            name: None,
        };
        assert_eq!(user.display_name(), "sara@example.com");

        user.name = Some("Sara".to_string());
        assert_eq!(user.display_name(), "Sara");
    }
}
