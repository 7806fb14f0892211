use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Bedroom options in the order the filter panel offers them
pub const BEDROOM_OPTIONS: [&str; 6] = ["Studio", "1", "2", "3", "4", "5+"];
/// Bathroom options; there is no studio bathroom
pub const BATHROOM_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5+"];

/// Bedroom selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BedroomFilter {
    Studio,
    Exactly(u32),
    FivePlus,
}

impl BedroomFilter {
    pub fn matches(&self, bedrooms: u32) -> bool {
        match self {
            BedroomFilter::Studio => bedrooms == 0,
            BedroomFilter::Exactly(n) => bedrooms == *n,
            BedroomFilter::FivePlus => bedrooms >= 5,
        }
    }
}

impl FromStr for BedroomFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Studio" | "studio" => Ok(BedroomFilter::Studio),
            "5+" => Ok(BedroomFilter::FivePlus),
            other => match other.parse::<u32>() {
                Ok(n @ 1..=4) => Ok(BedroomFilter::Exactly(n)),
                _ => anyhow::bail!("Unknown bedroom option: {}", other),
            },
        }
    }
}

impl fmt::Display for BedroomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedroomFilter::Studio => f.write_str("Studio"),
            BedroomFilter::Exactly(n) => write!(f, "{}", n),
            BedroomFilter::FivePlus => f.write_str("5+"),
        }
    }
}

/// Bathroom selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BathroomFilter {
    Exactly(u32),
    FivePlus,
}

impl BathroomFilter {
    pub fn matches(&self, bathrooms: u32) -> bool {
        match self {
            BathroomFilter::Exactly(n) => bathrooms == *n,
            BathroomFilter::FivePlus => bathrooms >= 5,
        }
    }
}

impl FromStr for BathroomFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5+" => Ok(BathroomFilter::FivePlus),
            other => match other.parse::<u32>() {
                Ok(n @ 1..=4) => Ok(BathroomFilter::Exactly(n)),
                _ => anyhow::bail!("Unknown bathroom option: {}", other),
            },
        }
    }
}

impl fmt::Display for BathroomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BathroomFilter::Exactly(n) => write!(f, "{}", n),
            BathroomFilter::FivePlus => f.write_str("5+"),
        }
    }
}

/// Inclusive numeric range; a missing side is unbounded
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl Bounds {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min as f64)
            && self.max.map_or(true, |max| value <= max as f64)
    }
}

/// Read a bound from a text field.
///
/// Leading digits are taken the way a browser number field reports them, so
/// `"2500 sqft"` reads as 2500. Empty, non-numeric, negative, overflowing and
/// zero inputs all leave the bound unset.
pub fn parse_bound(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..end].parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Structured filter constraints staged by the filter panel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Empty means every category
    pub categories: BTreeSet<Category>,
    /// Price in AED
    pub price: Bounds,
    pub bedrooms: Option<BedroomFilter>,
    pub bathrooms: Option<BathroomFilter>,
    /// Matched as a substring of the listing location
    pub area: Option<String>,
    /// Size in square feet
    pub size: Bounds,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a category box, or uncheck it if already checked
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn set_min_price(&mut self, input: &str) {
        self.price.min = parse_bound(input);
    }

    pub fn set_max_price(&mut self, input: &str) {
        self.price.max = parse_bound(input);
    }

    pub fn set_min_size(&mut self, input: &str) {
        self.size.min = parse_bound(input);
    }

    pub fn set_max_size(&mut self, input: &str) {
        self.size.max = parse_bound(input);
    }

    /// Select a bedroom option; selecting the active option clears it.
    /// Unknown labels clear the selector.
    pub fn select_bedrooms(&mut self, option: &str) {
        let picked = option.parse::<BedroomFilter>().ok();
        self.bedrooms = if picked == self.bedrooms { None } else { picked };
    }

    /// Select a bathroom option; selecting the active option clears it.
    pub fn select_bathrooms(&mut self, option: &str) {
        let picked = option.parse::<BathroomFilter>().ok();
        self.bathrooms = if picked == self.bathrooms { None } else { picked };
    }

    /// Choose an area; an empty choice means "All Areas"
    pub fn select_area(&mut self, area: &str) {
        let area = area.trim();
        self.area = if area.is_empty() {
            None
        } else {
            Some(area.to_string())
        };
    }

    /// Number of structured predicates currently constraining results
    pub fn active_count(&self) -> usize {
        [
            !self.categories.is_empty(),
            self.price.is_active(),
            self.bedrooms.is_some(),
            self.bathrooms.is_some(),
            self.area.is_some(),
            self.size.is_active(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}
