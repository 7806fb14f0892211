use crate::models::Listing;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Duplicate listing id: {0}")]
    DuplicateId(String),
}

/// The working set of listings, with ids unique within the set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new(listings: Vec<Listing>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !seen.insert(listing.id.as_str()) {
                return Err(StoreError::DuplicateId(listing.id.clone()));
            }
        }
        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn featured(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter().filter(|l| l.featured)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
