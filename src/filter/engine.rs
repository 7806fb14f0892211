use crate::filter::criteria::FilterCriteria;
use crate::models::Listing;

/// Does a single listing pass the free-text query and every active predicate?
pub fn matches(listing: &Listing, query: &str, criteria: &FilterCriteria) -> bool {
    matches_query(listing, &query.to_lowercase()) && matches_criteria(listing, criteria)
}

/// Filter listings, keeping input order
pub fn apply(listings: &[Listing], query: &str, criteria: &FilterCriteria) -> Vec<Listing> {
    let query = query.to_lowercase();
    listings
        .iter()
        .filter(|listing| matches_query(listing, &query) && matches_criteria(listing, criteria))
        .cloned()
        .collect()
}

fn matches_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    (criteria.categories.is_empty() || criteria.categories.contains(&listing.category))
        && (!criteria.price.is_active() || criteria.price.contains(listing.price))
        && criteria.bedrooms.map_or(true, |b| b.matches(listing.bedrooms))
        && criteria.bathrooms.map_or(true, |b| b.matches(listing.bathrooms))
        && criteria
            .area
            .as_deref()
            .map_or(true, |area| listing.location.contains(area))
        && (!criteria.size.is_active() || criteria.size.contains(listing.size))
}

/// `query` must already be lowercase
fn matches_query(listing: &Listing, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    listing.title.to_lowercase().contains(query)
        || listing.location.to_lowercase().contains(query)
        || listing.category.label().contains(query)
        || listing.description.to_lowercase().contains(query)
}
