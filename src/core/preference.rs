use crate::domain::model::{Listing, UserQuery};

/// Listings in the query's neighborhood that sleep exactly `capacity` guests at or below `max_price`.
///
/// An empty result is a normal outcome; callers must check it before scoring.
pub fn select_candidates(listings: &[Listing], query: &UserQuery) -> Vec<Listing> {
    let candidates: Vec<Listing> = listings
        .iter()
        .filter(|listing| {
            listing.neighborhood == query.neighborhood
                && listing.accommodates == query.capacity
                && listing.price <= query.max_price
        })
        .cloned()
        .collect();

    tracing::debug!(
        "🔎 {} of {} listings match {} / {} guests / ≤ ${:.2}",
        candidates.len(),
        listings.len(),
        query.neighborhood,
        query.capacity,
        query.max_price
    );

    candidates
}
