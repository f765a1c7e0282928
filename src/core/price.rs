use crate::core::reduce::first_min_by_key;
use crate::domain::model::{CheapestListing, Listing};
use crate::utils::error::{Result, ScoutError};

/// Lowest-priced candidate; the earliest one wins a tie.
pub fn cheapest_listing(candidates: &[Listing]) -> Result<CheapestListing> {
    let cheapest = first_min_by_key(candidates.iter(), |listing| listing.price)
        .ok_or(ScoutError::EmptyCandidateSet)?;

    Ok(CheapestListing {
        url: cheapest.url.clone(),
        latitude: cheapest.latitude,
        longitude: cheapest.longitude,
        price: cheapest.price,
    })
}
