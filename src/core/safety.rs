//! Nearest-incident safety scoring.
//!
//! A listing's score is the planar distance, in degrees, to its closest
//! incident report. Higher is safer. The scan is brute force over
//! candidates × incidents, which stays small once incidents have been
//! narrowed to the candidates' region.

use crate::core::reduce::{first_max_by_key, first_min_by_key};
use crate::domain::model::{IncidentReport, Listing, SafestListing, ScoredListing};
use crate::utils::error::{Result, ScoutError};

fn distance(listing: &Listing, incident: &IncidentReport) -> f64 {
    (incident.longitude - listing.longitude).hypot(incident.latitude - listing.latitude)
}

/// Distance to the closest incident, or `None` when there are no incidents.
pub fn nearest_incident_distance(listing: &Listing, incidents: &[IncidentReport]) -> Option<f64> {
    first_min_by_key(
        incidents.iter().map(|incident| distance(listing, incident)),
        |d| *d,
    )
}

/// Scores every candidate in input order.
pub fn score_candidates(
    candidates: &[Listing],
    incidents: &[IncidentReport],
) -> Result<Vec<ScoredListing>> {
    if candidates.is_empty() {
        return Err(ScoutError::EmptyCandidateSet);
    }

    candidates
        .iter()
        .map(|listing| {
            let nearest = nearest_incident_distance(listing, incidents)
                .ok_or(ScoutError::InsufficientData)?;
            Ok(ScoredListing {
                listing: listing.clone(),
                nearest_incident_distance: nearest,
            })
        })
        .collect()
}

/// The scored listing farthest from its nearest incident; the earliest one wins a tie.
pub fn safest_of(scored: &[ScoredListing]) -> Result<SafestListing> {
    let safest = first_max_by_key(scored.iter(), |s| s.nearest_incident_distance)
        .ok_or(ScoutError::EmptyCandidateSet)?;

    Ok(SafestListing {
        url: safest.listing.url.clone(),
        latitude: safest.listing.latitude,
        longitude: safest.listing.longitude,
        nearest_incident_distance: safest.nearest_incident_distance,
    })
}

pub fn safest_listing(candidates: &[Listing], incidents: &[IncidentReport]) -> Result<SafestListing> {
    let scored = score_candidates(candidates, incidents)?;
    safest_of(&scored)
}
