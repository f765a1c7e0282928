use crate::domain::model::{BoundingRegion, IncidentReport, Listing};
use crate::utils::error::{Result, ScoutError};

/// Margin added on every side of the listings' bounding box, in degrees.
pub const REGION_PADDING_DEGREES: f64 = 0.005;

impl BoundingRegion {
    /// Tightest rectangle covering every listing. Each axis tracks its min and max independently.
    pub fn covering(listings: &[Listing]) -> Result<Self> {
        let (first, rest) = listings
            .split_first()
            .ok_or(ScoutError::EmptyCandidateSet)?;

        let seed = BoundingRegion {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_long: first.longitude,
            max_long: first.longitude,
        };

        Ok(rest.iter().fold(seed, |region, listing| BoundingRegion {
            min_lat: region.min_lat.min(listing.latitude),
            max_lat: region.max_lat.max(listing.latitude),
            min_long: region.min_long.min(listing.longitude),
            max_long: region.max_long.max(listing.longitude),
        }))
    }

    pub fn padded(&self, padding: f64) -> Self {
        BoundingRegion {
            min_lat: self.min_lat - padding,
            max_lat: self.max_lat + padding,
            min_long: self.min_long - padding,
            max_long: self.max_long + padding,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_long
            && longitude <= self.max_long
    }

    pub fn contains_padded(&self, latitude: f64, longitude: f64, padding: f64) -> bool {
        self.padded(padding).contains(latitude, longitude)
    }
}

/// Incidents inside `region` grown by `padding`, in input order.
pub fn filter_incidents(
    incidents: &[IncidentReport],
    region: &BoundingRegion,
    padding: f64,
) -> Vec<IncidentReport> {
    let search_area = region.padded(padding);

    let nearby: Vec<IncidentReport> = incidents
        .iter()
        .filter(|incident| search_area.contains(incident.latitude, incident.longitude))
        .cloned()
        .collect();

    tracing::debug!(
        "Region filter kept {} of {} incidents within lat [{:.4}, {:.4}] long [{:.4}, {:.4}]",
        nearby.len(),
        incidents.len(),
        search_area.min_lat,
        search_area.max_lat,
        search_area.min_long,
        search_area.max_long
    );

    nearby
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_at(latitude: f64, longitude: f64) -> Listing {
        Listing {
            id: None,
            url: format!("https://example.com/rooms/{}_{}", latitude, longitude),
            neighborhood: "Roxbury".to_string(),
            latitude,
            longitude,
            price: 100.0,
            accommodates: 2,
        }
    }

    fn incident_at(latitude: f64, longitude: f64) -> IncidentReport {
        IncidentReport {
            latitude,
            longitude,
            category: "LARCENY".to_string(),
        }
    }

    #[test]
    fn test_covering_empty_set_is_an_error() {
        assert!(matches!(
            BoundingRegion::covering(&[]),
            Err(ScoutError::EmptyCandidateSet)
        ));
    }

    #[test]
    fn test_covering_contains_every_listing() {
        let listings = vec![
            listing_at(42.33, -71.09),
            listing_at(42.31, -71.02),
            listing_at(42.35, -71.05),
            listing_at(42.29, -71.11),
        ];

        let region = BoundingRegion::covering(&listings).unwrap();

        assert_eq!(region.min_lat, 42.29);
        assert_eq!(region.max_lat, 42.35);
        assert_eq!(region.min_long, -71.11);
        assert_eq!(region.max_long, -71.02);
        for listing in &listings {
            assert!(region.contains(listing.latitude, listing.longitude));
        }
    }

    #[test]
    fn test_covering_monotonic_coordinates_updates_both_bounds() {
        // 座標單調遞減時，最小與最大值都必須更新
        let listings = vec![
            listing_at(42.40, -71.00),
            listing_at(42.35, -71.05),
            listing_at(42.30, -71.10),
        ];

        let region = BoundingRegion::covering(&listings).unwrap();

        assert_eq!(region.min_lat, 42.30);
        assert_eq!(region.max_lat, 42.40);
        assert_eq!(region.min_long, -71.10);
        assert_eq!(region.max_long, -71.00);
    }

    #[test]
    fn test_single_listing_padding_makes_region_non_degenerate() {
        let listings = vec![listing_at(42.3, -71.0)];
        let region = BoundingRegion::covering(&listings).unwrap();

        assert_eq!(region.min_lat, region.max_lat);
        assert_eq!(region.min_long, region.max_long);

        let padded = region.padded(REGION_PADDING_DEGREES);
        assert!((padded.min_lat - 42.295).abs() < 1e-9);
        assert!((padded.max_lat - 42.305).abs() < 1e-9);
        assert!((padded.min_long - -71.005).abs() < 1e-9);
        assert!((padded.max_long - -70.995).abs() < 1e-9);
    }

    #[test]
    fn test_filter_incidents_single_listing_example() {
        let listings = vec![listing_at(42.3, -71.0)];
        let region = BoundingRegion::covering(&listings).unwrap();
        let incidents = vec![incident_at(42.304, -70.996), incident_at(42.31, -70.99)];

        let nearby = filter_incidents(&incidents, &region, REGION_PADDING_DEGREES);

        assert_eq!(nearby, vec![incident_at(42.304, -70.996)]);
    }

    #[test]
    fn test_filter_incidents_is_exactly_the_padded_subset() {
        let region = BoundingRegion {
            min_lat: 42.30,
            max_lat: 42.34,
            min_long: -71.10,
            max_long: -71.02,
        };
        let incidents = vec![
            incident_at(42.32, -71.05),  // inside
            incident_at(42.297, -71.05), // inside padding below
            incident_at(42.344, -71.018), // inside padding corner
            incident_at(42.36, -71.05),  // too far north
            incident_at(42.32, -71.11),  // too far west
            incident_at(42.32, -71.00),  // too far east
        ];

        let nearby = filter_incidents(&incidents, &region, 0.005);
        let padded = region.padded(0.005);

        assert_eq!(nearby.len(), 3);
        for incident in &incidents {
            let inside = padded.contains(incident.latitude, incident.longitude);
            assert_eq!(inside, nearby.contains(incident));
        }
    }

    #[test]
    fn test_filter_incidents_keeps_input_order() {
        let region = BoundingRegion::covering(&[listing_at(42.3, -71.0)]).unwrap();
        let incidents = vec![
            incident_at(42.301, -71.001),
            incident_at(42.5, -71.0),
            incident_at(42.299, -70.999),
        ];

        let nearby = filter_incidents(&incidents, &region, REGION_PADDING_DEGREES);

        assert_eq!(nearby, vec![incidents[0].clone(), incidents[2].clone()]);
    }
}
