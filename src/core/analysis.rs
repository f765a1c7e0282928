use crate::core::neighborhood::{compare_neighborhoods, neighborhood_mean_prices};
use crate::core::preference::select_candidates;
use crate::core::price::cheapest_listing;
use crate::core::region::filter_incidents;
use crate::core::safety::{safest_of, score_candidates};
use crate::domain::model::{AnalysisReport, BoundingRegion, Dataset, UserQuery};
use crate::utils::error::{Result, ScoutError};

/// Runs the whole scoring pass for one query.
///
/// Every precondition is checked before the stage that depends on it:
/// candidates before region/price/safety, filtered incidents before safety,
/// and the chosen neighborhood's mean before the comparison.
pub fn analyze(dataset: &Dataset, query: &UserQuery, padding_degrees: f64) -> Result<AnalysisReport> {
    let candidates = select_candidates(&dataset.listings, query);
    if candidates.is_empty() {
        return Err(ScoutError::EmptyCandidateSet);
    }
    tracing::info!("🏠 {} candidate listing(s) in {}", candidates.len(), query.neighborhood);

    let region = BoundingRegion::covering(&candidates)?;
    let incidents = filter_incidents(&dataset.incidents, &region, padding_degrees);
    if incidents.is_empty() {
        return Err(ScoutError::InsufficientData);
    }
    tracing::info!(
        "🚨 {} of {} incident report(s) near the candidates",
        incidents.len(),
        dataset.incidents.len()
    );

    let cheapest = cheapest_listing(&candidates)?;
    let scored = score_candidates(&candidates, &incidents)?;
    let safest = safest_of(&scored)?;

    let neighborhood_prices =
        neighborhood_mean_prices(&dataset.listings, &dataset.neighborhoods, query.capacity);
    let comparison = compare_neighborhoods(&neighborhood_prices, &query.neighborhood)?;

    Ok(AnalysisReport {
        query: query.clone(),
        padding_degrees,
        region,
        candidates: scored,
        incidents,
        cheapest,
        safest,
        neighborhood_prices,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::REGION_PADDING_DEGREES;
    use crate::domain::model::{IncidentReport, Listing};

    fn listing(url: &str, neighborhood: &str, lat: f64, long: f64, price: f64, accommodates: u32) -> Listing {
        Listing {
            id: None,
            url: url.to_string(),
            neighborhood: neighborhood.to_string(),
            latitude: lat,
            longitude: long,
            price,
            accommodates,
        }
    }

    fn roxbury_dataset() -> Dataset {
        Dataset {
            listings: vec![
                listing("A", "Roxbury", 42.31, -71.02, 65.0, 4),
                listing("B", "Roxbury", 42.33, -71.09, 500.0, 4),
                listing("C", "Allston", 42.35, -71.13, 250.0, 4),
            ],
            incidents: vec![
                IncidentReport {
                    latitude: 42.311,
                    longitude: -71.021,
                    category: "VANDALISM".to_string(),
                },
                IncidentReport {
                    latitude: 42.36,
                    longitude: -71.06,
                    category: "LARCENY".to_string(),
                },
            ],
            neighborhoods: vec!["Allston".to_string(), "Roxbury".to_string()],
        }
    }

    #[test]
    fn test_roxbury_scenario() {
        let query = UserQuery::new("roxbury", 4, 1000.0);
        let report = analyze(&roxbury_dataset(), &query, REGION_PADDING_DEGREES).unwrap();

        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.cheapest.url, "A");
        assert_eq!(report.cheapest.price, 65.0);
        assert_eq!(report.safest.url, "B");
        // 42.36 在外框之外
        assert_eq!(report.incidents.len(), 1);
        assert_eq!(report.comparison.chosen.mean_price, 282.5);
        assert_eq!(report.comparison.most_similar.as_ref().unwrap().name, "Allston");
    }

    #[test]
    fn test_price_ceiling_below_everything_is_empty_candidate_set() {
        let query = UserQuery::new("Roxbury", 4, 10.0);
        assert!(matches!(
            analyze(&roxbury_dataset(), &query, REGION_PADDING_DEGREES),
            Err(ScoutError::EmptyCandidateSet)
        ));
    }

    #[test]
    fn test_no_nearby_incidents_is_insufficient_data() {
        let mut dataset = roxbury_dataset();
        dataset.incidents.truncate(0);
        dataset.incidents.push(IncidentReport {
            latitude: 42.5,
            longitude: -70.5,
            category: String::new(),
        });

        let query = UserQuery::new("Roxbury", 4, 1000.0);
        assert!(matches!(
            analyze(&dataset, &query, REGION_PADDING_DEGREES),
            Err(ScoutError::InsufficientData)
        ));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let dataset = roxbury_dataset();
        let query = UserQuery::new("Roxbury", 4, 1000.0);

        let first = analyze(&dataset, &query, REGION_PADDING_DEGREES).unwrap();
        let second = analyze(&dataset, &query, REGION_PADDING_DEGREES).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_console_summary_mentions_results() {
        let query = UserQuery::new("Roxbury", 4, 1000.0);
        let report = analyze(&roxbury_dataset(), &query, REGION_PADDING_DEGREES).unwrap();

        let text = report.to_string();

        assert!(text.contains("Cheapest Option URL: A"));
        assert!(text.contains("The cheapest option costs $65.00"));
        assert!(text.contains("Safest Option URL: B"));
        assert!(text.contains("To accommodate 4 people:"));
        assert!(text.contains("Roxbury had an average price of $282.50"));
        assert!(text.contains("The most similar location is Allston"));
    }
}
