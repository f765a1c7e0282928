use crate::core::reduce::{first_max_by_key, first_min_by_key};
use crate::domain::model::{
    Listing, NeighborhoodComparison, NeighborhoodPrice, NeighborhoodPriceMap, PricedNeighborhood,
};
use crate::utils::error::{Result, ScoutError};
use std::collections::HashSet;

/// Mean price per neighborhood over listings that sleep exactly `capacity` guests.
///
/// Entries follow the order of `neighborhoods`; a repeated name keeps its first slot.
/// A neighborhood without matching listings gets `mean_price: None`.
pub fn neighborhood_mean_prices(
    listings: &[Listing],
    neighborhoods: &[String],
    capacity: u32,
) -> NeighborhoodPriceMap {
    let mut seen = HashSet::new();

    let entries = neighborhoods
        .iter()
        .filter(|&name| seen.insert(name.as_str()))
        .map(|name| {
            let (total, count) = listings
                .iter()
                .filter(|l| &l.neighborhood == name && l.accommodates == capacity)
                .fold((0.0_f64, 0_usize), |(total, count), l| (total + l.price, count + 1));

            let mean_price = if count == 0 {
                None
            } else {
                Some(total / count as f64)
            };

            NeighborhoodPrice {
                name: name.clone(),
                mean_price,
                listing_count: count,
            }
        })
        .collect();

    NeighborhoodPriceMap { capacity, entries }
}

fn priced(entry: &NeighborhoodPrice, mean_price: f64) -> PricedNeighborhood {
    PricedNeighborhood {
        name: entry.name.clone(),
        mean_price,
    }
}

/// Ranks `chosen` against every other neighborhood with a defined mean.
///
/// Most similar excludes `chosen` itself; most expensive and cheapest are global.
/// Ties go to the neighborhood listed first.
pub fn compare_neighborhoods(
    prices: &NeighborhoodPriceMap,
    chosen: &str,
) -> Result<NeighborhoodComparison> {
    let chosen_entry = prices
        .get(chosen)
        .ok_or_else(|| ScoutError::UnknownNeighborhood {
            neighborhood: chosen.to_string(),
        })?;
    let chosen_mean = chosen_entry
        .mean_price
        .ok_or_else(|| ScoutError::UndefinedAggregate {
            neighborhood: chosen.to_string(),
        })?;

    let most_similar = first_min_by_key(
        prices.defined().filter(|(entry, _)| entry.name != chosen),
        |(_, mean)| (mean - chosen_mean).abs(),
    )
    .map(|(entry, mean)| priced(entry, mean));

    // chosen 本身有定義，所以最大與最小一定存在
    let most_expensive = first_max_by_key(prices.defined(), |(_, mean)| *mean)
        .map(|(entry, mean)| priced(entry, mean))
        .ok_or_else(|| ScoutError::UndefinedAggregate {
            neighborhood: chosen.to_string(),
        })?;
    let cheapest = first_min_by_key(prices.defined(), |(_, mean)| *mean)
        .map(|(entry, mean)| priced(entry, mean))
        .ok_or_else(|| ScoutError::UndefinedAggregate {
            neighborhood: chosen.to_string(),
        })?;

    let excluded: Vec<String> = prices
        .entries
        .iter()
        .filter(|entry| entry.mean_price.is_none())
        .map(|entry| entry.name.clone())
        .collect();

    if !excluded.is_empty() {
        tracing::debug!(
            "{} neighborhood(s) have no {}-guest listings and were left out of the comparison",
            excluded.len(),
            prices.capacity
        );
    }

    Ok(NeighborhoodComparison {
        chosen: priced(chosen_entry, chosen_mean),
        most_similar,
        most_expensive,
        cheapest,
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(neighborhood: &str, price: f64, accommodates: u32) -> Listing {
        Listing {
            id: None,
            url: format!("https://example.com/{}/{}", neighborhood, price),
            neighborhood: neighborhood.to_string(),
            latitude: 42.3,
            longitude: -71.0,
            price,
            accommodates,
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_listings() -> Vec<Listing> {
        vec![
            listing("Roxbury", 200.0, 4),
            listing("Roxbury", 216.0, 4),
            listing("Roxbury", 90.0, 2),
            listing("Allston", 210.0, 4),
            listing("Allston", 220.0, 4),
            listing("Hyde Park", 120.0, 4),
            listing("South Boston Waterfront", 486.0, 4),
            listing("Bay Village", 300.0, 2),
        ]
    }

    #[test]
    fn test_mean_uses_exactly_matching_listings() {
        let map = neighborhood_mean_prices(
            &sample_listings(),
            &names(&["Roxbury", "Allston", "Bay Village"]),
            4,
        );

        assert_eq!(map.len(), 3);
        assert_eq!(map.mean_price("Roxbury"), Some(208.0));
        assert_eq!(map.get("Roxbury").unwrap().listing_count, 2);
        assert_eq!(map.mean_price("Allston"), Some(215.0));
        assert_eq!(map.mean_price("Bay Village"), None);
        assert_eq!(map.get("Bay Village").unwrap().listing_count, 0);
    }

    #[test]
    fn test_map_keeps_neighborhood_order_and_drops_duplicates() {
        let map = neighborhood_mean_prices(
            &sample_listings(),
            &names(&["Hyde Park", "Allston", "Hyde Park"]),
            4,
        );

        let order: Vec<&str> = map.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["Hyde Park", "Allston"]);
    }

    #[test]
    fn test_compare_finds_similar_most_expensive_and_cheapest() {
        let map = neighborhood_mean_prices(
            &sample_listings(),
            &names(&[
                "Allston",
                "Bay Village",
                "Hyde Park",
                "Roxbury",
                "South Boston Waterfront",
            ]),
            4,
        );

        let comparison = compare_neighborhoods(&map, "Roxbury").unwrap();

        assert_eq!(comparison.chosen.mean_price, 208.0);
        assert_eq!(comparison.most_similar.unwrap().name, "Allston");
        assert_eq!(comparison.most_expensive.name, "South Boston Waterfront");
        assert_eq!(comparison.most_expensive.mean_price, 486.0);
        assert_eq!(comparison.cheapest.name, "Hyde Park");
        assert_eq!(comparison.excluded, vec!["Bay Village".to_string()]);
    }

    #[test]
    fn test_most_expensive_and_cheapest_include_chosen() {
        let listings = vec![listing("Back Bay", 500.0, 2), listing("Fenway", 250.0, 2)];
        let map = neighborhood_mean_prices(&listings, &names(&["Fenway", "Back Bay"]), 2);

        let comparison = compare_neighborhoods(&map, "Back Bay").unwrap();

        assert_eq!(comparison.most_expensive.name, "Back Bay");
        assert_eq!(comparison.cheapest.name, "Fenway");
        assert_eq!(comparison.most_similar.unwrap().name, "Fenway");
    }

    #[test]
    fn test_similarity_tie_goes_to_first_listed() {
        let listings = vec![
            listing("Center", 200.0, 2),
            listing("Below", 150.0, 2),
            listing("Above", 250.0, 2),
        ];
        let map = neighborhood_mean_prices(&listings, &names(&["Center", "Below", "Above"]), 2);

        let comparison = compare_neighborhoods(&map, "Center").unwrap();
        assert_eq!(comparison.most_similar.unwrap().name, "Below");

        let reordered = neighborhood_mean_prices(&listings, &names(&["Above", "Center", "Below"]), 2);
        let comparison = compare_neighborhoods(&reordered, "Center").unwrap();
        assert_eq!(comparison.most_similar.unwrap().name, "Above");
    }

    #[test]
    fn test_max_min_ties_go_to_first_listed() {
        let listings = vec![
            listing("North", 100.0, 2),
            listing("South", 100.0, 2),
            listing("East", 300.0, 2),
            listing("West", 300.0, 2),
        ];
        let map = neighborhood_mean_prices(&listings, &names(&["North", "South", "East", "West"]), 2);

        let comparison = compare_neighborhoods(&map, "South").unwrap();
        assert_eq!(comparison.cheapest.name, "North");
        assert_eq!(comparison.most_expensive.name, "East");
    }

    #[test]
    fn test_only_chosen_defined_has_no_similar() {
        let listings = vec![listing("Roxbury", 150.0, 3)];
        let map = neighborhood_mean_prices(&listings, &names(&["Roxbury", "Allston"]), 3);

        let comparison = compare_neighborhoods(&map, "Roxbury").unwrap();

        assert!(comparison.most_similar.is_none());
        assert_eq!(comparison.most_expensive.name, "Roxbury");
        assert_eq!(comparison.cheapest.name, "Roxbury");
        assert_eq!(comparison.excluded, vec!["Allston".to_string()]);
    }

    #[test]
    fn test_chosen_without_listings_is_undefined_aggregate() {
        let map = neighborhood_mean_prices(&sample_listings(), &names(&["Roxbury", "Bay Village"]), 4);

        let err = compare_neighborhoods(&map, "Bay Village").unwrap_err();
        assert!(matches!(
            err,
            ScoutError::UndefinedAggregate { ref neighborhood } if neighborhood == "Bay Village"
        ));
    }

    #[test]
    fn test_unknown_neighborhood_is_reported() {
        let map = neighborhood_mean_prices(&sample_listings(), &names(&["Roxbury"]), 4);
        assert!(matches!(
            compare_neighborhoods(&map, "Atlantis"),
            Err(ScoutError::UnknownNeighborhood { .. })
        ));
    }
}
