use serde::{Deserialize, Serialize};

/// A short-term rental listing with numeric fields already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Option<u64>,
    pub url: String,
    pub neighborhood: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub accommodates: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
}

/// Minimal axis-aligned rectangle over a set of coordinates, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    pub neighborhood: String,
    pub capacity: u32,
    pub max_price: f64,
}

impl UserQuery {
    /// The neighborhood is title-cased so "south end" matches "South End".
    pub fn new(neighborhood: &str, capacity: u32, max_price: f64) -> Self {
        Self {
            neighborhood: title_case(neighborhood),
            capacity,
            max_price,
        }
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;

    for ch in value.trim().chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }

    out
}

/// Everything the analysis needs, as produced by the extract phase.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    pub incidents: Vec<IncidentReport>,
    pub neighborhoods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheapestListing {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafestListing {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_incident_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredListing {
    pub listing: Listing,
    pub nearest_incident_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodPrice {
    pub name: String,
    /// `None` when no listing in the neighborhood matches the capacity.
    pub mean_price: Option<f64>,
    pub listing_count: usize,
}

/// Mean price per neighborhood for one capacity, in neighborhood-list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodPriceMap {
    pub capacity: u32,
    pub entries: Vec<NeighborhoodPrice>,
}

impl NeighborhoodPriceMap {
    pub fn get(&self, name: &str) -> Option<&NeighborhoodPrice> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn mean_price(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|entry| entry.mean_price)
    }

    /// Entries with a defined mean, paired with that mean.
    pub fn defined(&self) -> impl Iterator<Item = (&NeighborhoodPrice, f64)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.mean_price.map(|mean| (entry, mean)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedNeighborhood {
    pub name: String,
    pub mean_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodComparison {
    pub chosen: PricedNeighborhood,
    pub most_similar: Option<PricedNeighborhood>,
    pub most_expensive: PricedNeighborhood,
    pub cheapest: PricedNeighborhood,
    /// Neighborhoods left out of every comparison because their mean is undefined.
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub query: UserQuery,
    pub padding_degrees: f64,
    pub region: BoundingRegion,
    pub candidates: Vec<ScoredListing>,
    pub incidents: Vec<IncidentReport>,
    pub cheapest: CheapestListing,
    pub safest: SafestListing,
    pub neighborhood_prices: NeighborhoodPriceMap,
    pub comparison: NeighborhoodComparison,
}
