use crate::domain::model::{IncidentReport, Listing};
use crate::utils::error::{Result, ScoutError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "url")]
    listing_url: String,
    // Airbnb exports carry both columns; the cleansed one wins when present.
    #[serde(default)]
    neighbourhood_cleansed: Option<String>,
    #[serde(default, alias = "neighborhood")]
    neighbourhood: Option<String>,
    latitude: String,
    longitude: String,
    price: String,
    accommodates: String,
}

#[derive(Debug, Deserialize)]
struct IncidentRow {
    #[serde(rename = "Lat", alias = "lat", alias = "latitude", default)]
    lat: Option<String>,
    #[serde(rename = "Long", alias = "long", alias = "longitude", default)]
    long: Option<String>,
    #[serde(rename = "OFFENSE_DESCRIPTION", alias = "category", default)]
    category: Option<String>,
}

fn builder_for(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true);
    builder
}

fn reader_for<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    builder_for(delimiter).from_reader(reader)
}

/// Strips a leading currency symbol and thousands separators: `"$1,250.00"` → `1250.0`.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn row_error(source_name: &str, row: usize, reason: String) -> ScoutError {
    ScoutError::ParseError {
        source_name: source_name.to_string(),
        row,
        reason,
    }
}

/// Parses listing rows. Any malformed numeric field fails the whole file with its row number.
pub fn parse_listings<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Listing>> {
    let mut csv_reader = reader_for(reader, delimiter);
    let mut listings = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = index + 1;
        let raw = record?;

        let latitude = parse_coordinate(&raw.latitude)
            .ok_or_else(|| row_error("listings", row, format!("invalid latitude '{}'", raw.latitude)))?;
        let longitude = parse_coordinate(&raw.longitude).ok_or_else(|| {
            row_error("listings", row, format!("invalid longitude '{}'", raw.longitude))
        })?;
        let price = normalize_price(&raw.price)
            .ok_or_else(|| row_error("listings", row, format!("invalid price '{}'", raw.price)))?;
        let accommodates = raw.accommodates.parse::<u32>().map_err(|_| {
            row_error(
                "listings",
                row,
                format!("invalid accommodates '{}'", raw.accommodates),
            )
        })?;

        let neighborhood = raw
            .neighbourhood_cleansed
            .filter(|name| !name.is_empty())
            .or(raw.neighbourhood)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| row_error("listings", row, "missing neighbourhood".to_string()))?;

        listings.push(Listing {
            id: raw.id.as_deref().and_then(|id| id.trim().parse::<u64>().ok()),
            url: raw.listing_url,
            neighborhood,
            latitude,
            longitude,
            price,
            accommodates,
        });
    }

    tracing::debug!("Parsed {} listings", listings.len());
    Ok(listings)
}

/// Parses incident rows, skipping rows without usable coordinates.
///
/// Public crime exports leave coordinates blank or fill them with `0`/`-1`
/// placeholders; those rows cannot be placed on the map.
pub fn parse_incidents<R: Read>(reader: R, delimiter: u8) -> Result<Vec<IncidentReport>> {
    let mut csv_reader = reader_for(reader, delimiter);
    let mut incidents = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.deserialize::<IncidentRow>() {
        let raw = record?;

        let coordinates = match (
            raw.lat.as_deref().and_then(parse_coordinate),
            raw.long.as_deref().and_then(parse_coordinate),
        ) {
            (Some(lat), Some(long)) if !is_placeholder(lat, long) => Some((lat, long)),
            _ => None,
        };

        match coordinates {
            Some((latitude, longitude)) => incidents.push(IncidentReport {
                latitude,
                longitude,
                category: raw.category.unwrap_or_default(),
            }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("⚠️ Skipped {} incident row(s) without usable coordinates", skipped);
    }
    tracing::debug!("Parsed {} incidents", incidents.len());
    Ok(incidents)
}

fn is_placeholder(lat: f64, long: f64) -> bool {
    (lat == 0.0 && long == 0.0) || (lat == -1.0 && long == -1.0)
}

/// One neighborhood per line. For `group,name` style files the last field is the name.
///
/// Blank lines, a header line and repeated names are dropped.
pub fn parse_neighborhoods<R: Read>(reader: R, delimiter: u8) -> Result<Vec<String>> {
    let mut csv_reader = builder_for(delimiter).has_headers(false).from_reader(reader);
    let mut names: Vec<String> = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let field = match record.iter().last() {
            Some(field) if !field.is_empty() && !is_header(field) => field,
            _ => continue,
        };

        if !names.iter().any(|name| name == field) {
            names.push(field.to_string());
        }
    }

    Ok(names)
}

fn is_header(field: &str) -> bool {
    field.eq_ignore_ascii_case("neighbourhood") || field.eq_ignore_ascii_case("neighborhood")
}
