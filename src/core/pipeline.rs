use crate::adapters::csv_reader::{parse_incidents, parse_listings, parse_neighborhoods};
use crate::core::analysis::analyze;
use crate::core::{AnalysisReport, ConfigProvider, Dataset, Pipeline, Storage};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const DEFAULT_BUNDLE_NAME: &str = "scout_report.zip";

pub struct ScoutPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ScoutPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Reads only the neighborhood list, for `--list-neighborhoods`.
    pub async fn neighborhoods(&self) -> Result<Vec<String>> {
        let bytes = self
            .storage
            .read_file(self.config.neighborhoods_file())
            .await?;
        parse_neighborhoods(bytes.as_slice(), self.config.delimiter())
    }
}

#[derive(Serialize)]
struct CandidateRow<'a> {
    url: &'a str,
    neighborhood: &'a str,
    latitude: f64,
    longitude: f64,
    price: f64,
    accommodates: u32,
    nearest_incident_distance: f64,
}

#[derive(Serialize)]
struct NeighborhoodPriceRow<'a> {
    neighborhood: &'a str,
    mean_price: Option<f64>,
    listings: usize,
}

#[derive(Serialize)]
struct Summary<'a> {
    generated_at: String,
    candidate_count: usize,
    incident_count: usize,
    #[serde(flatten)]
    report: SummaryBody<'a>,
}

#[derive(Serialize)]
struct SummaryBody<'a> {
    query: &'a crate::domain::model::UserQuery,
    padding_degrees: f64,
    region: &'a crate::domain::model::BoundingRegion,
    cheapest: &'a crate::domain::model::CheapestListing,
    safest: &'a crate::domain::model::SafestListing,
    comparison: &'a crate::domain::model::NeighborhoodComparison,
}

fn to_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::utils::error::ScoutError::IoError(e.into_error()))
}

fn candidates_csv(report: &AnalysisReport) -> Result<Vec<u8>> {
    to_csv(report.candidates.iter().map(|scored| CandidateRow {
        url: &scored.listing.url,
        neighborhood: &scored.listing.neighborhood,
        latitude: scored.listing.latitude,
        longitude: scored.listing.longitude,
        price: scored.listing.price,
        accommodates: scored.listing.accommodates,
        nearest_incident_distance: scored.nearest_incident_distance,
    }))
}

fn neighborhood_prices_csv(report: &AnalysisReport) -> Result<Vec<u8>> {
    to_csv(
        report
            .neighborhood_prices
            .entries
            .iter()
            .map(|entry| NeighborhoodPriceRow {
                neighborhood: &entry.name,
                mean_price: entry.mean_price,
                listings: entry.listing_count,
            }),
    )
}

fn summary_json(report: &AnalysisReport) -> Result<String> {
    let summary = Summary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        candidate_count: report.candidates.len(),
        incident_count: report.incidents.len(),
        report: SummaryBody {
            query: &report.query,
            padding_degrees: report.padding_degrees,
            region: &report.region,
            cheapest: &report.cheapest,
            safest: &report.safest,
            comparison: &report.comparison,
        },
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScoutPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let delimiter = self.config.delimiter();

        // 讀取房源資料
        tracing::debug!("Reading listings from {}", self.config.listings_file());
        let listing_bytes = self.storage.read_file(self.config.listings_file()).await?;
        let listings = parse_listings(listing_bytes.as_slice(), delimiter)?;

        // 讀取事件報告
        tracing::debug!("Reading incidents from {}", self.config.incidents_file());
        let incident_bytes = self.storage.read_file(self.config.incidents_file()).await?;
        let incidents = parse_incidents(incident_bytes.as_slice(), delimiter)?;

        let neighborhoods = self.neighborhoods().await?;

        if listings.is_empty() {
            tracing::warn!("⚠️ Listings file has no rows");
        }

        Ok(Dataset {
            listings,
            incidents,
            neighborhoods,
        })
    }

    async fn transform(&self, data: Dataset) -> Result<AnalysisReport> {
        let query = self.config.query()?;
        tracing::info!(
            "🔧 Scoring {} for {} guest(s) up to ${:.2}",
            query.neighborhood,
            query.capacity,
            query.max_price
        );

        let report = analyze(&data, &query, self.config.padding_degrees())?;

        tracing::info!(
            "✅ Cheapest: {} (${:.2}), safest: {}",
            report.cheapest.url,
            report.cheapest.price,
            report.safest.url
        );
        Ok(report)
    }

    async fn load(&self, report: &AnalysisReport) -> Result<String> {
        let bundle_name = self.config.bundle_name();
        let output_path = format!("{}/{}", self.config.output_path(), bundle_name);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            // 候選房源與安全分數
            zip.start_file::<_, ()>("candidates.csv", FileOptions::default())?;
            zip.write_all(&candidates_csv(report)?)?;

            // 區域內的事件
            zip.start_file::<_, ()>("incidents.csv", FileOptions::default())?;
            zip.write_all(&to_csv(report.incidents.iter())?)?;

            // 各社區平均價格
            zip.start_file::<_, ()>("neighborhood_prices.csv", FileOptions::default())?;
            zip.write_all(&neighborhood_prices_csv(report)?)?;

            zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
            zip.write_all(summary_json(report)?.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes)", zip_data.len());
        self.storage.write_file(bundle_name, &zip_data).await?;

        tracing::info!("📦 Report bundle saved: {}", output_path);
        Ok(output_path)
    }
}
