use crate::core::region::REGION_PADDING_DEGREES;
use crate::core::ConfigProvider;
use crate::domain::model::UserQuery;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "stay-scout")]
#[command(about = "Find the cheapest and safest rental listings in a neighborhood")]
pub struct CliConfig {
    #[arg(long, default_value = ".", help = "Directory holding the input files")]
    pub data_dir: String,

    #[arg(long, default_value = "airbnb_list.csv")]
    pub listings: String,

    #[arg(long, default_value = "crime.csv")]
    pub incidents: String,

    #[arg(long, default_value = "neighbourhoods.csv")]
    pub neighborhoods: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Neighborhood to search, e.g. \"Roxbury\"")]
    pub neighborhood: Option<String>,

    #[arg(long, help = "Exact number of guests the listing must accommodate")]
    pub capacity: Option<u32>,

    #[arg(long, help = "Maximum nightly price in dollars")]
    pub max_price: Option<f64>,

    #[arg(long, default_value = ",", help = "Field delimiter of the input files")]
    pub delimiter: char,

    #[arg(long, default_value_t = REGION_PADDING_DEGREES)]
    pub padding_degrees: f64,

    #[arg(long, help = "Print the known neighborhoods and exit")]
    pub list_neighborhoods: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory between phases")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn listings_file(&self) -> &str {
        &self.listings
    }

    fn incidents_file(&self) -> &str {
        &self.incidents
    }

    fn neighborhoods_file(&self) -> &str {
        &self.neighborhoods
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        self.delimiter as u8
    }

    fn padding_degrees(&self) -> f64 {
        self.padding_degrees
    }

    fn query(&self) -> Result<UserQuery> {
        let neighborhood = validation::validate_required_field("neighborhood", &self.neighborhood)?;
        let capacity = validation::validate_required_field("capacity", &self.capacity)?;
        let max_price = validation::validate_required_field("max_price", &self.max_price)?;
        Ok(UserQuery::new(neighborhood, *capacity, *max_price))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_path("output_path", &self.output_path)?;
        for (field, file) in [
            ("listings", &self.listings),
            ("incidents", &self.incidents),
            ("neighborhoods", &self.neighborhoods),
        ] {
            validation::validate_path(field, file)?;
            validation::validate_file_extension(field, file, validation::DATA_FILE_EXTENSIONS)?;
        }
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_non_negative_amount("padding_degrees", self.padding_degrees)?;

        // 只列出社區時不需要查詢條件
        if self.list_neighborhoods {
            return Ok(());
        }

        let query = self.query()?;
        validation::validate_non_empty_string("neighborhood", &query.neighborhood)?;
        validation::validate_positive_number("capacity", query.capacity as usize, 1)?;
        validation::validate_non_negative_amount("max_price", query.max_price)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScoutError;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("stay-scout").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--neighborhood", "roxbury", "--capacity", "4", "--max-price", "1000"]);

        assert_eq!(config.listings_file(), "airbnb_list.csv");
        assert_eq!(config.delimiter(), b',');
        assert_eq!(config.padding_degrees(), 0.005);
        assert!(config.validate().is_ok());

        let query = config.query().unwrap();
        assert_eq!(query.neighborhood, "Roxbury");
        assert_eq!(query.capacity, 4);
        assert_eq!(query.max_price, 1000.0);
    }

    #[test]
    fn test_missing_query_fields_fail_validation() {
        let config = parse(&["--neighborhood", "Roxbury"]);
        assert!(matches!(
            config.validate(),
            Err(ScoutError::MissingConfigError { ref field }) if field == "capacity"
        ));
    }

    #[test]
    fn test_listing_neighborhoods_needs_no_query() {
        let config = parse(&["--list-neighborhoods"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity_and_bad_delimiter() {
        let config = parse(&["--neighborhood", "Roxbury", "--capacity", "0", "--max-price", "100"]);
        assert!(config.validate().is_err());

        let config = parse(&[
            "--neighborhood",
            "Roxbury",
            "--capacity",
            "2",
            "--max-price",
            "100",
            "--delimiter",
            "\"",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let config = parse(&["--list-neighborhoods", "--listings", "listings.xlsx"]);
        assert!(config.validate().is_err());
    }
}
