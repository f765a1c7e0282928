use crate::core::pipeline::DEFAULT_BUNDLE_NAME;
use crate::core::region::REGION_PADDING_DEGREES;
use crate::core::ConfigProvider;
use crate::domain::model::UserQuery;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportInfo,
    pub data: DataConfig,
    pub query: QueryConfig,
    pub analysis: Option<AnalysisConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: Option<String>,
    pub listings: String,
    pub incidents: String,
    pub neighborhoods: String,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub neighborhood: String,
    pub capacity: u32,
    pub max_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub padding_degrees: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub bundle_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoutError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> &str {
        self.data.dir.as_deref().unwrap_or(".")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("data.dir", self.data_dir())?;
        for (field, file) in [
            ("data.listings", &self.data.listings),
            ("data.incidents", &self.data.incidents),
            ("data.neighborhoods", &self.data.neighborhoods),
        ] {
            validation::validate_path(field, file)?;
            validation::validate_file_extension(field, file, validation::DATA_FILE_EXTENSIONS)?;
        }
        if let Some(delimiter) = self.data.delimiter {
            validation::validate_delimiter("data.delimiter", delimiter)?;
        }

        validation::validate_non_empty_string("query.neighborhood", &self.query.neighborhood)?;
        validation::validate_positive_number("query.capacity", self.query.capacity as usize, 1)?;
        validation::validate_non_negative_amount("query.max_price", self.query.max_price)?;

        validation::validate_non_negative_amount(
            "analysis.padding_degrees",
            self.padding_degrees(),
        )?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_file_extension("load.bundle_name", self.bundle_name(), &["zip"])?;

        if let Some(level) = self.monitoring.as_ref().and_then(|m| m.log_level.as_deref()) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(ScoutError::InvalidConfigValueError {
                    field: "monitoring.log_level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn listings_file(&self) -> &str {
        &self.data.listings
    }

    fn incidents_file(&self) -> &str {
        &self.data.incidents
    }

    fn neighborhoods_file(&self) -> &str {
        &self.data.neighborhoods
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn delimiter(&self) -> u8 {
        self.data.delimiter.map(|c| c as u8).unwrap_or(b',')
    }

    fn padding_degrees(&self) -> f64 {
        self.analysis
            .as_ref()
            .and_then(|a| a.padding_degrees)
            .unwrap_or(REGION_PADDING_DEGREES)
    }

    fn query(&self) -> Result<UserQuery> {
        Ok(UserQuery::new(
            &self.query.neighborhood,
            self.query.capacity,
            self.query.max_price,
        ))
    }

    fn bundle_name(&self) -> &str {
        self.load.bundle_name.as_deref().unwrap_or(DEFAULT_BUNDLE_NAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
