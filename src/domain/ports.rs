use crate::core::pipeline::DEFAULT_BUNDLE_NAME;
use crate::domain::model::{AnalysisReport, Dataset, UserQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listings_file(&self) -> &str;
    fn incidents_file(&self) -> &str;
    fn neighborhoods_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn padding_degrees(&self) -> f64;
    fn query(&self) -> Result<UserQuery>;

    fn bundle_name(&self) -> &str {
        DEFAULT_BUNDLE_NAME
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<AnalysisReport>;
    async fn load(&self, report: &AnalysisReport) -> Result<String>;
}
