use crate::core::{AnalysisReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: String,
    pub report: AnalysisReport,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting stay-scout analysis...");

        // Extract
        tracing::info!("📥 Loading listings, incidents and neighborhoods...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} listings, {} incidents, {} neighborhoods",
            dataset.listings.len(),
            dataset.incidents.len(),
            dataset.neighborhoods.len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("🔧 Scoring candidates...");
        let report = self.pipeline.transform(dataset).await?;
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("💾 Writing report bundle...");
        let output_path = self.pipeline.load(&report).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            output_path,
            report,
        })
    }
}
