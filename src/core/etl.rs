use crate::core::{CharacterBatch, Pipeline};
use crate::utils::error::Result;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub batch: CharacterBatch,
}

pub struct ScraperEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScraperEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting scrape");

        let batch = self.pipeline.extract().await?;
        tracing::info!("Extracted {} characters", batch.len());

        let bundle = self.pipeline.transform(batch.clone()).await?;
        tracing::info!(
            "Serialized {} rows ({} bytes of CSV)",
            bundle.batch.len(),
            bundle.csv_output.len()
        );

        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunReport { output_path, batch })
    }
}
