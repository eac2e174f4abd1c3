use crate::core::export::{self, snapshot_filename};
use crate::core::extractor::Extractor;
use crate::core::fetch::WikiFetcher;
use crate::core::{CharacterBatch, ConfigProvider, ExportBundle, Pipeline, Storage};
use crate::utils::error::{Result, ScraperError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

/// Scrape → enrich → export, writing through a [`Storage`] backend.
pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: WikiFetcher,
    extractor: Extractor,
    rng: Mutex<StdRng>,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let rng = match config.stats_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            fetcher: WikiFetcher::new(config.proxy_endpoint()),
            extractor: Extractor::new(config.image_rewrite().clone()),
            rng: Mutex::new(rng),
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    async fn extract(&self) -> Result<CharacterBatch> {
        let mut rng = self.rng.lock().await;

        let characters = match self.config.input_file() {
            Some(path) => {
                tracing::debug!("Reading saved page from: {}", path);
                let bytes = tokio::fs::read(path).await?;
                let markup = String::from_utf8_lossy(&bytes);
                self.extractor.extract(&markup, &mut *rng)
            }
            None => self
                .fetcher
                .scrape(self.config.wiki_url(), &self.extractor, &mut *rng)
                .await
                .into_result()
                .map_err(ScraperError::fetch)?,
        };

        Ok(CharacterBatch::new(characters))
    }

    async fn transform(&self, batch: CharacterBatch) -> Result<ExportBundle> {
        let csv_output = export::serialize(&batch.characters)?;
        let json_output = export::snapshot_json(&batch)?;

        Ok(ExportBundle {
            batch,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, bundle: ExportBundle) -> Result<String> {
        let filename = self.config.export_filename();
        let json_filename = snapshot_filename(filename);

        tracing::debug!(
            "Writing {} ({} bytes) and {}",
            filename,
            bundle.csv_output.len(),
            json_filename
        );
        self.storage
            .write_file(filename, bundle.csv_output.as_bytes())
            .await?;
        self.storage
            .write_file(&json_filename, bundle.json_output.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}
