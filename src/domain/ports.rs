use crate::core::extractor::ImageRewrite;
use crate::domain::model::CharacterBatch;
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
    /// Wiki category page to scrape.
    fn wiki_url(&self) -> &str;
    fn proxy_endpoint(&self) -> &str;
    fn image_rewrite(&self) -> &ImageRewrite;
    /// Saved page to parse instead of fetching.
    fn input_file(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn export_filename(&self) -> &str;
    /// Fixed seed for stat synthesis; `None` draws from OS entropy.
    fn stats_seed(&self) -> Option<u64>;
}

/// Everything produced for one batch, ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub batch: CharacterBatch,
    pub csv_output: String,
    pub json_output: String,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CharacterBatch>;
    async fn transform(&self, batch: CharacterBatch) -> Result<ExportBundle>;
    async fn load(&self, bundle: ExportBundle) -> Result<String>;
}
