use crate::core::extractor::Extractor;
use crate::domain::model::ScrapeOutcome;
use crate::utils::error::{Result, ScraperError};
use rand::Rng;
use reqwest::Client;

pub const DEFAULT_PROXY_ENDPOINT: &str = "https://api.allorigins.win/raw";
pub const DEFAULT_WIKI_URL: &str = "https://intothespiderverse.fandom.com/wiki/Category:Characters";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch wiki page";

/// Fetches wiki pages through a CORS-bypass proxy.
///
/// One request per call, no retries and no caching.
pub struct WikiFetcher {
    client: Client,
    proxy_endpoint: String,
}

impl WikiFetcher {
    pub fn new(proxy_endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            proxy_endpoint: proxy_endpoint.into(),
        }
    }

    pub fn proxy_url(&self, target: &str) -> String {
        format!("{}?url={}", self.proxy_endpoint, urlencoding::encode(target))
    }

    pub async fn fetch_markup(&self, target: &str) -> Result<String> {
        let request_url = self.proxy_url(target);
        tracing::debug!("Making proxy request to: {}", request_url);

        let response = self.client.get(&request_url).send().await?;
        tracing::debug!("Proxy response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ScraperError::fetch(FETCH_FAILED_MESSAGE));
        }

        Ok(response.text().await?)
    }

    /// Fetches and parses `target`. Any failure comes back as
    /// [`ScrapeOutcome::Failure`] carrying a readable message.
    pub async fn scrape<R: Rng + ?Sized>(
        &self,
        target: &str,
        extractor: &Extractor,
        rng: &mut R,
    ) -> ScrapeOutcome {
        tracing::info!("Fetching Spider-Verse wiki data from {}", target);

        match self.fetch_markup(target).await {
            Ok(markup) => {
                let characters = extractor.extract(&markup, rng);
                tracing::info!("Successfully parsed {} characters", characters.len());
                ScrapeOutcome::success(characters)
            }
            Err(e) => {
                tracing::error!("Error scraping wiki: {}", e);
                ScrapeOutcome::failure(e.to_string())
            }
        }
    }
}

impl Default for WikiFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_ENDPOINT)
    }
}
