pub mod cli;
pub mod toml_config;

use crate::core::export::DEFAULT_EXPORT_FILENAME;
use crate::core::extractor::ImageRewrite;
use crate::core::fetch::{DEFAULT_PROXY_ENDPOINT, DEFAULT_WIKI_URL};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, validate_range, validate_url,
    Validate,
};

#[cfg(feature = "cli")]
use crate::core::gallery::GroupFilter;
#[cfg(feature = "cli")]
use clap::Parser;

/// Resolved settings for one scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub wiki_url: String,
    pub proxy_endpoint: String,
    pub image_rewrite: ImageRewrite,
    pub input_file: Option<String>,
    pub output_path: String,
    pub export_filename: String,
    pub stats_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wiki_url: DEFAULT_WIKI_URL.to_string(),
            proxy_endpoint: DEFAULT_PROXY_ENDPOINT.to_string(),
            image_rewrite: ImageRewrite::default(),
            input_file: None,
            output_path: "./output".to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            stats_seed: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn wiki_url(&self) -> &str {
        &self.wiki_url
    }

    fn proxy_endpoint(&self) -> &str {
        &self.proxy_endpoint
    }

    fn image_rewrite(&self) -> &ImageRewrite {
        &self.image_rewrite
    }

    fn input_file(&self) -> Option<&str> {
        self.input_file.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_filename(&self) -> &str {
        &self.export_filename
    }

    fn stats_seed(&self) -> Option<u64> {
        self.stats_seed
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        match &self.input_file {
            Some(path) => validate_path("input_file", path)?,
            None => {
                validate_url("wiki_url", &self.wiki_url)?;
                validate_url("proxy_endpoint", &self.proxy_endpoint)?;
            }
        }

        validate_url("images.proxy_endpoint", &self.image_rewrite.proxy_endpoint)?;
        for host in &self.image_rewrite.hosts {
            validate_non_empty_string("images.hosts", host)?;
        }
        validate_range("images.width", self.image_rewrite.width, 1, 4000)?;
        validate_range("images.height", self.image_rewrite.height, 1, 4000)?;
        validate_non_empty_string("images.fit", &self.image_rewrite.fit)?;

        validate_path("output_path", &self.output_path)?;
        validate_file_name("export_filename", &self.export_filename)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "spiderverse-scraper")]
#[command(about = "Scrape Spider-Verse characters from a wiki category page and export them to CSV")]
pub struct CliConfig {
    /// Wiki category page to scrape
    #[arg(long)]
    pub url: Option<String>,

    /// CORS proxy the page is fetched through
    #[arg(long)]
    pub proxy_endpoint: Option<String>,

    /// Image resizing proxy for wiki-hosted thumbnails
    #[arg(long)]
    pub image_proxy: Option<String>,

    /// Parse a saved HTML page instead of fetching
    #[arg(long)]
    pub input_file: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Name of the CSV export inside the output directory
    #[arg(long)]
    pub filename: Option<String>,

    /// Seed for synthesized stats, for reproducible exports
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML config file; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only list characters whose name or universe contains this text
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only list one group: all, Anime, Games or Cartoons
    #[arg(long, default_value = "all")]
    pub group: GroupFilter,

    /// Character indices to compare (at most four are kept)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the config file (if any), then explicit flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };

        if let Some(url) = &self.url {
            settings.wiki_url = url.clone();
        }
        if let Some(proxy) = &self.proxy_endpoint {
            settings.proxy_endpoint = proxy.clone();
        }
        if let Some(image_proxy) = &self.image_proxy {
            settings.image_rewrite.proxy_endpoint = image_proxy.clone();
        }
        if let Some(input) = &self.input_file {
            settings.input_file = Some(input.clone());
        }
        if let Some(output) = &self.output_path {
            settings.output_path = output.clone();
        }
        if let Some(filename) = &self.filename {
            settings.export_filename = filename.clone();
        }
        if self.seed.is_some() {
            settings.stats_seed = self.seed;
        }

        Ok(settings)
    }
}
