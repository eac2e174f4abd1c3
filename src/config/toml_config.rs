use crate::config::Settings;
use crate::utils::error::{Result, ScraperError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based configuration. Every section and key may be left out.
///
/// ```toml
/// [source]
/// url = "https://intothespiderverse.fandom.com/wiki/Category:Characters"
/// proxy_endpoint = "https://api.allorigins.win/raw"
///
/// [images]
/// proxy_endpoint = "https://images.weserv.nl/"
/// hosts = ["fandom.com"]
///
/// [export]
/// output_path = "./output"
/// filename = "spiderverse-characters.csv"
///
/// [stats]
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub proxy_endpoint: Option<String>,
    pub input_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    pub proxy_endpoint: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    pub seed: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScraperError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScraperError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScraperError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Layers this file over [`Settings::default`].
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();

        if let Some(url) = self.source.url {
            settings.wiki_url = url;
        }
        if let Some(proxy) = self.source.proxy_endpoint {
            settings.proxy_endpoint = proxy;
        }
        settings.input_file = self.source.input_file;

        let images = self.images;
        let rewrite = &mut settings.image_rewrite;
        if let Some(proxy) = images.proxy_endpoint {
            rewrite.proxy_endpoint = proxy;
        }
        if let Some(hosts) = images.hosts {
            rewrite.hosts = hosts;
        }
        if let Some(width) = images.width {
            rewrite.width = width;
        }
        if let Some(height) = images.height {
            rewrite.height = height;
        }
        if let Some(fit) = images.fit {
            rewrite.fit = fit;
        }

        if let Some(output_path) = self.export.output_path {
            settings.output_path = output_path;
        }
        if let Some(filename) = self.export.filename {
            settings.export_filename = filename;
        }
        settings.stats_seed = self.stats.seed;

        settings
    }
}
