use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GenomesError;
use crate::listing::DEFAULT_GENOMES_BASE_URL;
use crate::taxonomy::DEFAULT_TAXONOMY_URL;

pub const DEFAULT_CONFIG_FILE: &str = "ncbi-genomes.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub genomes_base_url: Option<String>,
    #[serde(default)]
    pub taxonomy_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub genomes_base_url: String,
    pub taxonomy_url: String,
    pub timeout: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ConfigLoader::resolve_config(Config::default())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// An explicit path must exist. Without one, `ncbi-genomes.json` in the
    /// working directory is used when present, defaults otherwise.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, GenomesError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| GenomesError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| GenomesError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        ResolvedConfig {
            genomes_base_url: config
                .genomes_base_url
                .unwrap_or_else(|| DEFAULT_GENOMES_BASE_URL.to_string()),
            taxonomy_url: config
                .taxonomy_url
                .unwrap_or_else(|| DEFAULT_TAXONOMY_URL.to_string()),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(60)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        let resolved = ConfigLoader::resolve_config(config);
        assert_eq!(resolved.timeout, Duration::from_secs(5));
        assert_eq!(resolved.genomes_base_url, DEFAULT_GENOMES_BASE_URL);
        assert_eq!(resolved.taxonomy_url, DEFAULT_TAXONOMY_URL);
    }
}
