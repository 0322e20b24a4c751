use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::crs::DEFAULT_WORKING_EPSG;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub address_base: String,
    pub property_base: String,
    pub admin_base: String,
    /// Proxy tried when the primary kommuneinfo endpoint fails
    pub admin_fallback_base: String,
    pub place_base: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address_base: "https://ws.geonorge.no/adresser/v1".to_string(),
            property_base: "https://api.kartverket.no/eiendom/v1".to_string(),
            admin_base: "https://api.kartverket.no/kommuneinfo/v1".to_string(),
            admin_fallback_base: "https://ws.geonorge.no/kommuneinfo/v1".to_string(),
            place_base: "https://api.kartverket.no/stedsnavn/v1".to_string(),
            user_agent: format!("kvseek/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Projection results are requested in (`utkoordsys`)
    pub working_epsg: u32,
    pub address_page_size: u32,
    pub place_page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            working_epsg: DEFAULT_WORKING_EPSG,
            address_page_size: 100,
            place_page_size: 200,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
