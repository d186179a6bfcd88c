//! Runtime configuration
//!
//! Defaults match the layout the front end ships with: both tables under
//! `data/` and the detail page next to the map. Each value can be overridden
//! from the environment.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::source::DataSource;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PAYROLL_SOURCE: &str = "data/winspay.csv";
pub const DEFAULT_PERFORMANCE_SOURCE: &str = "data/Spend vs Wins_data.csv";
pub const DEFAULT_DETAIL_PAGE_URL: &str = "http://127.0.0.1:8080/team.html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("invalid DETAIL_PAGE_URL {value:?}: {message}")]
    InvalidUrl { value: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bind address of the API server
    pub host: String,
    pub port: u16,
    /// Path or URL of the payroll snapshot (CSV)
    pub payroll_source: String,
    /// Path or URL of the yearly export (UTF-16LE TSV)
    pub performance_source: String,
    /// Base URL team links point at
    pub detail_page_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            payroll_source: DEFAULT_PAYROLL_SOURCE.to_string(),
            performance_source: DEFAULT_PERFORMANCE_SOURCE.to_string(),
            detail_page_url: DEFAULT_DETAIL_PAGE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Read `HOST`, `PORT`, `PAYROLL_SOURCE`, `PERFORMANCE_SOURCE` and
    /// `DETAIL_PAGE_URL`, keeping the default for any that is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(source) = lookup("PAYROLL_SOURCE") {
            config.payroll_source = source;
        }
        if let Some(source) = lookup("PERFORMANCE_SOURCE") {
            config.performance_source = source;
        }
        if let Some(url) = lookup("DETAIL_PAGE_URL") {
            config.detail_page_url = url;
        }

        config.detail_page()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn payroll(&self) -> DataSource {
        DataSource::parse(&self.payroll_source)
    }

    pub fn performance(&self) -> DataSource {
        DataSource::parse(&self.performance_source)
    }

    pub fn detail_page(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.detail_page_url).map_err(|e| ConfigError::InvalidUrl {
            value: self.detail_page_url.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.payroll(),
            DataSource::File(PathBuf::from("data/winspay.csv"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("PERFORMANCE_SOURCE", "https://example.org/spend.tsv"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.performance(),
            DataSource::Url("https://example.org/spend.tsv".to_string())
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidPort("eighty".to_string()))
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("DETAIL_PAGE_URL", "team.html")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
