use anyhow::{bail, Context, Result};

use crate::layout::{default_page_config, FontFamily, PageConfig, PageSize};

const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    pub font_family: FontFamily,
    /// OpenWeatherMap key; the weather tool is unavailable without it.
    pub weather_api_key: Option<String>,
    pub weather_api_url: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            page_size: PageSize::A4,
            font_family: FontFamily::Helvetica,
            weather_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let page_size = match lookup("RESUME_PAGE_SIZE") {
            Some(v) => PageSize::from_name(&v)
                .with_context(|| format!("RESUME_PAGE_SIZE must be 'a4' or 'letter', got '{v}'"))?,
            None => defaults.page_size,
        };
        let font_family = match lookup("RESUME_FONT") {
            Some(v) => FontFamily::from_name(&v).with_context(|| {
                format!("RESUME_FONT must be 'helvetica' or 'courier', got '{v}'")
            })?,
            None => defaults.font_family,
        };
        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            None => defaults.max_upload_bytes,
        };
        if max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be a positive integer");
        }

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            page_size,
            font_family,
            weather_api_key: lookup("WEATHER_API_KEY").filter(|k| !k.trim().is_empty()),
            weather_api_url: lookup("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            max_upload_bytes,
        })
    }

    /// Page geometry for the resume builder.
    pub fn page_config(&self) -> PageConfig {
        default_page_config(self.page_size, self.font_family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.font_family, FontFamily::Helvetica);
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("RESUME_PAGE_SIZE", "letter"),
            ("RESUME_FONT", "courier"),
            ("WEATHER_API_KEY", "abc"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.font_family, FontFamily::Courier);
        assert_eq!(config.weather_api_key.as_deref(), Some("abc"));
        assert_eq!(config.page_config().page_size, PageSize::Letter);
    }

    #[test]
    fn test_blank_weather_key_counts_as_missing() {
        let config = config_from(&[("WEATHER_API_KEY", "  ")]).unwrap();
        assert!(config.weather_api_key.is_none());
    }

    #[test]
    fn test_malformed_values_fail() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("RESUME_PAGE_SIZE", "tabloid")]).is_err());
        assert!(config_from(&[("RESUME_FONT", "comic sans")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_BYTES", "0")]).is_err());
    }
}
