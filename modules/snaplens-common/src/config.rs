use crate::error::{Result, SnapLensError};

/// Default RapidAPI host for the Snapchat scraper API.
pub const DEFAULT_API_HOST: &str = "snapchat-scraper2.p.rapidapi.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// The API key is optional here; it is checked right before a lookup so the
/// CLI flag can supply it instead.
#[derive(Debug, Clone)]
pub struct Config {
    // RapidAPI
    pub api_key: Option<String>,
    pub api_host: String,

    // HTTP
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build the config from any variable source; blank values count as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let api_host = var("SNAPLENS_API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let base_url = var("SNAPLENS_BASE_URL").unwrap_or_else(|| format!("https://{api_host}"));

        let timeout_secs = match var("SNAPLENS_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                SnapLensError::Config(format!("SNAPLENS_TIMEOUT_SECS must be a number, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: var("RAPIDAPI_KEY"),
            api_host,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val
                .char_indices()
                .nth(5)
                .map(|(i, _)| i)
                .unwrap_or(val.len());
            format!("{}...({} chars)", &val[..n], val.chars().count())
        }

        tracing::info!("Config loaded:");
        tracing::info!(
            "  RAPIDAPI_KEY: {}",
            self.api_key
                .as_deref()
                .map(preview)
                .unwrap_or_else(|| "<not set>".to_string())
        );
        tracing::info!("  SNAPLENS_API_HOST: {}", self.api_host);
        tracing::info!("  SNAPLENS_BASE_URL: {}", self.base_url);
        tracing::info!("  SNAPLENS_TIMEOUT_SECS: {}", self.timeout_secs);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: format!("https://{DEFAULT_API_HOST}"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
