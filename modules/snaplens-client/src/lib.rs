pub mod error;
pub mod types;

pub use error::{Result, SnapClientError};
pub use types::RawResponse;

use std::time::Duration;

use snaplens_common::config::{Config, DEFAULT_API_HOST, DEFAULT_TIMEOUT_SECS};

const USER_DETAIL_PATH: &str = "/api/v1/users/detail";

pub struct SnapClient {
    client: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl SnapClient {
    /// Client for the public RapidAPI host.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::build(
            api_key,
            DEFAULT_API_HOST,
            &format!("https://{DEFAULT_API_HOST}"),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        Self::build(
            api_key,
            &config.api_host,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build(api_key: &str, host: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Point the client at a different server. The `x-rapidapi-host` header
    /// keeps the configured host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the user-detail document for a username.
    ///
    /// Returns the status and body for every HTTP status; only transport
    /// failures are errors. One request, no retries.
    pub async fn user_detail(&self, username: &str) -> Result<RawResponse> {
        tracing::info!(username, "Fetching Snapchat user detail");

        let url = user_detail_url(&self.base_url, username);
        let resp = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            tracing::info!(status = status.as_u16(), bytes = body.len(), "User detail received");
        } else {
            tracing::warn!(status = status.as_u16(), username, "User detail request failed");
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// `<base>/api/v1/users/detail?username=<handle>`, with the handle escaped
/// like `encodeURIComponent` (space as `%20`, `!'()*` left as-is).
fn user_detail_url(base_url: &str, username: &str) -> String {
    let encoded = urlencoding::encode(username)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*");
    format!("{base_url}{USER_DETAIL_PATH}?username={encoded}")
}
