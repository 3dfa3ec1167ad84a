// One lookup: validate input, issue the single user-detail request, and
// classify what came back.

use snaplens_client::SnapClient;
use snaplens_common::{extract_profile, normalize_handle, ProfileRecord, SnapLensError};
use tracing::{info, warn};

/// A validated lookup, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub handle: String,
    pub api_key: String,
}

impl LookupRequest {
    /// Check the credential first, then the handle, before any request goes out.
    pub fn new(raw_input: &str, api_key: Option<&str>) -> snaplens_common::Result<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SnapLensError::MissingApiKey)?;
        let handle = normalize_handle(raw_input).ok_or(SnapLensError::MissingHandle)?;

        Ok(Self {
            handle,
            api_key: api_key.to_string(),
        })
    }

    pub async fn run(&self, client: &SnapClient) -> Lookup {
        info!(handle = self.handle.as_str(), "Looking up profile");

        match client.user_detail(&self.handle).await {
            Ok(raw) => {
                let outcome = if !raw.is_success() {
                    LookupOutcome::HttpError { status: raw.status }
                } else {
                    match extract_profile(&raw.json()) {
                        Some(profile) => LookupOutcome::Found(Box::new(profile)),
                        None => LookupOutcome::NoProfile,
                    }
                };
                Lookup {
                    outcome,
                    raw: raw.body,
                }
            }
            Err(err) => {
                warn!(error = %err, "Lookup request failed");
                Lookup {
                    raw: err.to_string(),
                    outcome: LookupOutcome::RequestFailed(err.to_string()),
                }
            }
        }
    }
}

/// Result of one lookup plus the raw response text (or error text).
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub outcome: LookupOutcome,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Box<ProfileRecord>),
    /// 2xx response without a recognizable profile (including non-JSON bodies).
    NoProfile,
    HttpError { status: u16 },
    /// Transport failure; no response was received.
    RequestFailed(String),
}

impl LookupOutcome {
    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            LookupOutcome::Found(profile) => Some(profile.as_ref()),
            _ => None,
        }
    }
}
