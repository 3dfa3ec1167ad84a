use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapClientError>;

#[derive(Debug, Error)]
pub enum SnapClientError {
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SnapClientError {
    fn from(err: reqwest::Error) -> Self {
        SnapClientError::Network(err.to_string())
    }
}
