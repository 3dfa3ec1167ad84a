use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapLensError>;

#[derive(Error, Debug)]
pub enum SnapLensError {
    #[error("Bitte RapidAPI Key eingeben.")]
    MissingApiKey,

    #[error("Bitte Snapchat-Username oder URL eingeben.")]
    MissingHandle,

    #[error("Configuration error: {0}")]
    Config(String),
}
