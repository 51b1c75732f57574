//! Error types for holobooth.

use hand_track::TrackError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoothError {
    #[error("tracking error: {0}")]
    Track(#[from] TrackError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input source `{0}` is not compiled in (rebuild with `--features {0}`)")]
    UnsupportedSource(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, BoothError>;
