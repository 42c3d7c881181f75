use std::path::PathBuf;

use rspotify::ClientError;
use thiserror::Error;

/// Errors produced while downloading or converting playlists
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse data, error: {0}")]
    ParseError(String),

    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("No raw data directory found at {0:?}. Please download playlists first.")]
    MissingRawDirectory(PathBuf),

    #[error("No playlist files found in {0:?}")]
    NoPlaylistFiles(PathBuf),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
