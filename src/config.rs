//! Loading Spotify credentials.
//!
//! Credentials come from a JSON file (`conf/conf_local.json` by default):
//!
//! ```json
//! { "SPOTIFY": { "CLIENT_ID": "...", "CLIENT_SECRET": "...", "REDIRECT_URI": "..." } }
//! ```
//!
//! When the default file does not exist the `RSPOTIFY_*` environment variables are
//! used instead, after loading a `.env` file if one is present.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::clients::errors::{Error, Result};

/// Config file read when no `--config` flag is given
pub const DEFAULT_CONFIG_PATH: &str = "conf/conf_local.json";
/// Redirect URI registered for the app when the config does not name one
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";

/// Credentials handed to the Spotify client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifySettings {
    /// Application client id
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
    /// OAuth redirect URI
    pub redirect_uri: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "SPOTIFY", default)]
    spotify: SpotifySection,
}

#[derive(Deserialize, Default)]
struct SpotifySection {
    #[serde(rename = "CLIENT_ID")]
    client_id: Option<String>,
    #[serde(rename = "CLIENT_SECRET")]
    client_secret: Option<String>,
    #[serde(rename = "REDIRECT_URI")]
    redirect_uri: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SpotifySettings {
    /// Parses the JSON config format
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(contents)
            .map_err(|e| Error::ConfigurationError(format!("invalid config file: {e}")))?;
        let section = file.spotify;
        match (non_empty(section.client_id), non_empty(section.client_secret)) {
            (Some(client_id), Some(client_secret)) => Ok(SpotifySettings {
                client_id,
                client_secret,
                redirect_uri: non_empty(section.redirect_uri)
                    .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            }),
            _ => Err(Error::ConfigurationError(
                "Missing Spotify CLIENT_ID or CLIENT_SECRET in config file".into(),
            )),
        }
    }

    /// Reads the standard `RSPOTIFY_*` variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let client_id = std::env::var("RSPOTIFY_CLIENT_ID")?;
        let client_secret = std::env::var("RSPOTIFY_CLIENT_SECRET")?;
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "RSPOTIFY_CLIENT_ID and RSPOTIFY_CLIENT_SECRET must not be empty".into(),
            ));
        }
        let redirect_uri = non_empty(std::env::var("RSPOTIFY_REDIRECT_URI").ok())
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        Ok(SpotifySettings {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Loads the config file at `path`. Without a path the default file is
    /// read, or the environment when that file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::ConfigurationError(format!(
                    "Config file {path:?} not found"
                )));
            }
            debug!("Reading Spotify credentials from {path:?}");
            let contents = std::fs::read_to_string(path)?;
            return Self::from_json(&contents);
        }

        let path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if path.exists() {
            debug!("Reading Spotify credentials from {path:?}");
            let contents = std::fs::read_to_string(&path)?;
            Self::from_json(&contents)
        } else {
            debug!("{path:?} not found, reading Spotify credentials from environment");
            Self::from_env().map_err(|e| {
                Error::ConfigurationError(format!(
                    "{path:?} not found and environment is incomplete ({e}). Create it with your Spotify credentials."
                ))
            })
        }
    }
}
