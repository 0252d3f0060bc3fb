//! Run configuration: the API credential and the playlist to report on.

use crate::error::Error;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "YOUTUBE_TOKEN";

/// Environment variable that overrides [`DEFAULT_PLAYLIST_ID`].
pub const PLAYLIST_ID_VAR: &str = "YOUTUBE_PLAYLIST_ID";

/// .NET Conf 2023.
pub const DEFAULT_PLAYLIST_ID: &str = "PLdo4fOcmZ0oULyHSPBx-tQzePOYlhvrAU";

/// Everything a run needs to know up front. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub playlist_id: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("playlist_id", &self.playlist_id)
            .finish()
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory, if any, is read first. The playlist given on the
    /// command line (`playlist_arg`) wins over [`PLAYLIST_ID_VAR`].
    pub fn from_env(playlist_arg: Option<String>) -> Result<Self, Error> {
        if let Err(e) = dotenv::dotenv() {
            tracing::trace!(error = %e, "no .env file loaded");
        }
        Self::from_lookup(playlist_arg, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(playlist_arg: Option<String>, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "couldn't find required secret {API_KEY_VAR} in the environment or .env"
                ))
            })?;

        let playlist_id = playlist_arg
            .or_else(|| lookup(PLAYLIST_ID_VAR))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string());

        Ok(Self {
            api_key,
            playlist_id,
        })
    }
}
