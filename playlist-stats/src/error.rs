//! Error taxonomy for the retrieval pipeline.
//!
//! Every error is terminal: the pipeline never retries and never substitutes a placeholder for
//! missing data. [`Error::kind`] collapses the variants onto the three broad failure classes.

use http::StatusCode;

/// The broad class an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration (the API credential) is missing.
    Config,
    /// The network call failed, or the API answered with a non-success status.
    Transport,
    /// The API answered, but the body or one of its fields could not be understood.
    Parse,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("send {endpoint} request to YouTube API")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("YouTube API {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("parse YouTube {endpoint} API response as JSON")]
    Json {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no video resource returned for {video_id}")]
    MissingVideo { video_id: String },

    #[error("invalid {field} for video {video_id}: {reason}")]
    Field {
        video_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("fetch details for video {video_id} (playlist position {position})")]
    Video {
        video_id: String,
        position: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Transport { .. } | Error::Status { .. } => ErrorKind::Transport,
            Error::Json { .. } | Error::MissingVideo { .. } | Error::Field { .. } => {
                ErrorKind::Parse
            }
            Error::Video { source, .. } => source.kind(),
        }
    }

    /// Wraps a transport failure, dropping the request URL since it carries the API key.
    pub(crate) fn transport(endpoint: &'static str, source: reqwest::Error) -> Self {
        Error::Transport {
            endpoint,
            source: source.without_url(),
        }
    }
}
