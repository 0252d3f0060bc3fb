//! Engagement statistics for every video in a YouTube playlist.
//!
//! [`pipeline::collect_report`] enumerates a playlist page by page, fetches each video's
//! statistics in playlist order and joins the two into [`ReportRow`]s, which
//! [`report::write_csv`] renders as CSV.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod youtube_api;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use stats::{PlaylistEntry, ReportRow, VideoStats};
