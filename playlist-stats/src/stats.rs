//! The records that flow through the pipeline, and the folding of API resources into them.

use crate::error::Error;
use crate::youtube_api::Video;
use jiff::Timestamp;

/// One video's membership in a playlist.
///
/// `position` is the zero-based index in the order the playlist was enumerated, which is the
/// playlist's own order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub position: usize,
}

/// Engagement statistics and metadata of a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub video_id: String,
    pub title: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: Timestamp,
}

impl TryFrom<Video> for VideoStats {
    type Error = Error;

    fn try_from(video: Video) -> Result<Self, Self::Error> {
        let statistics = &video.statistics;
        let view_count = parse_count(&video.id, "viewCount", statistics.view_count.as_deref())?;
        let like_count = parse_count(&video.id, "likeCount", statistics.like_count.as_deref())?;
        let comment_count = parse_count(
            &video.id,
            "commentCount",
            statistics.comment_count.as_deref(),
        )?;

        Ok(Self {
            title: video.snippet.title,
            published_at: video.snippet.published_at,
            view_count,
            like_count,
            comment_count,
            video_id: video.id,
        })
    }
}

/// Parses a statistics counter the way the API encodes it: an unsigned decimal string.
///
/// Only ASCII digits are accepted. Signs, whitespace, digit grouping and anything else a
/// locale-aware parser might tolerate are rejected, as is a value that does not fit in `u64` or
/// a counter the API left out. None of these ever turn into zero.
pub fn parse_count(video_id: &str, field: &'static str, raw: Option<&str>) -> Result<u64, Error> {
    let invalid = |reason: String| Error::Field {
        video_id: video_id.to_string(),
        field,
        reason,
    };

    let raw = raw.ok_or_else(|| invalid("missing from response".to_string()))?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("{raw:?} is not a decimal count")));
    }
    raw.parse::<u64>()
        .map_err(|e| invalid(format!("{raw:?}: {e}")))
}

/// The canonical watch page of a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// One line of the report: a playlist entry joined with that video's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub position: usize,
    pub url: String,
    pub stats: VideoStats,
}

impl ReportRow {
    /// Joins an entry with the statistics fetched for it.
    ///
    /// The identity comes from the playlist entry, so the row reports the video that was
    /// listed even if the API echoes back an id in a different form.
    pub fn new(entry: &PlaylistEntry, stats: VideoStats) -> Self {
        Self {
            position: entry.position,
            url: watch_url(&entry.video_id),
            stats: VideoStats {
                video_id: entry.video_id.clone(),
                ..stats
            },
        }
    }

    pub fn video_id(&self) -> &str {
        &self.stats.video_id
    }
}
