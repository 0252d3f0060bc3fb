//! The two-stage retrieval: enumerate the playlist, then fetch and join each video's statistics.
//!
//! Both stages walk their input strictly one request at a time and fail fast: the first error of
//! any kind ends the run and whatever had been gathered so far is dropped. Nothing is retried.

use crate::error::Error;
use crate::stats::{PlaylistEntry, ReportRow, VideoStats};
use crate::youtube_api::YouTubeClient;
use tokio_stream::StreamExt;
use tracing::instrument;

/// Lists every entry of a playlist, in playlist order.
///
/// Follows continuation tokens until the API stops sending one. If any page fails, the error is
/// returned and the entries from earlier pages are discarded.
#[instrument(skip(client))]
pub async fn enumerate(
    client: &YouTubeClient,
    playlist_id: &str,
) -> Result<Vec<PlaylistEntry>, Error> {
    let items = client.list_playlist_items(playlist_id);
    let mut items = std::pin::pin!(items);

    let mut entries = Vec::new();
    while let Some(item) = items.next().await {
        let item = item?;
        entries.push(PlaylistEntry {
            video_id: item.content_details.video_id,
            position: entries.len(),
        });
    }

    tracing::info!(videos = entries.len(), "enumerated playlist");
    Ok(entries)
}

/// Fetches the statistics of one video.
pub async fn fetch_details(client: &YouTubeClient, video_id: &str) -> Result<VideoStats, Error> {
    let video = client.get_video(video_id).await?;
    VideoStats::try_from(video)
}

/// Fetches the statistics of each entry in turn and joins them into report rows.
///
/// Rows come out in the order of `entries`. The first failure aborts the walk: no further
/// videos are requested, no rows are returned, and the error names the video that failed.
#[instrument(skip_all, fields(videos = entries.len()))]
pub async fn aggregate(
    client: &YouTubeClient,
    entries: &[PlaylistEntry],
) -> Result<Vec<ReportRow>, Error> {
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let stats = match fetch_details(client, &entry.video_id).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(
                    video_id = %entry.video_id,
                    position = entry.position,
                    error = %e,
                    "failed to fetch video details, aborting"
                );
                return Err(Error::Video {
                    video_id: entry.video_id.clone(),
                    position: entry.position,
                    source: Box::new(e),
                });
            }
        };
        tracing::debug!(
            video_id = %entry.video_id,
            views = stats.view_count,
            likes = stats.like_count,
            comments = stats.comment_count,
            "fetched video details"
        );
        rows.push(ReportRow::new(entry, stats));
    }
    Ok(rows)
}

/// Runs both stages for one playlist and returns the complete, ordered set of rows.
pub async fn collect_report(
    client: &YouTubeClient,
    playlist_id: &str,
) -> Result<Vec<ReportRow>, Error> {
    let entries = enumerate(client, playlist_id).await?;
    aggregate(client, &entries).await
}
