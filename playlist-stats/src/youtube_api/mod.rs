//! YouTube Data API v3 client library.
//!
//! Covers the two read-only endpoints needed to report on a playlist, both usable with a plain
//! API key (no OAuth):
//!
//! - `playlistItems.list`, exposed as the paginated [`YouTubeClient::list_playlist_items`]
//!   stream, which yields the playlist's entries in order and transparently follows
//!   `nextPageToken` until the last page.
//! - `videos.list`, exposed as [`YouTubeClient::get_video`], which returns the snippet and
//!   statistics of a single video.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tokio_stream::StreamExt;
//! use youtube_playlist_stats::youtube_api::YouTubeClient;
//!
//! # async fn example() -> Result<(), youtube_playlist_stats::Error> {
//! let client = YouTubeClient::new("my-api-key", reqwest::Client::new());
//!
//! let mut items = std::pin::pin!(client.list_playlist_items("PLdo4fOcmZ0oULyHSPBx-tQzePOYlhvrAU"));
//! while let Some(item) = items.next().await {
//!     let video = client.get_video(&item?.content_details.video_id).await?;
//!     println!("{}: {:?} views", video.snippet.title, video.statistics.view_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod playlist_items;
pub mod types;
pub mod videos;

pub use client::YouTubeClient;
pub use types::{PageInfo, PagedStream};

pub use playlist_items::{PlaylistItem, PlaylistItemContentDetails};
pub use videos::{Video, VideoSnippet, VideoStatistics};
