//! Core YouTube API client functionality.

use crate::error::Error;
use crate::youtube_api::{
    playlist_items::{PlaylistItem, PlaylistItemListResponse},
    types::PagedStream,
    videos::{Video, VideoListResponse},
};
use http::Method;
use serde::de::DeserializeOwned;
use tokio_stream::Stream;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const DEFAULT_API_BASE: &str = "https://youtube.googleapis.com/youtube/v3";

/// The largest `maxResults` the list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Client for the read-only parts of the YouTube Data API v3 that are reachable with an API key.
///
/// The key is sent as the `key` query parameter on every request. The client holds no mutable
/// state, so a single instance can be shared by reference for the whole run.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl YouTubeClient {
    /// Creates a client that talks to the public YouTube API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - A YouTube Data API key
    /// * `client` - Shared HTTP client for making API requests
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self::with_api_base(api_key, client, DEFAULT_API_BASE)
    }

    /// Creates a client that sends its requests to `api_base` instead of the public API.
    pub fn with_api_base(
        api_key: impl Into<String>,
        client: reqwest::Client,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Makes a keyed HTTP request to the YouTube API and decodes the JSON response.
    ///
    /// Any status outside the 2xx range is turned into [`Error::Status`], carrying whatever body
    /// the API sent along (usually a JSON error document naming the quota or key problem).
    /// Bodies that are not the expected JSON shape become [`Error::Json`].
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    async fn make_keyed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &'static str,
        query_params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = format!("{}/{}", self.api_base, endpoint);

        let response = self
            .client
            .request(method, &url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Status {
                endpoint,
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(endpoint, e))?;
        serde_json::from_str(&body).map_err(|source| Error::Json { endpoint, source })
    }

    /// Returns a paginated stream of every item in the given playlist, in playlist order.
    ///
    /// Pages are requested with the maximum page size, one at a time, and only once the previous
    /// page has been consumed. The stream ends with the first error.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub fn list_playlist_items<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = Result<PlaylistItem, Error>> + use<'a> {
        PagedStream::new(move |page_token| async move {
            let response = self
                .list_playlist_items_internal(playlist_id, MAX_PAGE_SIZE, page_token)
                .await?;
            Ok((response.items, response.next_page_token))
        })
    }

    /// Gets the snippet and statistics of a single video by its ID.
    ///
    /// Returns [`Error::MissingVideo`] if the API knows no such (public) video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: &str) -> Result<Video, Error> {
        let query_params = [("part", "snippet,statistics"), ("id", video_id)];

        let videos: VideoListResponse = self
            .make_keyed_request(Method::GET, "videos", &query_params)
            .await?;

        tracing::debug!(
            video_id,
            returned_items = videos.items.len(),
            "fetched video statistics"
        );

        videos
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::MissingVideo {
                video_id: video_id.to_string(),
            })
    }

    /// Calls `playlistItems.list` for one page of a playlist.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist to list
    /// * `max_results` - Maximum number of items to return per page (1-50)
    /// * `page_token` - Token for retrieving a specific page of results
    #[instrument(skip(self))]
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<PlaylistItemListResponse, Error> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "contentDetails"),
            ("maxResults", max_results_string.as_str()),
            ("playlistId", playlist_id),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let page: PlaylistItemListResponse = self
            .make_keyed_request(Method::GET, "playlistItems", &query_params)
            .await?;

        tracing::debug!(
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            has_next_page = page.next_page_token.as_deref().is_some_and(|t| !t.is_empty()),
            "fetched playlist page"
        );

        Ok(page)
    }
}
