//! An in-process fake of the YouTube Data API for tests.
//!
//! Serves canned `playlistItems.list` pages (keyed by `pageToken`) and `videos.list` responses
//! (keyed by `id`) over plain HTTP on a random local port, and records every request it sees so
//! tests can assert on exactly which calls were made.

use crate::youtube_api::YouTubeClient;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode, body};
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub(crate) struct Canned {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

impl Canned {
    pub(crate) fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
        }
    }

    pub(crate) fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }
}

/// A request as seen by the fake API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recorded {
    /// `"playlistItems"`, `"videos"` or whatever else was asked for.
    pub(crate) endpoint: String,
    pub(crate) query: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Routes {
    /// Playlist pages by page token; the first page is stored under `""`.
    pages: HashMap<String, Canned>,
    videos: HashMap<String, Canned>,
}

#[derive(Debug, Default)]
pub(crate) struct MockYouTubeBuilder {
    routes: Routes,
}

impl MockYouTubeBuilder {
    /// Serves `video_ids` as the page reached with `token` (`None` for the first page).
    pub(crate) fn page(
        self,
        token: Option<&str>,
        video_ids: &[&str],
        next: Option<&str>,
    ) -> Self {
        let items: Vec<_> = video_ids
            .iter()
            .map(|id| json!({ "kind": "youtube#playlistItem", "contentDetails": { "videoId": id } }))
            .collect();
        let mut body = json!({
            "kind": "youtube#playlistItemListResponse",
            "items": items,
            "pageInfo": { "totalResults": video_ids.len(), "resultsPerPage": 50 },
        });
        if let Some(next) = next {
            body["nextPageToken"] = json!(next);
        }
        self.page_response(token, Canned::ok(body))
    }

    pub(crate) fn page_response(mut self, token: Option<&str>, response: Canned) -> Self {
        self.routes
            .pages
            .insert(token.unwrap_or_default().to_string(), response);
        self
    }

    /// Serves a well-formed video resource with the given title and counters.
    pub(crate) fn video(
        self,
        id: &str,
        title: &str,
        views: u64,
        likes: u64,
        comments: u64,
    ) -> Self {
        let body = json!({
            "kind": "youtube#videoListResponse",
            "items": [{
                "id": id,
                "snippet": { "title": title, "publishedAt": "2023-11-14T16:00:00Z" },
                "statistics": {
                    "viewCount": views.to_string(),
                    "likeCount": likes.to_string(),
                    "favoriteCount": "0",
                    "commentCount": comments.to_string(),
                },
            }],
        });
        self.video_response(id, Canned::ok(body))
    }

    pub(crate) fn video_response(mut self, id: &str, response: Canned) -> Self {
        self.routes.videos.insert(id.to_string(), response);
        self
    }

    pub(crate) async fn start(self) -> MockYouTube {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to localhost");
        let addr = listener.local_addr().expect("get local address");
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((conn, _)) = listener.accept().await else {
                    break;
                };
                let conn = hyper_util::rt::TokioIo::new(conn);
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                let service = service_fn(move |req: Request<body::Incoming>| {
                    let canned = respond(&routes, &recorded, &req);
                    async move {
                        let mut response = Response::new(Full::<Bytes>::from(canned.body));
                        *response.status_mut() = canned.status;
                        Ok::<_, Infallible>(response)
                    }
                });
                tokio::spawn(
                    hyper::server::conn::http1::Builder::new().serve_connection(conn, service),
                );
            }
        });

        MockYouTube { addr, requests }
    }
}

fn respond(
    routes: &Routes,
    recorded: &Mutex<Vec<Recorded>>,
    req: &Request<body::Incoming>,
) -> Canned {
    let endpoint = req
        .uri()
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let query: HashMap<String, String> =
        form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
            .into_owned()
            .collect();

    let canned = match &*endpoint {
        "playlistItems" => routes
            .pages
            .get(query.get("pageToken").map(String::as_str).unwrap_or_default())
            .cloned(),
        "videos" => query.get("id").and_then(|id| routes.videos.get(id)).cloned(),
        _ => None,
    };

    recorded
        .lock()
        .expect("request log lock poisoned")
        .push(Recorded { endpoint, query });

    canned.unwrap_or_else(|| Canned::status(404, r#"{"error":{"code":404}}"#))
}

/// A running fake API.
pub(crate) struct MockYouTube {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockYouTube {
    pub(crate) fn builder() -> MockYouTubeBuilder {
        MockYouTubeBuilder::default()
    }

    /// A client pointed at this fake, using the key `test-key`.
    pub(crate) fn client(&self) -> YouTubeClient {
        YouTubeClient::with_api_base(
            "test-key",
            reqwest::Client::new(),
            format!("http://{}/youtube/v3", self.addr),
        )
    }

    /// Every request received so far, in arrival order.
    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests
            .lock()
            .expect("request log lock poisoned")
            .clone()
    }

    /// The requests received so far for one endpoint.
    pub(crate) fn requests_to(&self, endpoint: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }
}
