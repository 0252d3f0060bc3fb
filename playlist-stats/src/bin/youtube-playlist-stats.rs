use eyre::Context;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_playlist_stats::youtube_api::YouTubeClient;
use youtube_playlist_stats::{Config, pipeline, report};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let config = Config::from_env(std::env::args().nth(1)).context("load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let http_client = reqwest::Client::builder()
        .build()
        .context("build HTTP client")?;
    let yt = YouTubeClient::new(config.api_key, http_client);

    tracing::info!(playlist_id = %config.playlist_id, "getting videos in playlist");
    let entries = pipeline::enumerate(&yt, &config.playlist_id)
        .await
        .with_context(|| format!("enumerate playlist {}", config.playlist_id))?;
    tracing::info!("found {} videos in the playlist", entries.len());

    let rows = pipeline::aggregate(&yt, &entries)
        .await
        .context("collect video statistics")?;

    report::write_csv(&rows, std::io::stdout().lock()).context("write report")?;

    Ok(())
}
