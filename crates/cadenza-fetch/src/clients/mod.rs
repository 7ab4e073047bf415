//! Service clients for the catalog, lyrics and Wikipedia APIs.
//!
//! Each service sits behind a trait so the orchestrator can be driven by
//! in-process fakes. Catalog and pageview calls hand back the upstream JSON
//! untouched; validation happens in [`crate::library`].

pub mod catalog;
pub mod lyrics;
pub mod wiki;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::{FetchError, FetchResult};

pub use catalog::SpotifyClient;
pub use lyrics::LyricsOvhClient;
pub use wiki::WikimediaClient;

pub(crate) const USER_AGENT: &str = "cadenza/0.1.0 (https://github.com/oxur/cadenza)";

/// Music catalog: artist search, discographies, top tracks, the chart
/// playlist and audio features.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Search artists by free-text name, best match first.
    async fn search_artist(&self, name: &str) -> FetchResult<Value>;

    /// An artist's albums and singles.
    async fn discography(&self, artist_id: &str) -> FetchResult<Value>;

    /// An artist's top 10 tracks.
    async fn top_tracks(&self, artist_id: &str) -> FetchResult<Value>;

    /// This week's chart playlist.
    async fn chart_playlist(&self) -> FetchResult<Value>;

    /// Audio features for each of `track_ids`, in order.
    async fn audio_features(&self, track_ids: &[String]) -> FetchResult<Value>;
}

/// Song lyrics by artist and title.
#[async_trait]
pub trait LyricsService: Send + Sync {
    /// Full lyric text, or [`FetchError::NotFound`] when the service has no
    /// lyrics for the song.
    async fn lyrics(&self, artist: &str, title: &str) -> FetchResult<String>;
}

/// Wikipedia pageview statistics and article text.
#[async_trait]
pub trait WikiService: Send + Sync {
    /// Daily pageviews of an article over the last 30 days, or
    /// [`FetchError::NotFound`] for an unknown article.
    async fn monthly_views(&self, title: &str) -> FetchResult<Value>;

    /// Article text with markup removed.
    async fn page_text(&self, title: &str) -> FetchResult<String>;
}

/// Build the shared HTTP client used by every service.
pub(crate) fn http_client() -> FetchResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(FetchError::from)
}

/// Send `request` and decode a JSON body, treating error statuses and
/// `{"error": ...}` bodies as failures.
pub(crate) async fn get_json(request: RequestBuilder, source_name: &str) -> FetchResult<Value> {
    let response = request
        .send()
        .await?
        .error_for_status()
        .map_err(|e| FetchError::http(source_name, e))?;

    let value: Value = response
        .json()
        .await
        .map_err(|e| FetchError::parse(source_name, e))?;

    if let Some(error) = value.get("error") {
        return Err(FetchError::http(source_name, error));
    }

    Ok(value)
}

/// Append URL-encoded path segments to `base`.
pub(crate) fn url_with_segments(
    base: &str,
    segments: &[&str],
    source_name: &str,
) -> FetchResult<reqwest::Url> {
    let mut url = reqwest::Url::parse(base).map_err(|e| FetchError::http(source_name, e))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::http(source_name, format!("cannot extend URL {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
