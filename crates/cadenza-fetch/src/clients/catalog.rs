//! Catalog client for the Spotify Web API proxy.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::clients::{get_json, http_client, url_with_segments, CatalogService};
use crate::error::{FetchError, FetchResult};

pub(crate) const SOURCE_NAME: &str = "catalog";

/// Spotify catalog client.
///
/// Talks to a proxy exposing the Spotify Web API paths without
/// authentication. The proxy throttles bursts, so callers space out
/// multi-request sequences (see [`crate::Cooldown`]).
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    chart_playlist_id: String,
}

impl SpotifyClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        chart_playlist_id: impl Into<String>,
    ) -> FetchResult<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.into(),
            chart_playlist_id: chart_playlist_id.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> FetchResult<reqwest::Url> {
        url_with_segments(&self.base_url, segments, SOURCE_NAME)
    }
}

#[async_trait]
impl CatalogService for SpotifyClient {
    async fn search_artist(&self, name: &str) -> FetchResult<Value> {
        log::info!("Searching catalog for artist {:?}", name);
        let url = self.url(&["search"])?;
        let query = format!("artist:{name}");
        get_json(
            self.http
                .get(url)
                .query(&[("q", query.as_str()), ("type", "artist")]),
            SOURCE_NAME,
        )
        .await
    }

    async fn discography(&self, artist_id: &str) -> FetchResult<Value> {
        log::info!("Fetching discography for {}", artist_id);
        let url = self.url(&["artists", artist_id, "albums"])?;
        get_json(self.http.get(url), SOURCE_NAME).await
    }

    async fn top_tracks(&self, artist_id: &str) -> FetchResult<Value> {
        log::info!("Fetching top tracks for {}", artist_id);
        let url = self.url(&["artists", artist_id, "top-tracks"])?;
        get_json(self.http.get(url), SOURCE_NAME).await
    }

    async fn chart_playlist(&self) -> FetchResult<Value> {
        log::info!("Fetching chart playlist {}", self.chart_playlist_id);
        let url = self.url(&["playlists", &self.chart_playlist_id])?;
        get_json(self.http.get(url), SOURCE_NAME).await
    }

    async fn audio_features(&self, track_ids: &[String]) -> FetchResult<Value> {
        if track_ids.is_empty() {
            return Err(FetchError::InvalidInput(
                "audio features requested for no tracks".to_string(),
            ));
        }
        log::info!("Fetching audio features for {} tracks", track_ids.len());
        let url = self.url(&["audio-features"])?;
        get_json(
            self.http.get(url).query(&[("ids", track_ids.join(","))]),
            SOURCE_NAME,
        )
        .await
    }
}
