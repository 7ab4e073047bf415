//! Lyrics client for lyrics.ovh.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::clients::{http_client, url_with_segments, LyricsService};
use crate::error::{FetchError, FetchResult};

const SOURCE_NAME: &str = "lyrics.ovh";

/// The body lyrics.ovh sends (with a 404) for an unknown song.
const NO_LYRICS: &str = "No lyrics found";

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    #[serde(default)]
    lyrics: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// lyrics.ovh API client.
#[derive(Debug, Clone)]
pub struct LyricsOvhClient {
    http: Client,
    base_url: String,
}

impl LyricsOvhClient {
    /// Create a new lyrics client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> FetchResult<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.into(),
        })
    }
}

/// Map a decoded body to lyrics, a not-found signal, or a failure.
fn interpret(body: LyricsResponse, song: &str) -> FetchResult<String> {
    match body {
        LyricsResponse {
            lyrics: Some(lyrics),
            ..
        } => Ok(lyrics),
        LyricsResponse {
            error: Some(error), ..
        } if error == NO_LYRICS => Err(FetchError::not_found(song, SOURCE_NAME)),
        LyricsResponse {
            error: Some(error), ..
        } => Err(FetchError::http(SOURCE_NAME, error)),
        LyricsResponse { .. } => Err(FetchError::parse(
            SOURCE_NAME,
            "response holds neither lyrics nor an error",
        )),
    }
}

#[async_trait]
impl LyricsService for LyricsOvhClient {
    async fn lyrics(&self, artist: &str, title: &str) -> FetchResult<String> {
        let song = format!("{title} by {artist}");
        log::info!("Fetching lyrics for {}", song);

        let url = url_with_segments(&self.base_url, &[artist, title], SOURCE_NAME)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();

        // The not-found answer arrives with an error status, so decode first.
        match response.json::<LyricsResponse>().await {
            Ok(body) => interpret(body, &song),
            Err(_) if !status.is_success() => {
                Err(FetchError::http(SOURCE_NAME, format!("status {status}")))
            }
            Err(e) => Err(FetchError::parse(SOURCE_NAME, e)),
        }
    }
}
