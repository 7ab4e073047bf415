//! Wikipedia pageviews and article text.

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use cadenza_core::derive::strip_markup;

use crate::clients::{http_client, url_with_segments, WikiService};
use crate::error::{FetchError, FetchResult};

const SOURCE_NAME: &str = "wikipedia";

/// Length of the pageview window, in days before today.
pub const PAGEVIEW_WINDOW_DAYS: i64 = 30;

// Attribute MediaWiki puts on a <page> element for a title it doesn't know.
const MISSING_PAGE: &str = "missing=\"\"";

/// Wikimedia REST and MediaWiki action API client.
#[derive(Debug, Clone)]
pub struct WikimediaClient {
    http: Client,
    stats_base_url: String,
    api_url: String,
}

impl WikimediaClient {
    /// Create a new Wikipedia client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        stats_base_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> FetchResult<Self> {
        Ok(Self {
            http: http_client()?,
            stats_base_url: stats_base_url.into(),
            api_url: api_url.into(),
        })
    }

    fn views_url(&self, title: &str, today: NaiveDate) -> FetchResult<reqwest::Url> {
        let (start, end) = pageview_window(today);
        let article = title.replace(' ', "_");
        url_with_segments(
            &self.stats_base_url,
            &[&article, "daily", &start, &end],
            SOURCE_NAME,
        )
    }
}

/// First and last day of the pageview window ending `today`, as `YYYYMMDD`.
#[must_use]
pub fn pageview_window(today: NaiveDate) -> (String, String) {
    let start = today - Duration::days(PAGEVIEW_WINDOW_DAYS);
    (
        start.format("%Y%m%d").to_string(),
        today.format("%Y%m%d").to_string(),
    )
}

#[async_trait]
impl WikiService for WikimediaClient {
    async fn monthly_views(&self, title: &str) -> FetchResult<Value> {
        log::debug!("Fetching pageviews for {:?}", title);
        let url = self.views_url(title, Local::now().date_naive())?;

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(title, SOURCE_NAME));
        }
        let response = response
            .error_for_status()
            .map_err(|e| FetchError::http(SOURCE_NAME, e))?;

        response
            .json()
            .await
            .map_err(|e| FetchError::parse(SOURCE_NAME, e))
    }

    async fn page_text(&self, title: &str) -> FetchResult<String> {
        log::debug!("Fetching article text for {:?}", title);
        let raw = self
            .http
            .get(&self.api_url)
            .query(&[
                ("format", "xml"),
                ("action", "query"),
                ("prop", "extracts"),
                ("titles", title),
                ("redirects", "true"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| FetchError::http(SOURCE_NAME, e))?
            .text()
            .await
            .map_err(|e| FetchError::parse(SOURCE_NAME, e))?;

        if raw.contains(MISSING_PAGE) {
            return Err(FetchError::not_found(title, SOURCE_NAME));
        }
        Ok(strip_markup(&raw))
    }
}
