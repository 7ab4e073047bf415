//! Fetch-or-load orchestration over the cache and the remote services.
//!
//! Every catalog read goes through the cache first. A missing or unreadable
//! artifact is fetched, validated against its typed shape, saved verbatim
//! and returned. Wikipedia data is always fetched live.

use std::collections::HashMap;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use cadenza_core::derive::{
    article_url, explicit_percentage, mean_duration, mean_monthly_views, pop_index,
    reading_minutes, release_histogram, summarize_views, word_count, DerivedMetrics,
    ReleaseHistory, ViewSummary, CHART_LIST_SIZE, TOP_LIST_SIZE,
};
use cadenza_core::model::{
    ArtistRecord, ArtistRegistry, ArtistSearch, AudioFeatures, Charts, Discography, TopTracks,
    Track, WikiViews,
};
use cadenza_core::{ArtifactKey, CacheStore};

use crate::clients::{
    CatalogService, LyricsOvhClient, LyricsService, SpotifyClient, WikiService, WikimediaClient,
};
use crate::config::Config;
use crate::cooldown::Cooldown;
use crate::error::{FetchError, FetchResult};

const CATALOG: &str = "catalog";
const WIKIPEDIA: &str = "wikipedia";

/// Label used for the chart side of a comparison.
pub const CHARTS_LABEL: &str = "the charts";

/// This week's chart playlist together with its audio features.
#[derive(Debug, Clone)]
pub struct ChartSnapshot {
    pub charts: Charts,
    pub features: AudioFeatures,
}

/// Pageview and reading statistics for one Wikipedia article.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiSummary {
    pub title: String,
    pub url: String,
    pub views: ViewSummary,
    pub words: usize,
    pub reading_minutes: f64,
}

/// The library backed by the real HTTP services.
pub type HttpLibrary = Library<SpotifyClient, LyricsOvhClient, WikimediaClient>;

/// Decides, per data kind, whether to read the cache or call a service.
#[derive(Debug)]
pub struct Library<C, L, W> {
    store: CacheStore,
    catalog: C,
    lyrics: L,
    wiki: W,
    cooldown: Cooldown,
}

impl HttpLibrary {
    /// Build a library talking to the services named in `config`.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be created.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Ok(Library::new(
            CacheStore::new(&config.cache_dir),
            SpotifyClient::new(&config.catalog_base_url, &config.chart_playlist_id)?,
            LyricsOvhClient::new(&config.lyrics_base_url)?,
            WikimediaClient::new(&config.wiki_stats_base_url, &config.wiki_api_url)?,
            Cooldown::new(config.cooldown()),
        ))
    }
}

impl<C, L, W> Library<C, L, W>
where
    C: CatalogService,
    L: LyricsService,
    W: WikiService,
{
    pub fn new(store: CacheStore, catalog: C, lyrics: L, wiki: W, cooldown: Cooldown) -> Self {
        Self {
            store,
            catalog,
            lyrics,
            wiki,
            cooldown,
        }
    }

    #[must_use]
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    #[must_use]
    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Load the artist registry from the cache.
    ///
    /// # Errors
    /// Fails when the cache directory cannot be read, and with a malformed
    /// error when the registry artifact exists but does not parse.
    pub fn open_registry(&self) -> FetchResult<ArtistRegistry> {
        Ok(ArtistRegistry::open(&self.store)?)
    }

    // -- cache plumbing ----------------------------------------------------

    /// Typed cache read. Missing and malformed artifacts both come back as
    /// `None`.
    fn cached<T: DeserializeOwned>(&self, key: &ArtifactKey) -> FetchResult<Option<T>> {
        match self.store.load_as::<T>(key) {
            Ok(value) => {
                log::debug!("Cache hit: {}", key);
                Ok(Some(value))
            }
            Err(e) if e.is_cache_miss() => {
                log::debug!("Cache miss for {}: {}", key, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, key: &ArtifactKey, raw: &Value) -> FetchResult<()> {
        self.store.save(key, raw)?;
        log::info!("Cached fresh {}", key);
        Ok(())
    }

    /// Cache read, falling back to `fetch` and saving what it returns.
    async fn read_through<T, F>(&self, key: ArtifactKey, fetch: F) -> FetchResult<T>
    where
        T: DeserializeOwned,
        F: Future<Output = FetchResult<Value>>,
    {
        if let Some(value) = self.cached(&key)? {
            return Ok(value);
        }
        let raw = fetch.await?;
        let value = validate(&raw, CATALOG)?;
        self.persist(&key, &raw)?;
        Ok(value)
    }

    // -- per-artist payloads -----------------------------------------------

    /// # Errors
    /// Fails when the artifact is unusable and the catalog cannot be reached.
    pub async fn discography(&self, record: &ArtistRecord) -> FetchResult<Discography> {
        self.read_through(
            ArtifactKey::Discography(record.number),
            self.catalog.discography(&record.catalog_id),
        )
        .await
    }

    /// # Errors
    /// Fails when the artifact is unusable and the catalog cannot be reached.
    pub async fn top_tracks(&self, record: &ArtistRecord) -> FetchResult<TopTracks> {
        self.read_through(
            ArtifactKey::TopTracks(record.number),
            self.catalog.top_tracks(&record.catalog_id),
        )
        .await
    }

    /// Audio features for the artist's top tracks.
    ///
    /// A miss re-reads the top tracks (through the cache) to get the ids.
    ///
    /// # Errors
    /// Fails when the artifact is unusable and the catalog cannot be reached.
    pub async fn audio_features(&self, record: &ArtistRecord) -> FetchResult<AudioFeatures> {
        let key = ArtifactKey::AudioFeatures(record.number);
        if let Some(features) = self.cached(&key)? {
            return Ok(features);
        }
        let ids = self.top_tracks(record).await?.ids();
        let raw = self.catalog.audio_features(&ids).await?;
        let features = validate(&raw, CATALOG)?;
        self.persist(&key, &raw)?;
        Ok(features)
    }

    /// Releases per year, from the artist's discography.
    ///
    /// # Errors
    /// Fails when the discography cannot be loaded or fetched.
    pub async fn release_history(&self, record: &ArtistRecord) -> FetchResult<ReleaseHistory> {
        let discography = self.discography(record).await?;
        Ok(release_histogram(discography.release_dates()))
    }

    // -- charts --------------------------------------------------------------

    /// This week's charts and their audio features.
    ///
    /// A fresh fetch saves nothing unless both the playlist and its features
    /// arrive. With only the features missing, they are refetched from the
    /// cached chart ids.
    ///
    /// # Errors
    /// Fails when either payload is unusable and cannot be fetched.
    pub async fn charts(&self) -> FetchResult<ChartSnapshot> {
        if let Some(charts) = self.cached::<Charts>(&ArtifactKey::Charts)? {
            let ids = charts.ids();
            let features = self
                .read_through(ArtifactKey::ChartFeatures, self.catalog.audio_features(&ids))
                .await?;
            return Ok(ChartSnapshot { charts, features });
        }

        let raw_charts = self.catalog.chart_playlist().await?;
        let charts: Charts = validate(&raw_charts, CATALOG)?;
        let raw_features = self.catalog.audio_features(&charts.ids()).await?;
        let features: AudioFeatures = validate(&raw_features, CATALOG)?;

        self.persist(&ArtifactKey::Charts, &raw_charts)?;
        self.persist(&ArtifactKey::ChartFeatures, &raw_features)?;
        Ok(ChartSnapshot { charts, features })
    }

    // -- live services -------------------------------------------------------

    /// Last 30 days of daily pageviews. Never cached.
    ///
    /// # Errors
    /// Returns [`FetchError::NotFound`] for an unknown article, or a
    /// transport error.
    pub async fn monthly_views(&self, title: &str) -> FetchResult<WikiViews> {
        let raw = self.wiki.monthly_views(title).await?;
        validate(&raw, WIKIPEDIA)
    }

    /// Views, size and reading time of an article.
    ///
    /// # Errors
    /// Fails when either the pageviews or the page text cannot be fetched.
    pub async fn wiki_summary(&self, title: &str) -> FetchResult<WikiSummary> {
        let views = summarize_views(&self.monthly_views(title).await?)?;
        let text = self.wiki.page_text(title).await?;
        let words = word_count(&text);

        Ok(WikiSummary {
            title: title.to_string(),
            url: article_url(title),
            views,
            words,
            reading_minutes: reading_minutes(words),
        })
    }

    /// # Errors
    /// Returns [`FetchError::NotFound`] when no lyrics exist for the song.
    pub async fn lyrics(&self, artist: &str, title: &str) -> FetchResult<String> {
        self.lyrics.lyrics(artist, title).await
    }

    // -- registry mutation ---------------------------------------------------

    /// Resolve `name` in the catalog and add it to `registry` together with
    /// its discography, top tracks and audio features.
    ///
    /// All three payloads are fetched before anything is written. On any
    /// failure neither the cache nor `registry` changes.
    ///
    /// # Errors
    /// - [`FetchError::InvalidInput`] for a blank name
    /// - [`FetchError::NotFound`] when the search has no results
    /// - a malformed error when the registry artifact on disk is unreadable
    /// - any fetch, validation or save failure
    pub async fn add_artist(
        &self,
        registry: &mut ArtistRegistry,
        name: &str,
    ) -> FetchResult<ArtistRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::InvalidInput(
                "artist name must not be empty".to_string(),
            ));
        }

        // An unreadable registry artifact must not be overwritten.
        ArtistRegistry::open(&self.store)?;

        let search: ArtistSearch = validate(&self.catalog.search_artist(name).await?, CATALOG)?;
        let hit = search
            .best()
            .cloned()
            .ok_or_else(|| FetchError::not_found(name, CATALOG))?;
        let number = registry.next_number();
        log::info!("Resolved {:?} to {} ({})", name, hit.name, hit.id);

        let raw_top = self.catalog.top_tracks(&hit.id).await?;
        let top: TopTracks = validate(&raw_top, CATALOG)?;
        let raw_discography = self.catalog.discography(&hit.id).await?;
        validate::<Discography>(&raw_discography, CATALOG)?;

        self.cooldown.wait().await;
        let raw_features = self.catalog.audio_features(&top.ids()).await?;
        validate::<AudioFeatures>(&raw_features, CATALOG)?;

        self.persist(&ArtifactKey::TopTracks(number), &raw_top)?;
        self.persist(&ArtifactKey::Discography(number), &raw_discography)?;
        self.persist(&ArtifactKey::AudioFeatures(number), &raw_features)?;

        let record = ArtistRecord::new(number, hit.name, hit.id);
        let mut updated = registry.clone();
        updated.insert(record.clone())?;
        updated.save(&self.store)?;
        *registry = updated;

        log::info!("Added {} as artist {}", record.name, record.number);
        Ok(record)
    }

    // -- metrics -------------------------------------------------------------

    /// Explicit ratio, POP-Index and mean duration of an artist's top tracks.
    ///
    /// # Errors
    /// Fails when a payload is unavailable or the artist has no Wikipedia
    /// article.
    pub async fn artist_metrics(&self, record: &ArtistRecord) -> FetchResult<DerivedMetrics> {
        let top = self.top_tracks(record).await?;
        let features = self.audio_features(record).await?;
        let views = self.monthly_views(&record.name).await?;
        let total: u64 = views.daily().sum();

        metrics(
            &record.name,
            &top.tracks,
            &features,
            total as f64,
            TOP_LIST_SIZE,
        )
    }

    /// The same numbers for this week's charts.
    ///
    /// Monthly views are averaged over the lead artists whose lookup
    /// succeeded. Each artist is looked up once; every track still counts.
    ///
    /// # Errors
    /// Degenerate when no lookup succeeds.
    pub async fn chart_metrics(&self) -> FetchResult<DerivedMetrics> {
        let snapshot = self.charts().await?;

        let mut lookups: HashMap<&str, Option<u64>> = HashMap::new();
        let mut totals = Vec::new();
        for track in &snapshot.charts.tracks {
            let Some(artist) = track.lead_artist() else {
                log::warn!("Chart track {} has no credited artist", track.id);
                continue;
            };
            let outcome = match lookups.get(artist) {
                Some(outcome) => *outcome,
                None => {
                    let outcome = match self.monthly_views(artist).await {
                        Ok(views) => Some(views.daily().sum()),
                        Err(e) => {
                            log::warn!("Skipping pageviews for {}: {}", artist, e);
                            None
                        }
                    };
                    lookups.insert(artist, outcome);
                    outcome
                }
            };
            totals.extend(outcome);
        }
        log::debug!(
            "Chart pageviews: {} of {} tracks resolved",
            totals.len(),
            snapshot.charts.tracks.len()
        );

        let views = mean_monthly_views(&totals)?;
        metrics(
            CHARTS_LABEL,
            &snapshot.charts.tracks,
            &snapshot.features,
            views,
            CHART_LIST_SIZE,
        )
    }
}

/// Check a raw payload against its typed shape.
fn validate<T: DeserializeOwned>(raw: &Value, source_name: &str) -> FetchResult<T> {
    T::deserialize(raw).map_err(|e| FetchError::parse(source_name, e))
}

fn metrics(
    label: &str,
    tracks: &[Track],
    features: &AudioFeatures,
    monthly_views: f64,
    list_size: usize,
) -> FetchResult<DerivedMetrics> {
    Ok(DerivedMetrics {
        label: label.to_string(),
        explicit_percentage: explicit_percentage(tracks)?,
        pop_index: pop_index(tracks, features, monthly_views, list_size)?,
        mean_duration: mean_duration(tracks, list_size),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_shape() {
        let raw = json!({"items": [{"release_date": "2015-11-20"}]});
        let discography: Discography = validate(&raw, CATALOG).unwrap();
        assert_eq!(discography.items.len(), 1);
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let raw = json!({"tracks": [{"id": "t1"}]});
        let err = validate::<TopTracks>(&raw, CATALOG).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn test_metrics_label() {
        let tracks = vec![Track {
            id: "t".to_string(),
            name: String::new(),
            duration_ms: 200_000,
            explicit: true,
            popularity: 50,
            artists: Vec::new(),
        }];
        let features = AudioFeatures {
            audio_features: Vec::new(),
        };
        let m = metrics(CHARTS_LABEL, &tracks, &features, 10.0, CHART_LIST_SIZE).unwrap();
        assert_eq!(m.label, "the charts");
        assert_eq!(m.explicit_percentage, 100.0);
        assert_eq!(m.pop_index, 0.0);
    }
}
