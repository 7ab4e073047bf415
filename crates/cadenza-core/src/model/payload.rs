//! Typed views of the upstream catalog and analytics payloads.
//!
//! The cache stores upstream JSON verbatim; these types are what the rest of
//! the program reads. Deserializing a cached or freshly fetched value into
//! one of them is the validation step: a payload missing a required field is
//! rejected here instead of failing later inside a derivation.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Catalog search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchWire {
    artists: SearchArtists,
}

#[derive(Debug, Deserialize)]
struct SearchArtists {
    #[serde(default)]
    items: Vec<ArtistHit>,
}

/// One artist returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtistHit {
    pub id: String,
    pub name: String,
}

/// Result of an artist search, best match first.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SearchWire")]
pub struct ArtistSearch {
    pub hits: Vec<ArtistHit>,
}

impl From<SearchWire> for ArtistSearch {
    fn from(wire: SearchWire) -> Self {
        Self {
            hits: wire.artists.items,
        }
    }
}

impl ArtistSearch {
    #[must_use]
    pub fn best(&self) -> Option<&ArtistHit> {
        self.hits.first()
    }
}

// ---------------------------------------------------------------------------
// Discography
// ---------------------------------------------------------------------------

/// An album or single in an artist's discography.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, depending on the release.
    pub release_date: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Discography {
    pub items: Vec<Release>,
}

impl Discography {
    /// Raw release dates in payload order.
    pub fn release_dates(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|r| r.release_date.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// A track as it appears in top-track lists and chart playlists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub duration_ms: u64,
    pub explicit: bool,
    /// 0 to 100.
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

impl Track {
    /// The first credited artist, if any.
    #[must_use]
    pub fn lead_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

/// An artist's top tracks (up to 10).
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracks {
    pub tracks: Vec<Track>,
}

impl TopTracks {
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ChartsWire {
    tracks: ChartItems,
}

#[derive(Debug, Deserialize)]
struct ChartItems {
    items: Vec<ChartEntry>,
}

#[derive(Debug, Deserialize)]
struct ChartEntry {
    track: Track,
}

/// This week's chart playlist (up to 50 tracks), flattened out of the
/// playlist's `tracks.items[].track` nesting.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ChartsWire")]
pub struct Charts {
    pub tracks: Vec<Track>,
}

impl From<ChartsWire> for Charts {
    fn from(wire: ChartsWire) -> Self {
        Self {
            tracks: wire.tracks.items.into_iter().map(|e| e.track).collect(),
        }
    }
}

impl Charts {
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Audio features
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeature {
    /// 0.0 to 1.0.
    pub danceability: f64,
    #[serde(default)]
    pub id: Option<String>,
}

/// One feature vector per requested track id, in request order. The API
/// answers `null` for ids it does not know.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeatures {
    pub audio_features: Vec<Option<AudioFeature>>,
}

impl AudioFeatures {
    pub fn danceability(&self) -> impl Iterator<Item = f64> + '_ {
        self.audio_features
            .iter()
            .flatten()
            .map(|f| f.danceability)
    }
}

// ---------------------------------------------------------------------------
// Wikipedia pageviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyViews {
    /// `YYYYMMDD00`.
    #[serde(default)]
    pub timestamp: String,
    pub views: u64,
}

/// Daily pageviews for one article. Never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiViews {
    pub items: Vec<DailyViews>,
}

impl WikiViews {
    pub fn daily(&self) -> impl Iterator<Item = u64> + '_ {
        self.items.iter().map(|d| d.views)
    }
}
