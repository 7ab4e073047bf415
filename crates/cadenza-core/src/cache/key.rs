use std::fmt;

use crate::model::ArtistNumber;

/// Names one cache artifact.
///
/// Every key maps to exactly one file name inside the cache directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKey {
    /// The artist registry.
    Registry,
    /// An artist's discography (album list).
    Discography(ArtistNumber),
    /// An artist's top-10 tracks.
    TopTracks(ArtistNumber),
    /// Audio features for an artist's top tracks.
    AudioFeatures(ArtistNumber),
    /// The shared weekly chart playlist.
    Charts,
    /// Audio features for the chart playlist.
    ChartFeatures,
}

impl ArtifactKey {
    /// The artifact's file name inside the cache directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        match self {
            Self::Registry => "artists.json".to_string(),
            Self::Discography(n) => format!("release_history_{n}.json"),
            Self::TopTracks(n) => format!("top_{n}.json"),
            Self::AudioFeatures(n) => format!("features_{n}.json"),
            Self::Charts => "charts.json".to_string(),
            Self::ChartFeatures => "features_charts.json".to_string(),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Discography(n) => write!(f, "discography/{n}"),
            Self::TopTracks(n) => write!(f, "top-tracks/{n}"),
            Self::AudioFeatures(n) => write!(f, "features/{n}"),
            Self::Charts => write!(f, "charts"),
            Self::ChartFeatures => write!(f, "charts-features"),
        }
    }
}
