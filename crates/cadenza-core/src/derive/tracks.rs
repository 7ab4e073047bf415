use std::fmt;

use crate::error::{Error, Result};
use crate::model::{AudioFeatures, Track};

/// Assumed length of an artist's top-track list.
pub const TOP_LIST_SIZE: usize = 10;

/// Assumed length of the weekly chart playlist.
pub const CHART_LIST_SIZE: usize = 50;

/// Share of explicit tracks, as a percentage of the actual list length.
pub fn explicit_percentage(tracks: &[Track]) -> Result<f64> {
    if tracks.is_empty() {
        return Err(Error::DegenerateInput(
            "explicit ratio of an empty track list".to_string(),
        ));
    }
    let explicit = tracks.iter().filter(|t| t.explicit).count();
    Ok(100.0 * explicit as f64 / tracks.len() as f64)
}

/// A mean track length in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeanDuration(u64);

impl MeanDuration {
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.0 / 60
    }

    #[must_use]
    pub const fn seconds(self) -> u64 {
        self.0 % 60
    }
}

impl fmt::Display for MeanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes(), self.seconds())
    }
}

/// Mean track duration against a fixed list size.
///
/// The summed duration is divided by `list_size` (10 for a top list, 50 for
/// the charts), not by the number of tracks present, then truncated to
/// whole seconds. A short list therefore yields a proportionally shorter
/// mean.
#[must_use]
pub fn mean_duration(tracks: &[Track], list_size: usize) -> MeanDuration {
    let total_secs: f64 = tracks.iter().map(|t| t.duration_ms as f64 / 1000.0).sum();
    MeanDuration((total_secs / list_size as f64) as u64)
}

/// Popularity index of a track list.
///
/// `2 * popularity * danceability * views^0.01 / duration^0.5`, where
/// popularity (scaled to 0..1), danceability and duration (in units of
/// 100 000 ms) are averaged over the fixed `list_size`, and `monthly_views`
/// is the trailing 30-day pageview total of the artist's article (or the
/// mean of those totals across chart artists).
pub fn pop_index(
    tracks: &[Track],
    features: &AudioFeatures,
    monthly_views: f64,
    list_size: usize,
) -> Result<f64> {
    let n = list_size as f64;

    let mean_popularity = tracks
        .iter()
        .map(|t| f64::from(t.popularity) / 100.0)
        .sum::<f64>()
        / n;
    let mean_duration = tracks
        .iter()
        .map(|t| t.duration_ms as f64 / 100_000.0)
        .sum::<f64>()
        / n;
    let mean_danceability = features.danceability().sum::<f64>() / n;

    if mean_duration <= 0.0 {
        return Err(Error::DegenerateInput(
            "popularity index of tracks without duration".to_string(),
        ));
    }

    Ok(
        (mean_popularity * mean_danceability * monthly_views.powf(0.01)
            / mean_duration.powf(0.5))
            * 2.0,
    )
}
