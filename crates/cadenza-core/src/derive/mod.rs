//! Pure derivations over loaded payloads.
//!
//! Nothing in this module touches the network or the cache.

pub mod history;
pub mod pronouns;
pub mod tracks;
pub mod wiki;

pub use history::{release_histogram, ReleaseHistory};
pub use pronouns::{PronounBuckets, PronounFocus};
pub use tracks::{
    explicit_percentage, mean_duration, pop_index, MeanDuration, CHART_LIST_SIZE, TOP_LIST_SIZE,
};
pub use wiki::{
    article_url, mean_monthly_views, reading_minutes, strip_markup, summarize_views, word_count,
    ViewSummary, WORDS_PER_MINUTE,
};

/// The comparable numbers for one track list (an artist's top tracks or
/// the charts).
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Display name: the artist's name, or a label for the charts.
    pub label: String,
    pub explicit_percentage: f64,
    pub pop_index: f64,
    pub mean_duration: MeanDuration,
}
