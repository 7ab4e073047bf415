use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::WikiViews;

/// Reading speed used for reading-time estimates, in words per minute.
pub const WORDS_PER_MINUTE: f64 = 280.0;

// Tags, literal or entity-escaped, as they appear in the XML extract.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&lt;.*?&gt;|<.*?>").expect("static pattern is valid"));

const EXTRACT_CAVEAT: &str = "HTML may be malformed and/or unbalanced and may omit inline images. \
Use at your own risk. Known problems are listed at \
https://www.mediawiki.org/wiki/Special:MyLanguage/Extension:TextExtracts#Caveats.\n";

/// Pageview totals over the requested window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    pub total: u64,
    /// `ceil(total / days)`.
    pub daily_average: u64,
    pub days: usize,
}

/// Total the daily views and round the per-day average up.
pub fn summarize_views(views: &WikiViews) -> Result<ViewSummary> {
    let days = views.items.len();
    if days == 0 {
        return Err(Error::DegenerateInput(
            "pageview window without any days".to_string(),
        ));
    }
    let total: u64 = views.daily().sum();
    Ok(ViewSummary {
        total,
        daily_average: total.div_ceil(days as u64),
        days,
    })
}

/// Mean of per-artist monthly totals, over the lookups that succeeded.
pub fn mean_monthly_views(totals: &[u64]) -> Result<f64> {
    if totals.is_empty() {
        return Err(Error::DegenerateInput(
            "no Wikipedia pageviews could be retrieved".to_string(),
        ));
    }
    Ok(totals.iter().sum::<u64>() as f64 / totals.len() as f64)
}

/// Strip tags and the TextExtracts caveat from an extract response.
#[must_use]
pub fn strip_markup(raw: &str) -> String {
    MARKUP.replace_all(raw, "").replace(EXTRACT_CAVEAT, "")
}

/// Number of single-space separated pieces, empty pieces included.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Minutes needed to read `words`, rounded to two decimals.
#[must_use]
pub fn reading_minutes(words: usize) -> f64 {
    (words as f64 / WORDS_PER_MINUTE * 100.0).round() / 100.0
}

/// Canonical article URL for a page title.
#[must_use]
pub fn article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"))
}
