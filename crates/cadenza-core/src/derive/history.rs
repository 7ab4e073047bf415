use std::collections::BTreeMap;

/// Release counts per year over `[first year, last year)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseHistory {
    points: Vec<(i32, u32)>,
}

impl ReleaseHistory {
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|(year, _)| *year).collect()
    }

    #[must_use]
    pub fn counts(&self) -> Vec<u32> {
        self.points.iter().map(|(_, count)| *count).collect()
    }

    /// `(year, releases)` pairs in chronological order.
    #[must_use]
    pub fn points(&self) -> &[(i32, u32)] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The year encoded in the first four characters of a release date.
fn year_of(date: &str) -> Option<i32> {
    date.get(..4).and_then(|prefix| prefix.parse().ok())
}

/// Build a release-year histogram from catalog release dates.
///
/// The year range runs from the earliest year up to, but not including,
/// the latest year; releases in the latest year are not counted. Years with
/// no releases are present with a zero count. Dates without a leading
/// four-digit year are skipped.
pub fn release_histogram<'a>(dates: impl IntoIterator<Item = &'a str>) -> ReleaseHistory {
    let years: Vec<i32> = dates
        .into_iter()
        .filter_map(|date| {
            let year = year_of(date);
            if year.is_none() {
                log::debug!("Skipping release date without a year: {:?}", date);
            }
            year
        })
        .collect();

    let (Some(&first), Some(&last)) = (years.iter().min(), years.iter().max()) else {
        return ReleaseHistory::default();
    };

    let mut counts: BTreeMap<i32, u32> = (first..last).map(|year| (year, 0)).collect();
    for year in years {
        if let Some(count) = counts.get_mut(&year) {
            *count += 1;
        }
    }

    ReleaseHistory {
        points: counts.into_iter().collect(),
    }
}
