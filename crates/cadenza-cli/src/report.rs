//! Text composition for the shell: tables, summaries and comparison
//! verdicts. Nothing here does I/O.

use std::cmp::Ordering;

use cadenza_core::derive::{DerivedMetrics, PronounFocus, ReleaseHistory, WORDS_PER_MINUTE};
use cadenza_core::model::ArtistRegistry;
use cadenza_fetch::WikiSummary;

/// At or below this explicit percentage a tie reads as "peaceful".
pub const EXPLICIT_TIE_THRESHOLD: f64 = 30.0;

/// At or below this POP-Index a tie reads as "boring".
pub const POP_TIE_THRESHOLD: f64 = 0.30;

const RULE: &str = "-----------------------------------------------";
const BANNER: &str = "=====================================================================";

/// How the first side of a comparison relates to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Lower,
    /// Equal and at or below the threshold.
    TiedLow,
    /// Equal and above the threshold.
    TiedHigh,
    Higher,
}

impl Verdict {
    #[must_use]
    pub fn of(a: f64, b: f64, threshold: f64) -> Self {
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => Self::Lower,
            Some(Ordering::Greater) => Self::Higher,
            _ if a <= threshold => Self::TiedLow,
            _ => Self::TiedHigh,
        }
    }
}

/// The other side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Artist,
    Charts,
}

/// Percentages print with one decimal place.
fn percent(value: f64) -> String {
    format!("{value:.1}")
}

/// The numbered artist table.
#[must_use]
pub fn artist_table(registry: &ArtistRegistry) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        format!("{:<10}{:>30}", "Artist Nr.", "Artist Name"),
        RULE.to_string(),
    ];
    lines.extend(
        registry
            .iter()
            .map(|record| format!("{:<10}{:>30}", record.number.to_string(), record.name)),
    );
    lines.push(RULE.to_string());
    lines
}

/// One text bar per year.
#[must_use]
pub fn history_lines(name: &str, history: &ReleaseHistory) -> Vec<String> {
    let mut lines = vec![format!("Release history of {name}")];
    if history.is_empty() {
        lines.push("Not enough releases to show a history.".to_string());
        return lines;
    }
    lines.extend(history.points().iter().map(|(year, count)| {
        format!("{year} | {:<12} {count}", "#".repeat(*count as usize))
    }));
    lines
}

/// The Wikipedia info block.
#[must_use]
pub fn wiki_block(summary: &WikiSummary) -> Vec<String> {
    vec![
        BANNER.to_string(),
        format!("Wikipedia Page Info about {}", summary.title),
        String::new(),
        format!("Open Wiki Page: {}", summary.url),
        String::new(),
        format!("Views in the last 30 days: {:>7}", summary.views.total),
        format!("Average views per day: {:>11}", summary.views.daily_average),
        String::new(),
        format!("Total number of words: {:>11}", summary.words),
        format!(
            "An average reader needs {} minutes to read the text ({} WPM).",
            summary.reading_minutes, WORDS_PER_MINUTE
        ),
        BANNER.to_string(),
    ]
}

/// Narrative line for a song's pronoun focus.
#[must_use]
pub fn pronoun_line(focus: PronounFocus, title: &str, artist: &str) -> String {
    let song = format!("{title} by {artist}");
    match focus {
        PronounFocus::Me => format!("{song} is a selfish song, all about 'me'!"),
        PronounFocus::You => format!("{song} is a song all about 'you'!"),
        PronounFocus::They => format!("{song} mentions other people a lot."),
        PronounFocus::MeAndYou => format!("{song} is equally about 'you' and 'me'. Lovely!"),
        PronounFocus::YouAndThey => format!("{song} is all about 'you' and other people."),
        PronounFocus::MeAndThey => {
            format!("{song} talks about the singer and people around them equally.")
        }
        PronounFocus::Everyone => format!("{song} is truly a song about everyone :)"),
    }
}

/// Explicit-content lines: one per side, then the verdict.
#[must_use]
pub fn explicit_lines(a: &DerivedMetrics, b: &DerivedMetrics, opponent: Opponent) -> Vec<String> {
    let (x, y) = (&a.label, &b.label);
    let a_line = format!(
        "The Top 10 songs of {x} are {}% explicit.",
        percent(a.explicit_percentage)
    );
    let mut lines = match opponent {
        Opponent::Artist => vec![
            a_line,
            format!(
                "The Top 10 songs of {y} are {}% explicit.",
                percent(b.explicit_percentage)
            ),
        ],
        Opponent::Charts => vec![
            format!(
                "This week's top hits playlist is {}% explicit.",
                percent(b.explicit_percentage)
            ),
            a_line,
        ],
    };

    let verdict = Verdict::of(
        a.explicit_percentage,
        b.explicit_percentage,
        EXPLICIT_TIE_THRESHOLD,
    );
    lines.push(match (verdict, opponent) {
        (Verdict::Lower, _) => format!("{x} is family friendly compared to {y}."),
        (Verdict::TiedLow, _) => format!("{x} is just as peaceful as {y}."),
        (Verdict::TiedHigh, _) => format!("{x} is just as outrageous as {y}."),
        (Verdict::Higher, Opponent::Artist) => format!("{y} is family friendly compared to {x}."),
        (Verdict::Higher, Opponent::Charts) => format!("{x} is not afraid of swearing!"),
    });
    lines
}

/// POP-Index lines: one per side, then the verdict.
#[must_use]
pub fn pop_lines(a: &DerivedMetrics, b: &DerivedMetrics, opponent: Opponent) -> Vec<String> {
    let (x, y) = (&a.label, &b.label);
    let mut lines = vec![format!("{x} has a POP-Index of {:.2}.", a.pop_index)];
    lines.push(match opponent {
        Opponent::Artist => format!("{y} has a POP-Index of {:.2}.", b.pop_index),
        Opponent::Charts => format!("The charts have a POP-Index of {:.2}.", b.pop_index),
    });

    let verdict = Verdict::of(a.pop_index, b.pop_index, POP_TIE_THRESHOLD);
    lines.push(match (verdict, opponent) {
        (Verdict::Higher, _) => format!("{x} is the real Pop Diva compared to {y}."),
        (Verdict::TiedLow, _) => format!("{x} is just as boring as {y}."),
        (Verdict::TiedHigh, _) => format!("{x} is just as awesome as {y}."),
        (Verdict::Lower, Opponent::Artist) => format!("{y} is the real Pop Diva compared to {x}."),
        (Verdict::Lower, Opponent::Charts) => {
            format!("The charts are full of Pop Divas compared to {x}.")
        }
    });
    lines
}

/// Mean-duration lines: one per side, then which side runs longer.
#[must_use]
pub fn duration_lines(a: &DerivedMetrics, b: &DerivedMetrics, opponent: Opponent) -> Vec<String> {
    let (x, y) = (&a.label, &b.label);
    let mut lines = vec![format!(
        "Average duration of Top 10 {x} Songs: {} minutes",
        a.mean_duration
    )];
    let b_owner = match opponent {
        Opponent::Artist => {
            lines.push(format!(
                "Average duration of Top 10 {y} Songs: {} minutes",
                b.mean_duration
            ));
            format!("{y}'s")
        }
        Opponent::Charts => {
            lines.push(format!(
                "Average duration of the charts: {} minutes",
                b.mean_duration
            ));
            "The charts'".to_string()
        }
    };

    let (a_secs, b_secs) = (a.mean_duration.as_secs(), b.mean_duration.as_secs());
    lines.push(match a_secs.cmp(&b_secs) {
        Ordering::Greater => format!(
            "{x}'s songs are on average {} seconds longer.",
            a_secs - b_secs
        ),
        Ordering::Less => format!(
            "{b_owner} songs are on average {} seconds longer.",
            b_secs - a_secs
        ),
        Ordering::Equal => {
            format!("The songs of {x} and {y} have on average the same duration!")
        }
    });
    lines
}

/// The full side-by-side comparison: explicit, POP-Index, duration.
#[must_use]
pub fn comparison(a: &DerivedMetrics, b: &DerivedMetrics, opponent: Opponent) -> Vec<String> {
    let mut lines = explicit_lines(a, b, opponent);
    lines.extend(pop_lines(a, b, opponent));
    lines.extend(duration_lines(a, b, opponent));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::derive::MeanDuration;
    use cadenza_core::model::{ArtistNumber, ArtistRecord};

    fn metrics(label: &str, explicit: f64, pop: f64, secs: u64) -> DerivedMetrics {
        DerivedMetrics {
            label: label.to_string(),
            explicit_percentage: explicit,
            pop_index: pop,
            mean_duration: MeanDuration::from_secs(secs),
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::of(10.0, 20.0, 30.0), Verdict::Lower);
        assert_eq!(Verdict::of(30.0, 30.0, 30.0), Verdict::TiedLow);
        assert_eq!(Verdict::of(30.5, 30.5, 30.0), Verdict::TiedHigh);
        assert_eq!(Verdict::of(0.5, 0.2, 0.30), Verdict::Higher);
    }

    #[test]
    fn test_percent_format() {
        assert_eq!(percent(30.0), "30.0");
        assert_eq!(percent(0.0), "0.0");
        assert_eq!(percent(12.5), "12.5");
        assert_eq!(percent(100.0 / 3.0), "33.3");
        assert_eq!(percent(200.0 / 3.0), "66.7");
    }

    #[test]
    fn test_explicit_line_has_no_float_noise() {
        let a = metrics("Adele", 100.0 / 3.0, 0.5, 200);
        let b = metrics("Drake", 70.0, 0.5, 200);
        let lines = explicit_lines(&a, &b, Opponent::Artist);
        assert_eq!(lines[0], "The Top 10 songs of Adele are 33.3% explicit.");
    }

    #[test]
    fn test_explicit_between_artists() {
        let a = metrics("Adele", 10.0, 0.5, 200);
        let b = metrics("Drake", 70.0, 0.5, 200);
        let lines = explicit_lines(&a, &b, Opponent::Artist);
        assert_eq!(lines[0], "The Top 10 songs of Adele are 10.0% explicit.");
        assert_eq!(lines[1], "The Top 10 songs of Drake are 70.0% explicit.");
        assert_eq!(lines[2], "Adele is family friendly compared to Drake.");

        let lines = explicit_lines(&b, &a, Opponent::Artist);
        assert_eq!(lines[2], "Adele is family friendly compared to Drake.");
    }

    #[test]
    fn test_explicit_ties() {
        let a = metrics("A", 30.0, 0.0, 0);
        let b = metrics("B", 30.0, 0.0, 0);
        assert_eq!(
            explicit_lines(&a, &b, Opponent::Artist)[2],
            "A is just as peaceful as B."
        );
        let a = metrics("A", 40.0, 0.0, 0);
        let b = metrics("B", 40.0, 0.0, 0);
        assert_eq!(
            explicit_lines(&a, &b, Opponent::Artist)[2],
            "A is just as outrageous as B."
        );
    }

    #[test]
    fn test_explicit_against_charts() {
        let a = metrics("Drake", 80.0, 0.5, 200);
        let charts = metrics("the charts", 40.0, 0.5, 180);
        let lines = explicit_lines(&a, &charts, Opponent::Charts);
        assert_eq!(lines[0], "This week's top hits playlist is 40.0% explicit.");
        assert_eq!(lines[1], "The Top 10 songs of Drake are 80.0% explicit.");
        assert_eq!(lines[2], "Drake is not afraid of swearing!");
    }

    #[test]
    fn test_pop_lines() {
        let a = metrics("Adele", 0.0, 0.649_49, 200);
        let b = metrics("Drake", 0.0, 0.3, 200);
        let lines = pop_lines(&a, &b, Opponent::Artist);
        assert_eq!(lines[0], "Adele has a POP-Index of 0.65.");
        assert_eq!(lines[1], "Drake has a POP-Index of 0.30.");
        assert_eq!(lines[2], "Adele is the real Pop Diva compared to Drake.");

        let lines = pop_lines(&b, &a, Opponent::Artist);
        assert_eq!(lines[2], "Adele is the real Pop Diva compared to Drake.");
    }

    #[test]
    fn test_pop_ties() {
        let low = metrics("A", 0.0, 0.3, 0);
        assert_eq!(
            pop_lines(&low, &low, Opponent::Artist)[2],
            "A is just as boring as A."
        );
        let high = metrics("A", 0.0, 0.9, 0);
        let charts = metrics("the charts", 0.0, 0.9, 0);
        assert_eq!(
            pop_lines(&high, &charts, Opponent::Charts)[2],
            "A is just as awesome as the charts."
        );
    }

    #[test]
    fn test_pop_below_charts() {
        let a = metrics("Queen", 0.0, 0.1, 0);
        let charts = metrics("the charts", 0.0, 0.7, 0);
        let lines = pop_lines(&a, &charts, Opponent::Charts);
        assert_eq!(lines[1], "The charts have a POP-Index of 0.70.");
        assert_eq!(lines[2], "The charts are full of Pop Divas compared to Queen.");
    }

    #[test]
    fn test_duration_lines() {
        let a = metrics("Adele", 0.0, 0.0, 200);
        let b = metrics("Drake", 0.0, 0.0, 185);
        let lines = duration_lines(&a, &b, Opponent::Artist);
        assert_eq!(lines[0], "Average duration of Top 10 Adele Songs: 3:20 minutes");
        assert_eq!(lines[1], "Average duration of Top 10 Drake Songs: 3:05 minutes");
        assert_eq!(lines[2], "Adele's songs are on average 15 seconds longer.");

        let charts = metrics("the charts", 0.0, 0.0, 210);
        let lines = duration_lines(&a, &charts, Opponent::Charts);
        assert_eq!(lines[1], "Average duration of the charts: 3:30 minutes");
        assert_eq!(lines[2], "The charts' songs are on average 10 seconds longer.");

        let lines = duration_lines(&a, &a, Opponent::Artist);
        assert_eq!(
            lines[2],
            "The songs of Adele and Adele have on average the same duration!"
        );
    }

    #[test]
    fn test_comparison_order() {
        let a = metrics("Adele", 30.0, 0.5, 200);
        let b = metrics("Drake", 60.0, 0.4, 190);
        let lines = comparison(&a, &b, Opponent::Artist);
        assert_eq!(lines.len(), 9);
        assert!(lines[2].contains("family friendly"));
        assert!(lines[5].contains("Pop Diva"));
        assert!(lines[8].contains("seconds longer"));
    }

    #[test]
    fn test_pronoun_lines() {
        assert_eq!(
            pronoun_line(PronounFocus::Me, "Hello", "Adele"),
            "Hello by Adele is a selfish song, all about 'me'!"
        );
        assert_eq!(
            pronoun_line(PronounFocus::Everyone, "Hello", "Adele"),
            "Hello by Adele is truly a song about everyone :)"
        );
    }

    #[test]
    fn test_artist_table() {
        let mut registry = ArtistRegistry::new();
        registry
            .insert(ArtistRecord::new(ArtistNumber::FIRST, "Adele", "id"))
            .unwrap();
        let lines = artist_table(&registry);
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("1 "));
        assert!(lines[3].ends_with("Adele"));
    }

    #[test]
    fn test_history_lines() {
        let history = cadenza_core::derive::release_histogram(["1999", "1999", "2001"]);
        let lines = history_lines("Adele", &history);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1999 | ##"));
        assert!(lines[2].ends_with(" 0"));
    }
}
