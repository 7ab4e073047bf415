use std::sync::LazyLock;

use regex::Regex;

// Plain alternations, no word boundaries: "me" inside "home" counts.
static ME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"I|me|mine").expect("static pattern is valid"));
static YOU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"you|your|yours").expect("static pattern is valid"));
static THEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"he|him|she|her|they|them").expect("static pattern is valid")
});

/// Who a song is mostly about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PronounFocus {
    Me,
    You,
    They,
    MeAndYou,
    YouAndThey,
    MeAndThey,
    Everyone,
}

/// Pronoun match counts for one lyric text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PronounBuckets {
    pub me: usize,
    pub you: usize,
    pub they: usize,
}

impl PronounBuckets {
    #[must_use]
    pub const fn new(me: usize, you: usize, they: usize) -> Self {
        Self { me, you, they }
    }

    /// Scan `lyrics` case-sensitively for each pronoun class.
    #[must_use]
    pub fn count(lyrics: &str) -> Self {
        Self {
            me: ME.find_iter(lyrics).count(),
            you: YOU.find_iter(lyrics).count(),
            they: THEY.find_iter(lyrics).count(),
        }
    }

    /// `[me, you, they]`, the order used for charts.
    #[must_use]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.me, self.you, self.they]
    }

    /// Classify the song.
    ///
    /// A strict maximum wins. Otherwise a tied pair that beats the third
    /// class is reported as shared, and a three-way tie as everyone.
    #[must_use]
    pub fn focus(&self) -> Option<PronounFocus> {
        let Self { me, you, they } = *self;

        if me > you && me > they {
            Some(PronounFocus::Me)
        } else if you > me && you > they {
            Some(PronounFocus::You)
        } else if they > me && they > you {
            Some(PronounFocus::They)
        } else if me == you && me > they {
            Some(PronounFocus::MeAndYou)
        } else if you == they && you > me {
            Some(PronounFocus::YouAndThey)
        } else if they == me && they > you {
            Some(PronounFocus::MeAndThey)
        } else if me == you && you == they {
            Some(PronounFocus::Everyone)
        } else {
            None
        }
    }
}
