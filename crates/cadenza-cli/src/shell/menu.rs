/// Main menu, printed before every prompt.
pub const MENU: &str = r#"
    Type "exit" to leave the program
    Type 0 to show the list of artists
    Type 1 to plot the release history of an artist.
    Type 2 to learn about an artist's Wikipedia data and analyze their lyrics.
    Type 3 to compare an artist to another artist or the charts.
    Type x to add an artist (requires an internet connection and may take a while)
"#;

pub const GOODBYE: &str = "Thank you for using our tool! See you next time.";

/// One line of menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    List,
    ReleaseHistory,
    WikiAndLyrics,
    Compare,
    AddArtist,
    Exit,
    Invalid,
}

impl Choice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "0" => Self::List,
            "1" => Self::ReleaseHistory,
            "2" => Self::WikiAndLyrics,
            "3" => Self::Compare,
            "x" => Self::AddArtist,
            "exit" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

/// Sub-choice of the comparison menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareWith {
    Artist,
    Charts,
}

impl CompareWith {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "artist" => Some(Self::Artist),
            "charts" => Some(Self::Charts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(Choice::parse("0"), Choice::List);
        assert_eq!(Choice::parse(" 3\n"), Choice::Compare);
        assert_eq!(Choice::parse("x"), Choice::AddArtist);
        assert_eq!(Choice::parse("exit"), Choice::Exit);
        assert_eq!(Choice::parse("X"), Choice::Invalid);
        assert_eq!(Choice::parse(""), Choice::Invalid);
    }

    #[test]
    fn test_parse_compare_with() {
        assert_eq!(CompareWith::parse("Charts"), Some(CompareWith::Charts));
        assert_eq!(CompareWith::parse("artist\n"), Some(CompareWith::Artist));
        assert_eq!(CompareWith::parse("both"), None);
    }
}
