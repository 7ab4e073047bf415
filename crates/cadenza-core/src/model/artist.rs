use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Registry key of an artist: a positive integer, written as a decimal
/// string ("1", "2", ...) wherever it is persisted or typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtistNumber(u32);

impl ArtistNumber {
    /// The key given to the first artist of an empty registry.
    pub const FIRST: Self = Self(1);

    /// Returns `None` for zero, which is never a valid key.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The key following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ArtistNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArtistNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidData(format!("not an artist number: {s:?}")))
    }
}

/// An artist the user has added to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    pub number: ArtistNumber,

    /// Canonical name as returned by the catalog search.
    pub name: String,

    /// Catalog (Spotify) artist ID.
    pub catalog_id: String,
}

impl ArtistRecord {
    #[must_use]
    pub fn new(number: ArtistNumber, name: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            catalog_id: catalog_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_number_parse() {
        let number: ArtistNumber = "12".parse().unwrap();
        assert_eq!(number.get(), 12);
        assert_eq!(number.to_string(), "12");
    }

    #[test]
    fn test_artist_number_rejects_zero_and_text() {
        assert!("0".parse::<ArtistNumber>().is_err());
        assert!("abc".parse::<ArtistNumber>().is_err());
        assert!("".parse::<ArtistNumber>().is_err());
        assert!("-3".parse::<ArtistNumber>().is_err());
    }

    #[test]
    fn test_artist_number_orders_numerically() {
        let nine: ArtistNumber = "9".parse().unwrap();
        let ten: ArtistNumber = "10".parse().unwrap();
        assert!(ten > nine);
        assert_eq!(nine.next(), ten);
    }

    #[test]
    fn test_artist_record_new() {
        let record = ArtistRecord::new(ArtistNumber::FIRST, "Adele", "4dpARuHxo51G3z768sgnrY");
        assert_eq!(record.name, "Adele");
        assert_eq!(record.catalog_id, "4dpARuHxo51G3z768sgnrY");
        assert_eq!(record.number, ArtistNumber::FIRST);
    }
}
