use std::collections::BTreeMap;

use serde_json::Value;

use crate::cache::{ArtifactKey, CacheStore};
use crate::error::{Error, Result};
use crate::model::artist::{ArtistNumber, ArtistRecord};

/// The user's artist catalog, keyed by dense artist numbers starting at 1.
///
/// Persisted as one cache artifact shaped `{"1": ["Name", "catalog-id"], ...}`.
/// Records are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistRegistry {
    records: BTreeMap<ArtistNumber, ArtistRecord>,
}

impl ArtistRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the registry artifact from `store`.
    ///
    /// A missing artifact yields an empty registry. An artifact that exists
    /// but cannot be read is [`Error::Malformed`]; it is never replaced by
    /// an empty registry, so a later save cannot drop the artists it holds.
    pub fn open(store: &CacheStore) -> Result<Self> {
        let value = match store.load(&ArtifactKey::Registry) {
            Ok(value) => value,
            Err(Error::NotFound { .. }) => {
                log::info!("No artist registry yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(e),
        };

        let registry = Self::from_json(&value).map_err(|e| Error::Malformed {
            key: ArtifactKey::Registry.to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded {} artists from registry", registry.len());
        Ok(registry)
    }

    /// Persist the whole registry, overwriting the previous artifact.
    pub fn save(&self, store: &CacheStore) -> Result<()> {
        store.save(&ArtifactKey::Registry, &self.to_json())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, number: ArtistNumber) -> Option<&ArtistRecord> {
        self.records.get(&number)
    }

    /// Resolve user input such as `"3"` to a registered artist.
    pub fn lookup(&self, input: &str) -> Result<&ArtistRecord> {
        let not_found = || Error::NotFound {
            entity: "artist",
            id: input.trim().to_string(),
        };
        let number: ArtistNumber = input.parse().map_err(|_| not_found())?;
        self.get(number).ok_or_else(not_found)
    }

    /// Records in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtistRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn numbers(&self) -> Vec<ArtistNumber> {
        self.records.keys().copied().collect()
    }

    /// `max(existing keys) + 1`, or 1 for an empty registry.
    #[must_use]
    pub fn next_number(&self) -> ArtistNumber {
        self.records
            .keys()
            .next_back()
            .map_or(ArtistNumber::FIRST, |last| last.next())
    }

    /// Append a record. Its number must be [`Self::next_number`].
    pub fn insert(&mut self, record: ArtistRecord) -> Result<()> {
        let expected = self.next_number();
        if record.number != expected {
            return Err(Error::InvalidData(format!(
                "artist number {} is not the next free key {}",
                record.number, expected
            )));
        }
        log::info!("Registered artist {} as #{}", record.name, record.number);
        self.records.insert(record.number, record);
        Ok(())
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .records
            .values()
            .map(|r| {
                (
                    r.number.to_string(),
                    Value::from(vec![r.name.clone(), r.catalog_id.clone()]),
                )
            })
            .collect();
        Value::Object(map)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let raw: BTreeMap<String, (String, String)> = serde_json::from_value(value.clone())?;

        let mut records = BTreeMap::new();
        for (key, (name, catalog_id)) in raw {
            let number: ArtistNumber = key.parse()?;
            records.insert(number, ArtistRecord::new(number, name, catalog_id));
        }

        // Keys must be exactly 1..=n.
        let dense = records
            .keys()
            .zip(1u32..)
            .all(|(number, expected)| number.get() == expected);
        if !dense {
            return Err(Error::InvalidData(
                "artist numbers are not a dense sequence starting at 1".to_string(),
            ));
        }

        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(n: u32, name: &str) -> ArtistRecord {
        ArtistRecord::new(ArtistNumber::new(n).unwrap(), name, format!("id-{n}"))
    }

    #[test]
    fn test_next_number_empty_registry() {
        assert_eq!(ArtistRegistry::new().next_number(), ArtistNumber::FIRST);
    }

    #[test]
    fn test_insert_appends_dense_keys() {
        let mut registry = ArtistRegistry::new();
        registry.insert(record(1, "Adele")).unwrap();
        registry.insert(record(2, "Drake")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.next_number().get(), 3);
        assert_eq!(registry.lookup("2").unwrap().name, "Drake");
    }

    #[test]
    fn test_insert_rejects_gap_and_duplicate() {
        let mut registry = ArtistRegistry::new();
        registry.insert(record(1, "Adele")).unwrap();

        assert!(registry.insert(record(1, "Again")).is_err());
        assert!(registry.insert(record(3, "Gap")).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_next_number_is_numeric_not_lexicographic() {
        let mut registry = ArtistRegistry::new();
        for n in 1..=10 {
            registry.insert(record(n, "x")).unwrap();
        }
        assert_eq!(registry.next_number().get(), 11);
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let registry = ArtistRegistry::new();
        assert!(registry.lookup("1").unwrap_err().is_not_found());
        assert!(registry.lookup("one").unwrap_err().is_not_found());
    }

    #[test]
    fn test_json_layout() {
        let mut registry = ArtistRegistry::new();
        registry.insert(record(1, "Adele")).unwrap();

        assert_eq!(registry.to_json(), json!({"1": ["Adele", "id-1"]}));

        let parsed = ArtistRegistry::from_json(&registry.to_json()).unwrap();
        assert_eq!(parsed, registry);
    }

    #[test]
    fn test_from_json_rejects_sparse_keys() {
        let value = json!({"1": ["A", "a"], "3": ["C", "c"]});
        assert!(ArtistRegistry::from_json(&value).is_err());
    }

    #[test]
    fn test_open_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        assert!(ArtistRegistry::open(&store).unwrap().is_empty());
    }

    #[test]
    fn test_open_truncated_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        let truncated = r#"{"1":["Adele","a"],"2":["Drake","d"],"3":["Queen","q""#;
        std::fs::write(temp_dir.path().join("artists.json"), truncated).unwrap();

        let err = ArtistRegistry::open(&store).unwrap_err();
        assert!(err.is_malformed());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_open_sparse_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        store
            .save(&ArtifactKey::Registry, &json!({"1": ["A", "a"], "3": ["C", "c"]}))
            .unwrap();

        let err = ArtistRegistry::open(&store).unwrap_err();
        assert!(matches!(err, Error::Malformed { ref key, .. } if key == "registry"));
    }

    #[test]
    fn test_save_then_open() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        let mut registry = ArtistRegistry::new();
        registry.insert(record(1, "Adele")).unwrap();
        registry.save(&store).unwrap();

        let reopened = ArtistRegistry::open(&store).unwrap();
        assert_eq!(reopened.lookup("1").unwrap().name, "Adele");
    }
}
