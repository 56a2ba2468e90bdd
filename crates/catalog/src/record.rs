use std::collections::HashMap;

use foundation::math::GeoPoint;

/// One country as shown on the globe and in the info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    /// Common country name; unique within a catalog.
    pub key: String,
    /// Flag glyph followed by the name.
    pub display_name: String,
    pub position: GeoPoint,
    pub description: String,
    pub culture: String,
    pub monuments: Vec<String>,
    pub population: String,
    pub languages: String,
}

/// Country records keyed by name, iterated in insertion order.
///
/// Re-inserting an existing key replaces the record but keeps its original
/// position.
#[derive(Debug, Clone, Default)]
pub struct CountryCatalog {
    records: Vec<CountryRecord>,
    index: HashMap<String, usize>,
}

impl CountryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    /// Inserts `record`, returning the record it replaced if the key existed.
    pub fn insert(&mut self, record: CountryRecord) -> Option<CountryRecord> {
        match self.index.get(&record.key) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&CountryRecord> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> + '_ {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryCatalog, CountryRecord};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

    fn record(key: &str, description: &str) -> CountryRecord {
        CountryRecord {
            key: key.to_string(),
            display_name: key.to_string(),
            position: GeoPoint::new(0.0, 0.0),
            description: description.to_string(),
            culture: String::new(),
            monuments: Vec::new(),
            population: "N/A".to_string(),
            languages: String::new(),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog = CountryCatalog::from_records([
            record("Peru", ""),
            record("Chad", ""),
            record("Mali", ""),
        ]);
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["Peru", "Chad", "Mali"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut catalog = CountryCatalog::from_records([record("Peru", "old"), record("Chad", "")]);
        let replaced = catalog.insert(record("Peru", "new"));

        assert_eq!(replaced.map(|r| r.description), Some("old".to_string()));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.keys().next(), Some("Peru"));
        assert_eq!(catalog.get("Peru").map(|r| r.description.as_str()), Some("new"));
    }

    #[test]
    fn lookup_miss_is_none() {
        let catalog = CountryCatalog::from_records([record("Peru", "")]);
        assert!(catalog.get("peru").is_none());
        assert!(!catalog.contains("Atlantis"));
    }
}
