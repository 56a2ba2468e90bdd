use catalog::CountryCatalog;

pub const NO_MATCH_MESSAGE: &str = "Aucun pays trouvé";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub key: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Not enough characters typed; the result list should be closed.
    TooShort,
    /// Long enough, but nothing matched.
    NoMatch,
    Matches(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Matches(hits) => hits,
            _ => &[],
        }
    }
}

/// Case-insensitive substring search over country keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub min_chars: usize,
    pub max_results: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            min_chars: 2,
            max_results: 10,
        }
    }
}

impl SearchFilter {
    /// Matches in catalog order (not sorted), capped at `max_results`.
    pub fn filter(&self, catalog: &CountryCatalog, query: &str) -> SearchOutcome {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < self.min_chars {
            return SearchOutcome::TooShort;
        }

        let hits: Vec<SearchHit> = catalog
            .iter()
            .filter(|r| r.key.to_lowercase().contains(&needle))
            .take(self.max_results)
            .map(|r| SearchHit {
                key: r.key.clone(),
                display_name: r.display_name.clone(),
            })
            .collect();

        if hits.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Matches(hits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchFilter, SearchOutcome};
    use catalog::{CountryCatalog, CountryRecord};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

    fn catalog(keys: &[&str]) -> CountryCatalog {
        CountryCatalog::from_records(keys.iter().map(|key| CountryRecord {
            key: key.to_string(),
            display_name: format!("* {key}"),
            position: GeoPoint::new(0.0, 0.0),
            description: String::new(),
            culture: String::new(),
            monuments: Vec::new(),
            population: String::new(),
            languages: String::new(),
        }))
    }

    fn keys(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.hits().iter().map(|h| h.key.as_str()).collect()
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let catalog = catalog(&["France", "Germany"]);
        let outcome = SearchFilter::default().filter(&catalog, "fra");
        assert_eq!(keys(&outcome), vec!["France"]);
        assert_eq!(outcome.hits()[0].display_name, "* France");

        let outcome = SearchFilter::default().filter(&catalog, "  GERM ");
        assert_eq!(keys(&outcome), vec!["Germany"]);
    }

    #[test]
    fn short_query_clears_regardless_of_content() {
        let catalog = catalog(&["France", "Germany"]);
        assert_eq!(SearchFilter::default().filter(&catalog, "f"), SearchOutcome::TooShort);
        assert_eq!(SearchFilter::default().filter(&catalog, ""), SearchOutcome::TooShort);
        assert_eq!(SearchFilter::default().filter(&catalog, " a  "), SearchOutcome::TooShort);
    }

    #[test]
    fn no_match_is_distinct_from_too_short() {
        let catalog = catalog(&["France", "Germany"]);
        assert_eq!(SearchFilter::default().filter(&catalog, "xyz"), SearchOutcome::NoMatch);
    }

    #[test]
    fn keeps_catalog_order_and_caps_results() {
        let names: Vec<String> = (0..15).map(|i| format!("Land{:02}", 14 - i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let catalog = catalog(&refs);

        let outcome = SearchFilter::default().filter(&catalog, "land");
        let got = keys(&outcome);
        assert_eq!(got.len(), 10);
        assert_eq!(got, refs[..10].to_vec());
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let catalog = catalog(&["Éire", "Côte d'Ivoire"]);
        assert_eq!(keys(&SearchFilter::default().filter(&catalog, "ôt")), vec!["Côte d'Ivoire"]);
        assert_eq!(SearchFilter::default().filter(&catalog, "é"), SearchOutcome::TooShort);
    }
}
