use foundation::math::GeoPoint;

use crate::{CountryCatalog, CountryRecord};

/// Embedded last-resort data used when the directory cannot be loaded.
pub fn fallback_catalog() -> CountryCatalog {
    CountryCatalog::from_records([CountryRecord {
        key: "France".to_string(),
        display_name: "\u{1F1EB}\u{1F1F7} France".to_string(),
        position: GeoPoint::new(46.2276, 2.2137),
        description: "Pays de la gastronomie et de l'art de vivre, la France séduit par sa diversité culturelle.".to_string(),
        culture: "Gastronomie, mode, littérature".to_string(),
        monuments: vec![
            "Tour Eiffel".to_string(),
            "Louvre".to_string(),
            "Versailles".to_string(),
        ],
        population: "67 millions".to_string(),
        languages: "Français".to_string(),
    }])
}

#[cfg(test)]
mod tests {
    use super::fallback_catalog;

    #[test]
    fn fallback_is_never_empty_and_valid() {
        let catalog = fallback_catalog();
        assert!(!catalog.is_empty());
        assert!(catalog.iter().all(|r| r.position.is_valid()));
        assert!(catalog.contains("France"));
    }
}
