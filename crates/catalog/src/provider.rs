//! Parsing of the remote country directory (REST Countries v3.1 field subset).

use foundation::math::GeoPoint;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{CatalogError, CountryCatalog, CountryRecord};

pub const REST_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,capitalInfo,region,subregion,population,languages,cca2,flags";

/// Shown for every remotely loaded country; the directory has no landmark data.
pub const PLACEHOLDER_MONUMENTS: [&str; 3] =
    ["National Monument", "Historical Site", "Cultural Landmark"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DirectoryName {
    pub common: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CapitalInfo {
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
}

/// One entry of the directory response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryCountry {
    pub name: DirectoryName,
    #[serde(default)]
    pub capital_info: Option<CapitalInfo>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    /// Kept raw; some mirrors send floats or strings here.
    #[serde(default)]
    pub population: Option<Value>,
    #[serde(default)]
    pub languages: Option<Map<String, Value>>,
    #[serde(default)]
    pub cca2: String,
}

impl DirectoryCountry {
    /// Capital coordinates, if present, finite and in range.
    pub fn capital_position(&self) -> Option<GeoPoint> {
        let latlng = self.capital_info.as_ref()?.latlng.as_ref()?;
        let [lat, lon] = latlng.as_slice() else {
            return None;
        };
        let geo = GeoPoint::new(*lat, *lon);
        geo.is_valid().then_some(geo)
    }

    /// Numeric population, whatever JSON number type carried it.
    pub fn population_count(&self) -> Option<f64> {
        self.population.as_ref().and_then(Value::as_f64)
    }

    /// Language names joined in document order, or "Multiple" when unknown.
    pub fn languages_text(&self) -> String {
        let names: Vec<&str> = self
            .languages
            .iter()
            .flat_map(|m| m.values())
            .filter_map(Value::as_str)
            .collect();
        if names.is_empty() {
            "Multiple".to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn description(&self) -> String {
        let subregion = match self.subregion.as_deref() {
            Some(s) if !s.is_empty() => format!(" ({s})"),
            _ => String::new(),
        };
        format!(
            "A vibrant nation in {}{} known for its rich cultural heritage and diverse landscapes.",
            self.region, subregion
        )
    }

    /// Converts to a catalog record; `None` when the capital has no usable coordinates.
    pub fn into_record(self) -> Option<CountryRecord> {
        let name = self.name.common.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let position = self.capital_position()?;
        let languages = self.languages_text();
        let display_name = match flag_emoji(&self.cca2) {
            Some(flag) => format!("{flag} {name}"),
            None => name.clone(),
        };

        Some(CountryRecord {
            display_name,
            position,
            description: self.description(),
            culture: languages.clone(),
            monuments: PLACEHOLDER_MONUMENTS.iter().map(|m| m.to_string()).collect(),
            population: format_population(self.population_count()),
            languages,
            key: name,
        })
    }
}

/// Regional-indicator flag for a two-letter country code.
pub fn flag_emoji(cca2: &str) -> Option<String> {
    let code = cca2.trim();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    code.bytes()
        .map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
        .collect()
}

/// Population rounded to a whole count with `,` thousands separators;
/// "N/A" when unknown, non-finite or not positive.
pub fn format_population(population: Option<f64>) -> String {
    let Some(n) = population.filter(|n| n.is_finite() && n.round() >= 1.0) else {
        return "N/A".to_string();
    };
    let digits = (n.round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses a directory response body into a catalog.
///
/// Entries that fail to deserialize or lack capital coordinates are skipped.
/// A body that is not a JSON array, or that yields no records, is an error.
pub fn parse_directory(body: &str) -> Result<CountryCatalog, CatalogError> {
    let entries: Vec<Value> =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut catalog = CountryCatalog::new();
    let mut skipped = 0usize;
    for entry in entries {
        let record = serde_json::from_value::<DirectoryCountry>(entry)
            .ok()
            .and_then(DirectoryCountry::into_record);
        match record {
            Some(record) => {
                catalog.insert(record);
            }
            None => skipped += 1,
        }
    }

    tracing::debug!(
        loaded = catalog.len(),
        skipped,
        "parsed country directory"
    );

    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(catalog)
}
