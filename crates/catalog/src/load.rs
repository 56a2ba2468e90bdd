use crate::{CatalogError, CountryCatalog, fallback_catalog, parse_directory};

/// Where the active catalog came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Directory,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: CountryCatalog,
    pub origin: DataOrigin,
}

/// Turns the outcome of a directory fetch into a usable catalog.
///
/// `fetched` is the response body, or the transport error already mapped to
/// `CatalogError::Fetch`. Any failure (including a response with no usable
/// records) falls back to the embedded table; the result is never empty.
pub fn load_or_fallback(fetched: Result<String, CatalogError>) -> LoadedCatalog {
    match fetched.and_then(|body| parse_directory(&body)) {
        Ok(catalog) => {
            tracing::info!(
                countries = catalog.len(),
                "loaded countries with coordinates"
            );
            LoadedCatalog {
                catalog,
                origin: DataOrigin::Directory,
            }
        }
        Err(err) => {
            let catalog = fallback_catalog();
            tracing::warn!(
                error = %err,
                countries = catalog.len(),
                "country directory unavailable, using embedded data"
            );
            LoadedCatalog {
                catalog,
                origin: DataOrigin::Fallback,
            }
        }
    }
}
