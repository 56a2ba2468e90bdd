//! Country data: records, the insertion-ordered catalog, and the policy that
//! turns a remote directory response (or its failure) into a usable catalog.

pub mod fallback;
pub mod load;
pub mod provider;
pub mod record;

pub use fallback::*;
pub use load::*;
pub use provider::*;
pub use record::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Fetch(String),
    Parse(String),
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Fetch(msg) => write!(f, "country directory fetch failed: {msg}"),
            CatalogError::Parse(msg) => write!(f, "country directory response invalid: {msg}"),
            CatalogError::Empty => write!(f, "country directory returned no usable records"),
        }
    }
}

impl std::error::Error for CatalogError {}
