//! Bundled sample catalog for the CLI and documentation examples.

use crate::catalog::Catalog;
use crate::error::Result;

/// Raw JSON of the bundled catalog: thirty well-known films.
pub const DEMO_CATALOG_JSON: &str = include_str!("../data/demo_catalog.json");

pub fn demo_catalog() -> Result<Catalog> {
    Catalog::from_json(DEMO_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(catalog.len(), 30);
        assert!(catalog.genres().iter().any(|g| g == "Sci-Fi"));
    }
}
