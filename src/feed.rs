// Catalog feed - where the product list comes from
//
// Products ship as a JSON document: the bundled sample set compiled into
// the binary, or a file supplied with --catalog. Prices are decimal strings
// ("85.50") or null for priced-unavailable products.

use crate::model::Product;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<Product>,
}

/// The sample catalog compiled into the binary.
pub fn bundled() -> Result<Vec<Product>> {
    parse(BUNDLED_CATALOG).context("bundled catalog is malformed")
}

/// Load a catalog from a JSON file on disk.
pub fn load(path: &Path) -> Result<Vec<Product>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    parse(&raw).with_context(|| format!("Failed to parse catalog file {}", path.display()))
}

fn parse(raw: &str) -> Result<Vec<Product>> {
    let file: CatalogFile = serde_json::from_str(raw)?;
    Ok(file.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses_and_is_not_empty() {
        let products = bundled().unwrap();
        assert!(!products.is_empty());
        // Every product has an identity and a title.
        for product in &products {
            assert!(!product.id.is_empty());
            assert!(!product.title.is_empty());
        }
    }

    #[test]
    fn bundled_catalog_includes_an_unpriced_product() {
        let products = bundled().unwrap();
        assert!(products.iter().any(|p| p.price.is_none()));
        assert!(products.iter().any(|p| p.price.is_some()));
    }

    #[test]
    fn decimal_prices_parse_from_strings() {
        let raw = r#"{"items":[{"id":"x","title":"X","description":"","image":"","category":"","price":"19.90"}]}"#;
        let products = parse(raw).unwrap();
        assert_eq!(products[0].price, Some("19.90".parse().unwrap()));
    }
}
