//! Package dimension lookup for catalog items.

use std::collections::HashMap;
use std::path::Path;

use fedex_async::error::ShippingError;
use fedex_async::types::package::PackageDimensions;

/// Keyed dimension lookup: collection + size -> measurements.
///
/// The quote pipeline treats this as an external collaborator: `Ok(None)`
/// means the pair is unknown (a caller problem), while `Err` is reserved
/// for the catalog itself being broken.
pub trait DimensionSource: Send + Sync {
    /// Fetches dimensions for one catalog item and size key.
    fn get(&self, collection: &str, size: &str) -> Result<Option<PackageDimensions>, ShippingError>;
}

/// In-memory dimension table keyed by lowercased collection and size.
#[derive(Debug)]
pub struct DimensionCatalog {
    entries: HashMap<(String, String), PackageDimensions>,
}

/// On-disk catalog shape: `{ "<collection>": { "<size>": { dimensions } } }`.
type CatalogFile = HashMap<String, HashMap<String, PackageDimensions>>;

impl DimensionCatalog {
    /// Built-in table used when no catalog file is supplied.
    #[must_use]
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        let table: &[(&str, &str, PackageDimensions)] = &[
            ("posters", "a3", dims(0.4, 45.0, 8.0, 8.0)),
            ("posters", "a2", dims(0.6, 65.0, 10.0, 10.0)),
            ("posters", "a1", dims(0.9, 80.0, 12.0, 12.0)),
            ("prints", "small", dims(0.8, 35.0, 28.0, 4.0)),
            ("prints", "medium", dims(1.4, 45.0, 35.0, 5.0)),
            ("prints", "large", dims(2.2, 60.0, 45.0, 6.0)),
            ("frames", "small", dims(2.5, 25.0, 20.0, 15.0)),
            ("frames", "medium", dims(3.2, 50.0, 40.0, 8.0)),
            ("frames", "large", dims(4.5, 75.0, 55.0, 9.0)),
        ];
        for (collection, size, dimensions) in table {
            entries.insert(
                ((*collection).to_string(), (*size).to_string()),
                *dimensions,
            );
        }
        Self { entries }
    }

    /// Loads a catalog file, replacing the built-in table entirely.
    pub fn from_file(path: &Path) -> Result<Self, ShippingError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ShippingError::database(
                format!("failed to read dimension catalog {}: {err}", path.display()),
                "The package catalog is unavailable.",
            )
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses the on-disk catalog shape.
    pub fn from_json_str(raw: &str) -> Result<Self, ShippingError> {
        let file: CatalogFile = serde_json::from_str(raw).map_err(|err| {
            ShippingError::database(
                format!("dimension catalog is not valid JSON: {err}"),
                "The package catalog is unavailable.",
            )
        })?;

        let mut entries = HashMap::new();
        for (collection, sizes) in file {
            for (size, dimensions) in sizes {
                entries.insert((normalize(&collection), normalize(&size)), dimensions);
            }
        }
        Ok(Self { entries })
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DimensionSource for DimensionCatalog {
    fn get(&self, collection: &str, size: &str) -> Result<Option<PackageDimensions>, ShippingError> {
        let key = (normalize(collection), normalize(size));
        let Some(dimensions) = self.entries.get(&key).copied() else {
            return Ok(None);
        };
        if !dimensions.is_valid() {
            return Err(ShippingError::database(
                format!("catalog entry for {}/{} has non-positive measurements", key.0, key.1),
                "The package catalog entry is invalid.",
            ));
        }
        Ok(Some(dimensions))
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

fn dims(weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> PackageDimensions {
    PackageDimensions {
        weight_kg,
        length_cm,
        width_cm,
        height_cm,
    }
}

#[cfg(test)]
mod tests {
    use fedex_async::error::ErrorKind;

    use super::*;

    #[test]
    fn builtin_lookup_is_case_insensitive_and_trimmed() {
        let catalog = DimensionCatalog::builtin();
        let entry = catalog.get(" Frames ", "SMALL").expect("lookup works");
        let entry = entry.expect("frames/small exists");
        assert!((entry.weight_kg - 2.5).abs() < f64::EPSILON);
        assert!((entry.length_cm - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_pairs_are_none_not_errors() {
        let catalog = DimensionCatalog::builtin();
        assert!(catalog.get("posters", "a0").expect("lookup works").is_none());
        assert!(catalog.get("sculptures", "small").expect("lookup works").is_none());
    }

    #[test]
    fn parses_the_on_disk_shape() {
        let catalog = DimensionCatalog::from_json_str(
            r#"{
                "Tubes": {
                    "Long": { "weightKg": 1.1, "lengthCm": 90.0, "widthCm": 10.0, "heightCm": 10.0 }
                }
            }"#,
        )
        .expect("catalog parses");

        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("tubes", "long").expect("lookup works");
        assert!(entry.is_some(), "keys are normalized on load");
    }

    #[test]
    fn malformed_catalog_json_is_a_database_error() {
        let err = DimensionCatalog::from_json_str("{ not json").expect_err("must fail");
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[test]
    fn corrupt_entries_surface_as_database_errors() {
        let catalog = DimensionCatalog::from_json_str(
            r#"{
                "posters": {
                    "a2": { "weightKg": 0.0, "lengthCm": 65.0, "widthCm": 10.0, "heightCm": 10.0 }
                }
            }"#,
        )
        .expect("catalog parses");

        let err = catalog.get("posters", "a2").expect_err("corrupt entry must error");
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.kind.http_status(), 500);
    }

    #[test]
    fn builtin_catalog_is_fully_valid() {
        let catalog = DimensionCatalog::builtin();
        assert!(!catalog.is_empty());
        for ((collection, size), entry) in &catalog.entries {
            assert!(entry.is_valid(), "bad builtin entry {collection}/{size}");
        }
    }
}
