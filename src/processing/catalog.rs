//! Catalog file loading and data-center selection.

use crate::error::{Error, Result};
use crate::models::{Catalog, ConflictResult, DataCenter, DataCenterResult};
use itertools::Itertools;
use std::path::Path;

/// Read the data-center catalog from a JSON file.
///
/// # Returns
/// * `Ok(Catalog)` - The parsed catalog
/// * `Err` - If the file is missing or a field has the wrong shape (with its JSON path)
pub fn read_catalog(catalog_file: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(catalog_file).map_err(|e| {
        log::error!("Cannot read catalog file {}: {e}", catalog_file.display());
        Error::Io(e)
    })?;
    parse_catalog(&json)
}

/// Parse catalog JSON.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let catalog: Catalog = serde_path_to_error::deserialize(&mut deserializer)?;
    log::debug!(
        "Catalog {:?} version {:?} with {} data centers",
        catalog.meta.name,
        catalog.meta.version,
        catalog.data_centers.len()
    );
    Ok(catalog)
}

/// True if the data center is selected by one of `keys`.
///
/// Keys match the data center key or its lower-cased name. An empty list selects all.
fn is_selected(data_center: &DataCenter, keys: &[String]) -> bool {
    if keys.is_empty() {
        return true;
    }
    let name = data_center.name.to_lowercase();
    keys.iter().any(|k| {
        let k = k.trim().to_lowercase();
        k == name || k == data_center.key.to_lowercase()
    })
}

/// Data centers selected by `keys`, in catalog order.
pub fn select_data_centers<'a>(catalog: &'a Catalog, keys: &[String]) -> Vec<&'a DataCenter> {
    let selected: Vec<&DataCenter> = catalog
        .data_centers
        .iter()
        .filter(|dc| is_selected(dc, keys))
        .collect();
    let unknown = keys
        .iter()
        .filter(|k| !catalog.data_centers.iter().any(|dc| is_selected(dc, std::slice::from_ref(*k))))
        .join(", ");
    if !unknown.is_empty() {
        log::warn!("Data centers not in catalog: {unknown}");
    }
    selected
}

/// The catalog echoed back without any conflict computation.
pub fn echo_catalog(catalog: &Catalog, requested_cidr: &str, keys: &[String]) -> ConflictResult {
    ConflictResult {
        meta: catalog.meta.clone(),
        requested_cidr: requested_cidr.trim().to_string(),
        requested_cidr_network: None,
        data_centers: select_data_centers(catalog, keys)
            .into_iter()
            .cloned()
            .map(DataCenterResult::unchecked)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CATALOG: &str = "src/tests/test_data/catalog_test_01.json";

    #[test]
    fn test_read_catalog() {
        let catalog = read_catalog(Path::new(TEST_CATALOG)).expect("Error reading catalog");
        assert_eq!(catalog.data_centers.len(), 3);
        assert_eq!(catalog.meta.version.as_deref(), Some("2024.01.15"));
        assert_eq!(catalog.data_centers[0].key, "ams03");
    }

    #[test]
    fn test_read_catalog_missing_file() {
        let err = read_catalog(Path::new("src/tests/test_data/no_such_file.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_parse_catalog_reports_path() {
        let json = r#"{"data_centers":[{"key":"dal10","name":"DAL10","ssl_vpn":[{"cidr_blocks":"10.0.0.0/8"}]}]}"#;
        match parse_catalog(json).unwrap_err() {
            Error::Json { path, .. } => assert_eq!(path, "data_centers[0].ssl_vpn[0].cidr_blocks"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_select_data_centers() {
        let catalog = read_catalog(Path::new(TEST_CATALOG)).unwrap();
        assert_eq!(select_data_centers(&catalog, &[]).len(), 3);

        let keys = vec!["DAL10".to_string(), "fra02".to_string()];
        let selected = select_data_centers(&catalog, &keys);
        let selected: Vec<&str> = selected.iter().map(|dc| dc.key.as_str()).collect();
        assert_eq!(selected, vec!["dal10", "fra02"]);

        let keys = vec!["nowhere".to_string()];
        assert!(select_data_centers(&catalog, &keys).is_empty());
    }

    #[test]
    fn test_echo_catalog() {
        let catalog = read_catalog(Path::new(TEST_CATALOG)).unwrap();
        let echo = echo_catalog(&catalog, "0.0.0.0/0", &[]);
        assert_eq!(echo.data_centers.len(), 3);
        assert!(echo.requested_cidr_network.is_none());
        assert!(!echo.has_conflict());
        assert!(echo.data_centers.iter().all(|dc| dc.cidr_networks.is_empty()));
    }
}
