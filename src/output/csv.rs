//! CSV output of conflict results, one row per catalog block.

use crate::models::{ConflictResult, DataCenterResult};

use super::terminal::format_field;

/// Header row matching [`block_rows`].
pub const CSV_HEADER: &str = r#"  "data_center",        "service",          "cidr_notation",     "network",   "broadcast",  "hosts", "conflict""#;

/// CSV rows for every resolved block and every unresolvable entry of one data center.
pub fn block_rows(dc: &DataCenterResult) -> Vec<String> {
    let mut rows: Vec<String> = dc
        .cidr_networks
        .iter()
        .map(|n| {
            format!(
                "{key},{service},{cidr},{network},{broadcast},{hosts},{conflict}",
                key = format_field(&dc.data_center.key, 15),
                service = format_field(&n.service, 18),
                cidr = format_field(&n.subnet.cidr_notation, 20),
                network = format_field(n.subnet.network_address, 17),
                broadcast = format_field(n.subnet.broadcast_address, 17),
                hosts = format_field(n.subnet.assignable_hosts, 12),
                conflict = format_field(n.conflict, 7),
            )
        })
        .collect();
    rows.extend(dc.errors.iter().map(|e| {
        format!(
            "{key},{service},{cidr},{network},{broadcast},{hosts},{conflict}",
            key = format_field(&dc.data_center.key, 15),
            service = format_field(&e.service, 18),
            cidr = format_field(e.cidr.replace('"', "'"), 20),
            network = format_field("", 17),
            broadcast = format_field("", 17),
            hosts = format_field("", 12),
            conflict = format_field("error", 7),
        )
    }));
    rows
}

/// Full CSV document for a result, header first.
pub fn conflict_csv(result: &ConflictResult) -> Vec<String> {
    std::iter::once(CSV_HEADER.to_string())
        .chain(result.data_centers.iter().flat_map(block_rows))
        .collect()
}

/// Print a result as CSV to stdout.
pub fn print_conflicts_csv(result: &ConflictResult) {
    log::info!(
        "#Start print_conflicts_csv() for {} over {} data centers",
        result.requested_cidr,
        result.data_centers.len()
    );
    for row in conflict_csv(result) {
        println!("{row}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogMeta;
    use crate::processing::{detect_conflicts, parse_catalog, Calculator};

    const CATALOG: &str = r#"{"data_centers":[{"key":"dal10","name":"DAL10",
        "private_networks":[{"cidr_blocks":["10.176.0.0/15","bogus"]}],
        "service_network":[{"cidr_blocks":["10.200.80.0/20"]}]}]}"#;

    #[test]
    fn test_conflict_csv() {
        let catalog = parse_catalog(CATALOG).unwrap();
        let result =
            detect_conflicts(&Calculator, "10.200.81.0/24", &CatalogMeta::default(), &catalog.data_centers)
                .unwrap();
        let rows = conflict_csv(&result);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], CSV_HEADER);
        assert_eq!(
            rows[1],
            r#"        "dal10", "Private Network",     "10.176.0.0/15",     "10.176.0.0", "10.177.255.255",    "131070","false""#
        );
        assert!(rows[2].contains(r#""10.200.80.0/20""#));
        assert!(rows[2].ends_with(r#" "true""#));
        assert!(rows[3].contains(r#""bogus""#));
        assert!(rows[3].ends_with(r#""error""#));
    }
}
