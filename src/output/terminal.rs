//! Terminal output utilities.
//!
//! Provides formatting helpers and the colored summary of a result.

use crate::models::{ConflictResult, SubnetDescriptor};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Aligned `name: value` lines describing one subnet.
pub fn descriptor_lines(d: &SubnetDescriptor) -> Vec<String> {
    let fields: [(&str, String); 9] = [
        ("cidr_notation", d.cidr_notation.clone()),
        ("subnet_mask", d.subnet_mask.to_string()),
        ("wildcard_mask", d.wildcard_mask.to_string()),
        ("network_address", d.network_address.to_string()),
        ("broadcast_address", d.broadcast_address.to_string()),
        ("assignable_hosts", d.assignable_hosts.to_string()),
        ("first_assignable_host", d.first_assignable_host.to_string()),
        ("last_assignable_host", d.last_assignable_host.to_string()),
        (
            "next_address",
            crate::processing::next_address(d)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];
    fields
        .iter()
        .map(|(name, value)| format!("{name:>21}: {value}"))
        .collect()
}

/// Summary of a conflict check, one line per data center plus each conflicting block.
pub fn summary_lines(result: &ConflictResult) -> Vec<String> {
    let mut lines = Vec::new();
    let version = result.meta.version.as_deref().unwrap_or("unknown");
    lines.push(format!(
        "# {} against catalog version {} ({} data centers)",
        result.requested_cidr.bold(),
        version,
        result.data_centers.len()
    ));
    if result.requested_cidr_network.is_none() {
        lines.push(format!("# {} catalog echo, no conflict check", "NOTE".on_blue()));
    }
    for dc in &result.data_centers {
        let status = if dc.conflict {
            "CONFLICT".on_red().to_string()
        } else if result.requested_cidr_network.is_some() {
            "ok".green().to_string()
        } else {
            "-".normal().to_string()
        };
        lines.push(format!(
            "{key:<8} {name:<10} {city:<14} {status}",
            key = dc.data_center.key,
            name = dc.data_center.name,
            city = dc.data_center.city,
        ));
        for n in dc.conflicting() {
            lines.push(format!(
                "    {service:<18} {cidr}",
                service = n.service,
                cidr = n.subnet.cidr_notation.red()
            ));
        }
        for e in &dc.errors {
            lines.push(format!("    {:<18} {} {}", e.service, "unresolved".yellow(), e.cidr));
        }
    }
    let conflicts = result.conflicting_data_centers();
    if !conflicts.is_empty() {
        lines.push(format!(
            "# {} data center(s) in conflict: {}",
            conflicts.len(),
            conflicts.join(", ")
        ));
    }
    lines
}

pub fn print_descriptor(d: &SubnetDescriptor) {
    for line in descriptor_lines(d) {
        println!("{line}");
    }
}

pub fn print_summary(result: &ConflictResult) {
    for line in summary_lines(result) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogMeta;
    use crate::processing::{detect_conflicts, parse_catalog, resolve_cidr, Calculator};

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_descriptor_lines() {
        let lines = descriptor_lines(&resolve_cidr("10.0.0.0/24").unwrap());
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "          subnet_mask: 255.255.255.0");
        assert_eq!(lines[8], "         next_address: 10.0.1.0");

        let top = descriptor_lines(&resolve_cidr("255.255.255.0/24").unwrap());
        assert!(top[8].ends_with(": -"));
    }

    #[test]
    fn test_summary_lines() {
        let catalog = parse_catalog(
            r#"{"version":"7","data_centers":[
                {"key":"dal10","name":"DAL10","city":"Dallas","service_network":[{"cidr_blocks":["10.200.80.0/20"]}]},
                {"key":"fra02","name":"FRA02","city":"Frankfurt","service_network":[{"cidr_blocks":["10.200.32.0/20"]}]}]}"#,
        )
        .unwrap();
        let result = detect_conflicts(
            &Calculator,
            "10.200.80.0/24",
            &CatalogMeta::default(),
            &catalog.data_centers,
        )
        .unwrap();
        let lines = summary_lines(&result);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("dal10"));
        assert!(lines[1].contains("CONFLICT"));
        assert!(lines[2].contains("10.200.80.0/20"));
        assert!(lines[3].starts_with("fra02"));
        assert!(lines[4].contains("in conflict: dal10"));
    }
}
