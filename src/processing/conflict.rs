//! Conflict detection between a requested CIDR and the data-center catalog.
//!
//! Every catalog block is resolved through the same lookup path as the
//! requested CIDR and compared with a numeric prefix-overlap test.

use crate::error::{Error, Result};
use crate::models::{
    BlockError, CatalogMeta, CidrNetwork, ConflictResult, DataCenter, DataCenterResult, Ipv4,
    SubnetDescriptor,
};
use crate::processing::calculator;
use regex::Regex;
use std::sync::OnceLock;

/// Source of resolved subnets, the seam between detection and the index.
pub trait SubnetSource {
    /// Resolve a parsed CIDR into its descriptor.
    fn resolve_subnet(&self, cidr: &Ipv4) -> Result<SubnetDescriptor>;
}

/// Plain arithmetic, no cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl SubnetSource for Calculator {
    fn resolve_subnet(&self, cidr: &Ipv4) -> Result<SubnetDescriptor> {
        calculator::resolve_ipv4(cidr)
    }
}

/// Regex pulling a CIDR out of a catalog cell wrapped in quotes or backticks,
/// optionally followed by a parenthesized note. The whole cell must match.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(r#"^[\s`'"]*(\d{1,3}(?:\.\d{1,3}){3}/\d{1,2})[\s`'"]*(?:\(.*\))?\s*$"#)
            .expect("Invalid Regex")
    })
}

/// Parse a catalog block, tolerating surrounding backticks or notes.
pub fn parse_block(raw: &str) -> Result<Ipv4> {
    match Ipv4::new(raw) {
        Ok(ipv4) => Ok(ipv4),
        Err(e) => match get_cidr_regex().captures(raw) {
            Some(caps) => {
                log::trace!("parse_block: extracted {} from {:?}", &caps[1], raw);
                Ipv4::new(&caps[1])
            }
            None => Err(e),
        },
    }
}

/// Check one data center against the requested CIDR.
///
/// All blocks are evaluated, a conflict does not stop the scan.
pub fn check_data_center<S: SubnetSource + ?Sized>(
    source: &S,
    requested: &Ipv4,
    data_center: &DataCenter,
) -> DataCenterResult {
    let mut cidr_networks = Vec::with_capacity(data_center.block_count());
    let mut errors = Vec::new();

    for (category, raw) in data_center.cidr_blocks() {
        let resolved = parse_block(raw).and_then(|cidr| source.resolve_subnet(&cidr));
        match resolved {
            Ok(subnet) => {
                let conflict = calculator::overlaps(requested, &subnet.cidr());
                if conflict {
                    log::debug!(
                        "{} {} block {} overlaps {}",
                        data_center.key,
                        category,
                        subnet.cidr_notation,
                        requested
                    );
                }
                cidr_networks.push(CidrNetwork {
                    service: category.label().to_string(),
                    subnet,
                    conflict,
                });
            }
            Err(e) => {
                let e = Error::UnresolvableCatalogEntry {
                    data_center: data_center.key.clone(),
                    service: category.label().to_string(),
                    cidr: raw.to_string(),
                    reason: e.to_string(),
                };
                log::warn!("{e}");
                errors.push(BlockError {
                    service: category.label().to_string(),
                    cidr: raw.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    let conflict = cidr_networks.iter().any(|n| n.conflict);
    DataCenterResult {
        data_center: data_center.clone(),
        cidr_networks,
        errors,
        conflict,
    }
}

/// Detect conflicts of `requested_cidr` against every given data center.
///
/// Fails only if the requested CIDR itself is invalid.
pub fn detect_conflicts<S: SubnetSource + ?Sized>(
    source: &S,
    requested_cidr: &str,
    meta: &CatalogMeta,
    data_centers: &[DataCenter],
) -> Result<ConflictResult> {
    let requested = Ipv4::new(requested_cidr)?;
    let mut requested_network = source.resolve_subnet(&requested)?;
    requested_network.doc_type = None;

    let results: Vec<DataCenterResult> = data_centers
        .iter()
        .map(|dc| check_data_center(source, &requested, dc))
        .collect();

    let conflicts = results.iter().filter(|dc| dc.conflict).count();
    log::info!(
        "Checked {} against {} data centers: {} in conflict",
        requested,
        results.len(),
        conflicts
    );

    Ok(ConflictResult {
        meta: meta.clone(),
        requested_cidr: requested_cidr.trim().to_string(),
        requested_cidr_network: Some(requested_network),
        data_centers: results,
    })
}
