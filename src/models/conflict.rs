//! Conflict check result model.

use super::{CatalogMeta, DataCenter, SubnetDescriptor};
use serde::{Deserialize, Serialize};

/// One resolved catalog block annotated with its overlap flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CidrNetwork {
    /// Service label of the category the block came from.
    pub service: String,
    #[serde(flatten)]
    pub subnet: SubnetDescriptor,
    /// True if the block overlaps the requested CIDR.
    pub conflict: bool,
}

/// A catalog block that could not be resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockError {
    pub service: String,
    pub cidr: String,
    pub error: String,
}

/// A data center with the per-block conflict detail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DataCenterResult {
    #[serde(flatten)]
    pub data_center: DataCenter,
    #[serde(default)]
    pub cidr_networks: Vec<CidrNetwork>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BlockError>,
    /// True if any block of this data center conflicts.
    pub conflict: bool,
}

impl DataCenterResult {
    /// Echo a data center without computing conflicts.
    pub fn unchecked(data_center: DataCenter) -> Self {
        DataCenterResult {
            data_center,
            cidr_networks: vec![],
            errors: vec![],
            conflict: false,
        }
    }

    /// Blocks flagged as conflicting.
    pub fn conflicting(&self) -> impl Iterator<Item = &CidrNetwork> {
        self.cidr_networks.iter().filter(|n| n.conflict)
    }
}

/// Outcome of a conflict check for one requested CIDR.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConflictResult {
    #[serde(flatten)]
    pub meta: CatalogMeta,
    pub requested_cidr: String,
    /// Resolved requested CIDR, absent in catalog echo mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_cidr_network: Option<SubnetDescriptor>,
    pub data_centers: Vec<DataCenterResult>,
}

impl ConflictResult {
    /// True if any data center conflicts.
    pub fn has_conflict(&self) -> bool {
        self.data_centers.iter().any(|dc| dc.conflict)
    }

    /// Keys of the data centers in conflict.
    pub fn conflicting_data_centers(&self) -> Vec<&str> {
        self.data_centers
            .iter()
            .filter(|dc| dc.conflict)
            .map(|dc| dc.data_center.key.as_str())
            .collect()
    }

    /// Count of blocks that failed to resolve, over all data centers.
    pub fn error_count(&self) -> usize {
        self.data_centers.iter().map(|dc| dc.errors.len()).sum()
    }
}
