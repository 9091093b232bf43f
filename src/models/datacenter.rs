//! Data-center catalog data model.
//!
//! The catalog is produced by an external ETL job and only read here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named network-block categories a data center publishes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NetworkCategory {
    FrontEndPublic,
    LoadBalancer,
    PrivateNetwork,
    ServiceNetwork,
    SslVpn,
    SslVpnPop,
    Evault,
    FileBlock,
    Icos,
    AdvMon,
    Rhel,
    Ims,
}

impl NetworkCategory {
    /// Every category in catalog order.
    pub const ALL: [NetworkCategory; 12] = [
        NetworkCategory::FrontEndPublic,
        NetworkCategory::LoadBalancer,
        NetworkCategory::PrivateNetwork,
        NetworkCategory::ServiceNetwork,
        NetworkCategory::SslVpn,
        NetworkCategory::SslVpnPop,
        NetworkCategory::Evault,
        NetworkCategory::FileBlock,
        NetworkCategory::Icos,
        NetworkCategory::AdvMon,
        NetworkCategory::Rhel,
        NetworkCategory::Ims,
    ];

    /// Human readable service label attached to each resolved block.
    pub fn label(&self) -> &'static str {
        match self {
            NetworkCategory::FrontEndPublic => "Front-End Public",
            NetworkCategory::LoadBalancer => "Load Balancer",
            NetworkCategory::PrivateNetwork => "Private Network",
            NetworkCategory::ServiceNetwork => "Service Network",
            NetworkCategory::SslVpn => "SSL VPN",
            NetworkCategory::SslVpnPop => "SSL VPN POP",
            NetworkCategory::Evault => "eVault",
            NetworkCategory::FileBlock => "File & Block",
            NetworkCategory::Icos => "ICOS",
            NetworkCategory::AdvMon => "AdvMon (Nimsoft)",
            NetworkCategory::Rhel => "RHEL",
            NetworkCategory::Ims => "IMS",
        }
    }

    /// Field name of the category in the catalog JSON.
    pub fn field_name(&self) -> &'static str {
        match self {
            NetworkCategory::FrontEndPublic => "front_end_public_network",
            NetworkCategory::LoadBalancer => "load_balancers_ips",
            NetworkCategory::PrivateNetwork => "private_networks",
            NetworkCategory::ServiceNetwork => "service_network",
            NetworkCategory::SslVpn => "ssl_vpn",
            NetworkCategory::SslVpnPop => "ssl_vpn_pops",
            NetworkCategory::Evault => "evault",
            NetworkCategory::FileBlock => "file_block",
            NetworkCategory::Icos => "icos",
            NetworkCategory::AdvMon => "advmon",
            NetworkCategory::Rhel => "rhe_ls",
            NetworkCategory::Ims => "ims",
        }
    }
}

impl fmt::Display for NetworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A list of CIDR blocks inside one category.
///
/// Private networks also carry a key and a name (e.g. the VLAN range).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CidrGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
}

/// One data center of the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DataCenter {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub geo_region: String,
    #[serde(default, rename = "front_end_public_network")]
    pub front_end_networks: Vec<CidrGroup>,
    #[serde(default, rename = "load_balancers_ips")]
    pub load_balancer_ips: Vec<CidrGroup>,
    #[serde(default)]
    pub private_networks: Vec<CidrGroup>,
    #[serde(default)]
    pub service_network: Vec<CidrGroup>,
    #[serde(default)]
    pub ssl_vpn: Vec<CidrGroup>,
    #[serde(default)]
    pub ssl_vpn_pops: Vec<CidrGroup>,
    #[serde(default)]
    pub evault: Vec<CidrGroup>,
    #[serde(default)]
    pub file_block: Vec<CidrGroup>,
    #[serde(default)]
    pub icos: Vec<CidrGroup>,
    #[serde(default)]
    pub advmon: Vec<CidrGroup>,
    #[serde(default, rename = "rhe_ls")]
    pub rhels: Vec<CidrGroup>,
    #[serde(default)]
    pub ims: Vec<CidrGroup>,
}

impl DataCenter {
    /// Groups of a single category.
    pub fn groups(&self, category: NetworkCategory) -> &[CidrGroup] {
        match category {
            NetworkCategory::FrontEndPublic => &self.front_end_networks,
            NetworkCategory::LoadBalancer => &self.load_balancer_ips,
            NetworkCategory::PrivateNetwork => &self.private_networks,
            NetworkCategory::ServiceNetwork => &self.service_network,
            NetworkCategory::SslVpn => &self.ssl_vpn,
            NetworkCategory::SslVpnPop => &self.ssl_vpn_pops,
            NetworkCategory::Evault => &self.evault,
            NetworkCategory::FileBlock => &self.file_block,
            NetworkCategory::Icos => &self.icos,
            NetworkCategory::AdvMon => &self.advmon,
            NetworkCategory::Rhel => &self.rhels,
            NetworkCategory::Ims => &self.ims,
        }
    }

    /// Every (category, cidr block) pair in catalog order.
    pub fn cidr_blocks(&self) -> impl Iterator<Item = (NetworkCategory, &str)> + '_ {
        NetworkCategory::ALL.into_iter().flat_map(move |category| {
            self.groups(category).iter().flat_map(move |group| {
                group
                    .cidr_blocks
                    .iter()
                    .map(move |block| (category, block.as_str()))
            })
        })
    }

    /// Number of CIDR blocks over all categories.
    pub fn block_count(&self) -> usize {
        self.cidr_blocks().count()
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}) [{} blocks]",
            self.name,
            self.city,
            self.country,
            self.geo_region,
            self.block_count()
        )
    }
}

/// Catalog metadata echoed back with every result.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub catalog_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,
}

/// The catalog file: metadata plus the data centers.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    #[serde(flatten)]
    pub meta: CatalogMeta,
    #[serde(default)]
    pub data_centers: Vec<DataCenter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DC_JSON: &str = r#"{
        "key": "dal10",
        "name": "DAL10",
        "city": "Dallas",
        "state": "TX",
        "country": "USA",
        "geo_region": "na-south",
        "front_end_public_network": [{"cidr_blocks": ["169.46.0.0/17"]}],
        "private_networks": [{"key": "dal10-1", "name": "Backend", "cidr_blocks": ["10.176.0.0/15", "10.208.0.0/15"]}],
        "service_network": [{"cidr_blocks": ["10.200.80.0/20"]}],
        "unknown_category": [{"cidr_blocks": ["1.1.1.1/32"]}]
    }"#;

    #[test]
    fn test_data_center_deserialize() {
        let dc: DataCenter = serde_json::from_str(DC_JSON).unwrap();
        assert_eq!(dc.key, "dal10");
        assert_eq!(dc.private_networks[0].name.as_deref(), Some("Backend"));
        assert!(dc.ims.is_empty());
        assert_eq!(dc.block_count(), 4);
    }

    #[test]
    fn test_cidr_blocks_order() {
        let dc: DataCenter = serde_json::from_str(DC_JSON).unwrap();
        let blocks: Vec<(NetworkCategory, &str)> = dc.cidr_blocks().collect();
        assert_eq!(
            blocks,
            vec![
                (NetworkCategory::FrontEndPublic, "169.46.0.0/17"),
                (NetworkCategory::PrivateNetwork, "10.176.0.0/15"),
                (NetworkCategory::PrivateNetwork, "10.208.0.0/15"),
                (NetworkCategory::ServiceNetwork, "10.200.80.0/20"),
            ]
        );
    }

    #[test]
    fn test_category_field_names_match_serde() {
        let dc: DataCenter = serde_json::from_str(DC_JSON).unwrap();
        let json = serde_json::to_value(&dc).unwrap();
        for category in NetworkCategory::ALL {
            assert!(
                json.get(category.field_name()).is_some(),
                "missing {}",
                category.field_name()
            );
        }
    }

    #[test]
    fn test_catalog_meta_flatten() {
        let json = r#"{"name":"IBM Cloud IP Ranges","version":"1.2.3","data_centers":[]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.meta.version.as_deref(), Some("1.2.3"));
        assert!(catalog.meta.issues.is_none());
        assert!(catalog.data_centers.is_empty());
    }
}
