//! Resolved subnet data model.

use super::Ipv4;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Document type tag used for every indexed network.
pub const NETWORK_DOC_TYPE: &str = "network";

/// The canonical resolved form of a CIDR.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetDescriptor {
    /// Document type tag, only present on indexed documents.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// CIDR notation as requested, e.g. "10.0.0.0/24".
    pub cidr_notation: String,
    /// Address part of the CIDR, host bits included.
    pub address: Ipv4Addr,
    /// Prefix length (0-32).
    pub subnet_bits: u8,
    pub subnet_mask: Ipv4Addr,
    pub wildcard_mask: Ipv4Addr,
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    /// Usable host addresses; /31 and /32 follow RFC 3021 / host-route rules.
    pub assignable_hosts: u64,
    pub first_assignable_host: Ipv4Addr,
    pub last_assignable_host: Ipv4Addr,
}

impl SubnetDescriptor {
    /// The decomposed CIDR this descriptor was resolved from.
    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.address,
            mask: self.subnet_bits,
        }
    }

    /// Same descriptor tagged as an index document.
    pub fn with_doc_type(mut self) -> Self {
        self.doc_type = Some(NETWORK_DOC_TYPE.to_string());
        self
    }
}

/// One source document as written by the catalog ETL, one JSON file per network.
///
/// Only `cidr_notation` and `subnet_bits` are mandatory, every other field of
/// [`SubnetDescriptor`] may be present. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SourceDocument {
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    pub cidr_notation: String,
    /// Numeric prefix length, stored as a float by some producers.
    pub subnet_bits: f64,
    #[serde(default)]
    pub subnet_mask: Option<Ipv4Addr>,
    #[serde(default)]
    pub wildcard_mask: Option<Ipv4Addr>,
    #[serde(default)]
    pub network_address: Option<Ipv4Addr>,
    #[serde(default)]
    pub broadcast_address: Option<Ipv4Addr>,
    #[serde(default)]
    pub assignable_hosts: Option<u64>,
    #[serde(default)]
    pub first_assignable_host: Option<Ipv4Addr>,
    #[serde(default)]
    pub last_assignable_host: Option<Ipv4Addr>,
}

impl SourceDocument {
    /// Validated prefix length.
    pub fn prefix_len(&self) -> Result<u8> {
        let bits = self.subnet_bits;
        if bits.fract() != 0.0 || !(0.0..=32.0).contains(&bits) {
            return Err(Error::invalid_cidr(
                &self.cidr_notation,
                format!("subnet_bits {bits} is not a prefix length"),
            ));
        }
        Ok(bits as u8)
    }

    /// Parse the CIDR and check it agrees with `subnet_bits`.
    pub fn cidr(&self) -> Result<Ipv4> {
        let cidr = Ipv4::new(&self.cidr_notation)?;
        let bits = self.prefix_len()?;
        if cidr.mask != bits {
            return Err(Error::invalid_cidr(
                &self.cidr_notation,
                format!("subnet_bits {bits} disagrees with the notation"),
            ));
        }
        Ok(cidr)
    }

    /// Merge the stored fields over a freshly computed descriptor.
    ///
    /// Stored values win so the index hands back exactly what was indexed.
    pub fn merge_into(self, mut computed: SubnetDescriptor) -> SubnetDescriptor {
        let mut differs = Vec::new();
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = self.$field {
                    if v != computed.$field {
                        differs.push(stringify!($field));
                    }
                    computed.$field = v;
                }
            };
        }
        take!(subnet_mask);
        take!(wildcard_mask);
        take!(network_address);
        take!(broadcast_address);
        take!(assignable_hosts);
        take!(first_assignable_host);
        take!(last_assignable_host);
        if !differs.is_empty() {
            log::warn!(
                "Stored document {} differs from computed values in {:?}",
                self.cidr_notation,
                differs
            );
        }
        computed.cidr_notation = self.cidr_notation;
        computed.doc_type = Some(
            self.doc_type
                .unwrap_or_else(|| NETWORK_DOC_TYPE.to_string()),
        );
        computed
    }
}
