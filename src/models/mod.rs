//! Domain models for the CIDR calculator.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`SubnetDescriptor`] - the fully resolved subnet
//! - [`Catalog`] and [`DataCenter`] - the data-center network catalog
//! - [`ConflictResult`] - outcome of a conflict check

mod conflict;
mod datacenter;
mod ipv4;
mod subnet;

// Re-export public types
pub use conflict::{BlockError, CidrNetwork, ConflictResult, DataCenterResult};
pub use datacenter::{Catalog, CatalogMeta, CidrGroup, DataCenter, NetworkCategory};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, ip_after_subnet, num_addresses, Ipv4, MAX_LENGTH,
};
pub use subnet::{SourceDocument, SubnetDescriptor, NETWORK_DOC_TYPE};
