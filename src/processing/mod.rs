//! Subnet calculation and conflict logic.
//!
//! This module contains the business logic:
//! - [`calculator`] - subnet arithmetic
//! - [`catalog`] - catalog loading and data-center selection
//! - [`conflict`] - overlap detection against the catalog

mod calculator;
mod catalog;
mod conflict;

// Re-export public functions
pub use calculator::{
    assignable_hosts, next_address, overlaps, parse_cidr, resolve, resolve_cidr, resolve_ipv4,
};
pub use catalog::{echo_catalog, parse_catalog, read_catalog, select_data_centers};
pub use conflict::{check_data_center, detect_conflicts, parse_block, Calculator, SubnetSource};
