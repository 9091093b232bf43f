//! Entry point for callers: resolve a CIDR or check it against the catalog.

use crate::config::Config;
use crate::error::Result;
use crate::index::AddressIndex;
use crate::models::{Catalog, ConflictResult, DataCenter, Ipv4, SubnetDescriptor};
use crate::processing::{
    detect_conflicts, echo_catalog, read_catalog, resolve_ipv4, select_data_centers, SubnetSource,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Requested CIDR that returns the catalog without a conflict check.
pub const ECHO_CIDR: &str = "0.0.0.0/0";

/// Read-through resolver over an [`AddressIndex`].
#[derive(Debug, Clone)]
pub struct Resolver {
    index: Arc<AddressIndex>,
    catalog_file: PathBuf,
}

impl Resolver {
    pub fn new(index: Arc<AddressIndex>, catalog_file: impl Into<PathBuf>) -> Resolver {
        Resolver {
            index,
            catalog_file: catalog_file.into(),
        }
    }

    pub fn from_config(index: Arc<AddressIndex>, config: &Config) -> Resolver {
        Resolver::new(index, config.catalog_file.clone())
    }

    pub fn index(&self) -> &Arc<AddressIndex> {
        &self.index
    }

    /// Index hit, or compute and add to the index.
    ///
    /// A failed upsert is logged; the computed descriptor is still returned.
    pub fn lookup_or_compute(&self, cidr: &Ipv4) -> Result<SubnetDescriptor> {
        if let Some(found) = self.index.lookup(cidr.addr, cidr.mask) {
            log::trace!("Index hit for {cidr}");
            return Ok(found);
        }
        log::trace!("Index miss for {cidr}, computing");
        let computed = resolve_ipv4(cidr)?.with_doc_type();
        if let Err(e) = self.index.upsert(computed.clone()) {
            log::warn!("Could not add {cidr} to the index: {e}");
        }
        Ok(computed)
    }

    /// Resolve a CIDR notation such as "10.0.0.0/24".
    pub fn resolve(&self, cidr_notation: &str) -> Result<SubnetDescriptor> {
        let cidr = Ipv4::new(cidr_notation)?;
        self.lookup_or_compute(&cidr)
    }

    /// Check `cidr_notation` against the data centers named in `data_center_keys`.
    ///
    /// An empty key list or [`ECHO_CIDR`] returns the catalog unchecked.
    pub fn check_conflicts(
        &self,
        cidr_notation: &str,
        data_center_keys: &[String],
    ) -> Result<ConflictResult> {
        let catalog = read_catalog(&self.catalog_file)?;
        self.check_conflicts_in(&catalog, cidr_notation, data_center_keys)
    }

    /// Same as [`Resolver::check_conflicts`] against an already loaded catalog.
    pub fn check_conflicts_in(
        &self,
        catalog: &Catalog,
        cidr_notation: &str,
        data_center_keys: &[String],
    ) -> Result<ConflictResult> {
        let requested = Ipv4::new(cidr_notation)?;
        if data_center_keys.is_empty() || requested.to_string() == ECHO_CIDR {
            log::info!("Echoing catalog for {requested}");
            return Ok(echo_catalog(catalog, cidr_notation, data_center_keys));
        }
        let selected: Vec<DataCenter> = select_data_centers(catalog, data_center_keys)
            .into_iter()
            .cloned()
            .collect();
        detect_conflicts(self, cidr_notation, &catalog.meta, &selected)
    }
}

impl SubnetSource for Resolver {
    fn resolve_subnet(&self, cidr: &Ipv4) -> Result<SubnetDescriptor> {
        self.lookup_or_compute(cidr)
    }
}
