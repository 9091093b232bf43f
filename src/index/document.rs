//! Index documents: one JSON file per known network.

use crate::error::{Error, Result};
use crate::models::{SourceDocument, SubnetDescriptor, NETWORK_DOC_TYPE};
use crate::processing::resolve_ipv4;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

/// Index key: address as written in the CIDR plus prefix length.
pub type IndexKey = (u32, u8);

/// A subnet descriptor plus index-only metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Stable identifier, re-adding the same network overwrites it.
    pub id: String,
    /// Document type tag.
    #[serde(rename = "type")]
    pub doc_type: String,
    pub descriptor: SubnetDescriptor,
}

impl IndexEntry {
    /// Wrap a descriptor, deriving the identifier from its address and prefix.
    pub fn new(descriptor: SubnetDescriptor) -> IndexEntry {
        let doc_type = descriptor
            .doc_type
            .clone()
            .unwrap_or_else(|| NETWORK_DOC_TYPE.to_string());
        IndexEntry {
            id: Self::id_for(descriptor.address, descriptor.subnet_bits),
            doc_type: doc_type.clone(),
            descriptor: SubnetDescriptor {
                doc_type: Some(doc_type),
                ..descriptor
            },
        }
    }

    /// Identifier of the document for `address/bits`, e.g. "10.0.0.0_24".
    pub fn id_for(address: Ipv4Addr, bits: u8) -> String {
        format!("{address}_{bits}")
    }

    pub fn key(&self) -> IndexKey {
        (u32::from(self.descriptor.address), self.descriptor.subnet_bits)
    }

    /// File name used when the entry is written to a documents directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }
}

/// Parse one source document and resolve it into an index entry.
pub fn parse_document(json: &str) -> Result<IndexEntry> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let doc: SourceDocument = serde_path_to_error::deserialize(&mut deserializer)?;
    let cidr = doc.cidr()?;
    let computed = resolve_ipv4(&cidr)?;
    Ok(IndexEntry::new(doc.merge_into(computed)))
}

/// Read and parse one document file; any failure is an index build error.
pub fn load_document(path: &Path) -> Result<IndexEntry> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| Error::index_build(format!("error reading file '{}': {e}", path.display())))?;
    parse_document(&json)
        .map_err(|e| Error::index_build(format!("error parsing JSON '{}': {e}", path.display())))
}

/// All `*.json` files of a documents directory, sorted by name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::index_build(format!("error reading directory '{}': {e}", dir.display()))
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| {
                Error::index_build(format!("error listing directory '{}': {e}", dir.display()))
            })?
            .path();
        if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        } else {
            log::trace!("Skipping non-document {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Write an entry as `<id>.json`, via a temporary file so readers never see half a document.
pub fn write_document(dir: &Path, entry: &IndexEntry) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(entry.file_name());
    let tmp = dir.join(format!(".{}.tmp", entry.id));
    let json = serde_json::to_string_pretty(&entry.descriptor)?;
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, &path)?;
    Ok(path)
}
