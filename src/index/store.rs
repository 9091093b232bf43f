//! The address index: a read-through cache of resolved subnets.
//!
//! Readers load an immutable [`IndexSnapshot`] through an [`ArcSwap`], so a
//! rebuild is built off to the side and swapped in whole. Descriptors computed
//! on a cache miss land in a small overlay until a rebuild contains them.

use super::document::{list_documents, load_document, write_document, IndexEntry, IndexKey};
use crate::error::{Error, Result};
use crate::models::SubnetDescriptor;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Default number of documents applied per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default top-N of a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// A query: exact address match plus a half-open prefix length range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub address: Ipv4Addr,
    pub subnet_bits: Range<u8>,
    pub limit: usize,
}

impl IndexQuery {
    /// Documents for `address` with a prefix length in `[bits, bits + 1)`.
    pub fn exact(address: Ipv4Addr, bits: u8) -> IndexQuery {
        IndexQuery {
            address,
            subnet_bits: bits..bits.saturating_add(1),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Every prefix length indexed for `address`.
    pub fn address(address: Ipv4Addr) -> IndexQuery {
        IndexQuery {
            address,
            subnet_bits: 0..33,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> IndexQuery {
        self.limit = limit;
        self
    }

    fn key_range(&self) -> Option<Range<IndexKey>> {
        if self.subnet_bits.start >= self.subnet_bits.end {
            return None;
        }
        let addr = u32::from(self.address);
        Some((addr, self.subnet_bits.start)..(addr, self.subnet_bits.end))
    }

    fn matches(&self, key: &IndexKey) -> bool {
        key.0 == u32::from(self.address) && self.subnet_bits.contains(&key.1)
    }
}

/// One immutable build of the index.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    entries: BTreeMap<IndexKey, Arc<IndexEntry>>,
    ids: HashMap<String, IndexKey>,
    generation: u64,
    built_at: Option<DateTime<Utc>>,
}

impl IndexSnapshot {
    fn insert(&mut self, entry: IndexEntry) {
        let key = entry.key();
        if let Some(old_key) = self.ids.insert(entry.id.clone(), key) {
            if old_key != key {
                self.entries.remove(&old_key);
            }
        }
        self.entries.insert(key, Arc::new(entry));
    }

    /// Apply one batch of documents. Later documents overwrite earlier ones with the same id.
    fn apply_batch(&mut self, batch: Vec<IndexEntry>) {
        for entry in batch {
            self.insert(entry);
        }
    }

    pub fn search(&self, query: &IndexQuery) -> Vec<Arc<IndexEntry>> {
        match query.key_range() {
            Some(range) => self
                .entries
                .range(range)
                .map(|(_, e)| e.clone())
                .take(query.limit)
                .collect(),
            None => vec![],
        }
    }

    pub fn get(&self, key: &IndexKey) -> Option<&Arc<IndexEntry>> {
        self.entries.get(key)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Arc<IndexEntry>> {
        self.ids.get(id).and_then(|key| self.entries.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<IndexEntry>> {
        self.entries.values()
    }
}

/// On-disk form of a snapshot.
#[derive(Serialize, Deserialize, Debug)]
struct PersistedIndex {
    generation: u64,
    built_at: Option<DateTime<Utc>>,
    documents: Vec<SubnetDescriptor>,
}

/// Statistics of one completed rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildStats {
    pub docs_indexed: usize,
    pub batches: usize,
    pub generation: u64,
    pub duration: Duration,
}

impl BuildStats {
    /// Average build time per document in milliseconds.
    pub fn doc_average_ms(&self) -> f64 {
        if self.docs_indexed == 0 {
            return 0.0;
        }
        self.duration.as_secs_f64() * 1000.0 / self.docs_indexed as f64
    }
}

/// Index settings.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Documents per batch during a rebuild.
    pub batch_size: usize,
    /// Snapshot file written after every successful rebuild.
    pub index_file: Option<PathBuf>,
    /// Directory upserted documents are written to, so the next rebuild keeps them.
    pub documents_dir: Option<PathBuf>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            index_file: None,
            documents_dir: None,
        }
    }
}

/// Search-indexed store of resolved subnets.
pub struct AddressIndex {
    snapshot: ArcSwap<IndexSnapshot>,
    overlay: RwLock<HashMap<IndexKey, Arc<IndexEntry>>>,
    options: IndexOptions,
    building: Mutex<()>,
    worker_attached: AtomicBool,
}

impl AddressIndex {
    /// Create an empty index.
    pub fn new(options: IndexOptions) -> AddressIndex {
        AddressIndex {
            snapshot: ArcSwap::from_pointee(IndexSnapshot::default()),
            overlay: RwLock::new(HashMap::new()),
            options,
            building: Mutex::new(()),
            worker_attached: AtomicBool::new(false),
        }
    }

    /// Create an index and load the last persisted snapshot if there is one.
    ///
    /// An unreadable snapshot file is logged and the index starts empty.
    pub fn open(options: IndexOptions) -> AddressIndex {
        let index = AddressIndex::new(options);
        if let Some(file) = index.options.index_file.clone() {
            match load_snapshot(&file) {
                Ok(Some(snapshot)) => {
                    log::info!(
                        "Loaded index {} generation {} with {} documents",
                        file.display(),
                        snapshot.generation,
                        snapshot.len()
                    );
                    index.snapshot.store(Arc::new(snapshot));
                }
                Ok(None) => log::info!("No index file at {}, starting empty", file.display()),
                Err(e) => log::warn!("Ignoring index file {}: {e}", file.display()),
            }
        }
        index
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Current snapshot, stable for as long as the caller holds it.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.snapshot.load_full()
    }

    /// Find the stored descriptor for `address/bits`, `None` on a miss.
    ///
    /// Upserted entries shadow the snapshot.
    pub fn lookup(&self, address: Ipv4Addr, bits: u8) -> Option<SubnetDescriptor> {
        {
            let overlay = self.overlay.read().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = overlay.get(&(u32::from(address), bits)) {
                return Some(entry.descriptor.clone());
            }
        }
        let query = IndexQuery::exact(address, bits).with_limit(1);
        self.snapshot
            .load()
            .search(&query)
            .into_iter()
            .next()
            .map(|entry| entry.descriptor.clone())
    }

    /// Run a query against the snapshot and the overlay, overlay entries win.
    pub fn search(&self, query: &IndexQuery) -> Vec<SubnetDescriptor> {
        let mut found: BTreeMap<IndexKey, Arc<IndexEntry>> = BTreeMap::new();
        let full = IndexQuery {
            limit: usize::MAX,
            ..query.clone()
        };
        for entry in self.snapshot.load().search(&full) {
            found.insert(entry.key(), entry);
        }
        {
            let overlay = self.overlay.read().unwrap_or_else(|e| e.into_inner());
            for (key, entry) in overlay.iter().filter(|(k, _)| query.matches(k)) {
                found.insert(*key, entry.clone());
            }
        }
        found
            .into_values()
            .take(query.limit)
            .map(|e| e.descriptor.clone())
            .collect()
    }

    /// Insert or overwrite the document for this descriptor.
    ///
    /// Repeating an upsert leaves the index unchanged.
    pub fn upsert(&self, descriptor: SubnetDescriptor) -> Result<()> {
        let entry = IndexEntry::new(descriptor);
        if let Some(dir) = &self.options.documents_dir {
            let path = write_document(dir, &entry)?;
            log::trace!("Persisted {} to {}", entry.id, path.display());
        }
        let mut overlay = self.overlay.write().unwrap_or_else(|e| e.into_inner());
        overlay.insert(entry.key(), Arc::new(entry));
        Ok(())
    }

    /// Number of documents visible to readers.
    pub fn len(&self) -> usize {
        let snapshot = self.snapshot.load();
        let overlay = self.overlay.read().unwrap_or_else(|e| e.into_inner());
        snapshot.len()
            + overlay
                .keys()
                .filter(|k| snapshot.get(k).is_none())
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.snapshot.load().generation
    }

    /// Replace the index content with a fresh build from `source_dir`.
    ///
    /// Readers keep the previous snapshot until the new one is complete. A bad
    /// document aborts the build and leaves the previous snapshot serving.
    pub fn rebuild(&self, source_dir: &Path) -> Result<BuildStats> {
        let _guard = self
            .building
            .try_lock()
            .map_err(|_| Error::Worker("a rebuild is already running".to_string()))?;

        log::debug!("Indexing started from {}", source_dir.display());
        let started = Instant::now();
        let batch_size = self.options.batch_size.max(1);

        let files = list_documents(source_dir)?;
        let mut next = IndexSnapshot::default();
        let mut batch: Vec<IndexEntry> = Vec::with_capacity(batch_size);
        let mut docs_indexed = 0;
        let mut batches = 0;

        for file in &files {
            batch.push(load_document(file)?);
            if batch.len() >= batch_size {
                docs_indexed += batch.len();
                batches += 1;
                next.apply_batch(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)));
                log::trace!("Indexed batch #{batches}, {docs_indexed} documents so far");
            }
        }
        if !batch.is_empty() {
            docs_indexed += batch.len();
            batches += 1;
            next.apply_batch(batch);
        }

        next.generation = self.snapshot.load().generation + 1;
        next.built_at = Some(Utc::now());
        let next = Arc::new(next);
        self.snapshot.store(next.clone());
        self.prune_overlay(&next);

        if let Some(file) = &self.options.index_file {
            if let Err(e) = save_snapshot(file, &next) {
                log::error!("Failed to persist index to {}: {e}", file.display());
            }
        }

        let stats = BuildStats {
            docs_indexed,
            batches,
            generation: next.generation,
            duration: started.elapsed(),
        };
        log::debug!(
            "Indexing completed: docs_indexed={} batches={} index_time={:?} doc_average_ms={:.3}",
            stats.docs_indexed,
            stats.batches,
            stats.duration,
            stats.doc_average_ms()
        );
        Ok(stats)
    }

    /// Drop overlay entries the new snapshot holds with identical content.
    ///
    /// An upsert that differs from the rebuilt document keeps shadowing it.
    fn prune_overlay(&self, snapshot: &IndexSnapshot) {
        let mut overlay = self.overlay.write().unwrap_or_else(|e| e.into_inner());
        overlay.retain(|key, entry| match snapshot.get(key) {
            Some(stored) => stored.descriptor != entry.descriptor,
            None => true,
        });
    }

    /// Register the single reindex worker allowed for this index.
    pub(crate) fn attach_worker(&self) -> Result<()> {
        self.worker_attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| Error::Worker("a reindex worker is already attached".to_string()))
    }

    pub(crate) fn detach_worker(&self) {
        self.worker_attached.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for AddressIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot.load();
        f.debug_struct("AddressIndex")
            .field("generation", &snapshot.generation)
            .field("documents", &snapshot.len())
            .field("options", &self.options)
            .finish()
    }
}

fn save_snapshot(file: &Path, snapshot: &IndexSnapshot) -> Result<()> {
    let persisted = PersistedIndex {
        generation: snapshot.generation,
        built_at: snapshot.built_at,
        documents: snapshot.entries().map(|e| e.descriptor.clone()).collect(),
    };
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = file.with_extension("tmp");
    std::fs::write(&tmp, serde_json::to_vec(&persisted)?)?;
    std::fs::rename(&tmp, file)?;
    Ok(())
}

fn load_snapshot(file: &Path) -> Result<Option<IndexSnapshot>> {
    let json = match std::fs::read_to_string(file) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let persisted: PersistedIndex = serde_path_to_error::deserialize(&mut deserializer)?;
    let mut snapshot = IndexSnapshot {
        generation: persisted.generation,
        built_at: persisted.built_at,
        ..Default::default()
    };
    snapshot.apply_batch(persisted.documents.into_iter().map(IndexEntry::new).collect());
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::resolve_cidr;

    const TEST_NETWORKS: &str = "src/tests/test_data/networks";

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn write_docs(dir: &Path, cidrs: &[&str]) {
        for cidr in cidrs {
            let entry = IndexEntry::new(resolve_cidr(cidr).unwrap());
            write_document(dir, &entry).unwrap();
        }
    }

    #[test]
    fn test_rebuild_from_test_data() {
        let index = AddressIndex::new(IndexOptions::default());
        let stats = index.rebuild(Path::new(TEST_NETWORKS)).expect("rebuild failed");
        assert_eq!(stats.docs_indexed, 4);
        assert_eq!(stats.generation, 1);
        assert_eq!(index.len(), 4);

        let hit = index.lookup(ip("10.0.0.0"), 24).expect("expected a hit");
        assert_eq!(hit.broadcast_address, ip("10.0.0.255"));
        assert_eq!(hit.doc_type.as_deref(), Some("network"));
        assert!(index.lookup(ip("10.0.0.0"), 25).is_none());
        assert!(index.lookup(ip("10.0.0.1"), 24).is_none());
    }

    #[test]
    fn test_rebuild_batches() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(
            dir.path(),
            &["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24", "10.0.4.0/24"],
        );
        let index = AddressIndex::new(IndexOptions {
            batch_size: 2,
            ..Default::default()
        });
        let stats = index.rebuild(dir.path()).unwrap();
        assert_eq!(stats.docs_indexed, 5);
        assert_eq!(stats.batches, 3);
    }

    #[test]
    fn test_search_prefix_range() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path(), &["10.0.0.0/8", "10.0.0.0/16", "10.0.0.0/24", "10.1.0.0/16"]);
        let index = AddressIndex::new(IndexOptions::default());
        index.rebuild(dir.path()).unwrap();

        let all = index.search(&IndexQuery::address(ip("10.0.0.0")));
        let bits: Vec<u8> = all.iter().map(|d| d.subnet_bits).collect();
        assert_eq!(bits, vec![8, 16, 24]);

        let query = IndexQuery {
            address: ip("10.0.0.0"),
            subnet_bits: 9..24,
            limit: 5,
        };
        let bits: Vec<u8> = index.search(&query).iter().map(|d| d.subnet_bits).collect();
        assert_eq!(bits, vec![16]);

        let empty = IndexQuery {
            address: ip("10.0.0.0"),
            subnet_bits: 20..10,
            limit: 5,
        };
        assert!(index.search(&empty).is_empty());
        assert_eq!(index.search(&IndexQuery::address(ip("10.0.0.0")).with_limit(1)).len(), 1);
    }

    #[test]
    fn test_corrupt_document_keeps_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path(), &["10.0.0.0/24"]);
        let index = AddressIndex::new(IndexOptions::default());
        index.rebuild(dir.path()).unwrap();

        std::fs::write(dir.path().join("broken.json"), "{\"cidr_notation\":").unwrap();
        write_docs(dir.path(), &["10.9.0.0/16"]);
        let err = index.rebuild(dir.path()).unwrap_err();
        assert!(err.is_index_build());
        assert_eq!(index.generation(), 1);
        assert!(index.lookup(ip("10.0.0.0"), 24).is_some());
        assert!(index.lookup(ip("10.9.0.0"), 16).is_none());
    }

    #[test]
    fn test_missing_source_dir_is_build_error() {
        let index = AddressIndex::new(IndexOptions::default());
        let err = index.rebuild(Path::new("src/tests/test_data/no_such_dir")).unwrap_err();
        assert!(err.is_index_build());
        assert_eq!(index.generation(), 0);
    }

    #[test]
    fn test_upsert_idempotent() {
        let index = AddressIndex::new(IndexOptions::default());
        let d = resolve_cidr("172.16.0.0/12").unwrap();
        index.upsert(d.clone()).unwrap();
        let once = index.search(&IndexQuery::address(ip("172.16.0.0")));
        index.upsert(d).unwrap();
        let twice = index.search(&IndexQuery::address(ip("172.16.0.0")));
        assert_eq!(once, twice);
        assert_eq!(index.len(), 1);
        assert!(index.lookup(ip("172.16.0.0"), 12).is_some());
    }

    #[test]
    fn test_upsert_overwrites_indexed_document() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path(), &["10.0.0.0/24"]);
        let index = AddressIndex::new(IndexOptions::default());
        index.rebuild(dir.path()).unwrap();

        let mut changed = resolve_cidr("10.0.0.0/24").unwrap();
        changed.assignable_hosts = 7;
        index.upsert(changed).unwrap();
        assert_eq!(index.lookup(ip("10.0.0.0"), 24).unwrap().assignable_hosts, 7);
        let found = index.search(&IndexQuery::address(ip("10.0.0.0")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].assignable_hosts, 7);
        assert_eq!(index.len(), 1);

        // a rebuild from the unchanged document does not undo the upsert
        index.rebuild(dir.path()).unwrap();
        assert_eq!(index.lookup(ip("10.0.0.0"), 24).unwrap().assignable_hosts, 7);
    }

    #[test]
    fn test_overlay_pruned_once_rebuild_matches() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path(), &["10.0.0.0/24"]);
        let index = AddressIndex::new(IndexOptions::default());
        index.rebuild(dir.path()).unwrap();

        let mut changed = resolve_cidr("10.0.0.0/24").unwrap();
        changed.assignable_hosts = 7;
        write_document(dir.path(), &IndexEntry::new(changed.clone())).unwrap();
        index.upsert(changed).unwrap();
        index.rebuild(dir.path()).unwrap();
        assert!(index.overlay.read().unwrap().is_empty());
        assert_eq!(index.lookup(ip("10.0.0.0"), 24).unwrap().assignable_hosts, 7);
    }

    #[test]
    fn test_concurrent_rebuild_rejected() {
        let index = AddressIndex::new(IndexOptions::default());
        let _running = index.building.lock().unwrap();
        match index.rebuild(Path::new(TEST_NETWORKS)) {
            Err(Error::Worker(_)) => {}
            other => panic!("expected a worker error, got {other:?}"),
        }
        assert_eq!(index.generation(), 0);
    }

    #[test]
    fn test_upsert_survives_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path(), &["10.0.0.0/24"]);
        let index = AddressIndex::new(IndexOptions::default());
        index.upsert(resolve_cidr("192.168.0.0/16").unwrap()).unwrap();
        index.rebuild(dir.path()).unwrap();
        assert!(index.lookup(ip("192.168.0.0"), 16).is_some());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_upsert_persists_document() {
        let dir = tempfile::tempdir().unwrap();
        let index = AddressIndex::new(IndexOptions {
            documents_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        index.upsert(resolve_cidr("192.168.0.0/16").unwrap()).unwrap();
        assert!(dir.path().join("192.168.0.0_16.json").exists());

        // next rebuild picks it up from disk and the overlay empties
        index.rebuild(dir.path()).unwrap();
        assert_eq!(index.snapshot().len(), 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_snapshot_persisted_and_reopened() {
        let docs = tempfile::tempdir().unwrap();
        let state = tempfile::tempdir().unwrap();
        write_docs(docs.path(), &["10.0.0.0/24", "10.0.1.0/31"]);
        let options = IndexOptions {
            index_file: Some(state.path().join("networks.index.json")),
            ..Default::default()
        };
        let index = AddressIndex::open(options.clone());
        assert!(index.is_empty());
        index.rebuild(docs.path()).unwrap();

        let reopened = AddressIndex::open(options);
        assert_eq!(reopened.generation(), 1);
        assert_eq!(reopened.len(), 2);
        assert_eq!(
            reopened.lookup(ip("10.0.1.0"), 31),
            index.lookup(ip("10.0.1.0"), 31)
        );
    }

    #[test]
    fn test_open_ignores_corrupt_snapshot() {
        let state = tempfile::tempdir().unwrap();
        let file = state.path().join("networks.index.json");
        std::fs::write(&file, "garbage").unwrap();
        let index = AddressIndex::open(IndexOptions {
            index_file: Some(file),
            ..Default::default()
        });
        assert!(index.is_empty());
    }

    #[test]
    fn test_single_worker_attach() {
        let index = AddressIndex::new(IndexOptions::default());
        index.attach_worker().unwrap();
        assert!(index.attach_worker().is_err());
        index.detach_worker();
        assert!(index.attach_worker().is_ok());
    }

    #[test]
    fn test_concurrent_lookups_during_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let cidrs: Vec<String> = (0..200).map(|i| format!("10.{}.{}.0/24", i / 256, i % 256)).collect();
        let refs: Vec<&str> = cidrs.iter().map(|s| s.as_str()).collect();
        write_docs(dir.path(), &refs);

        let index = Arc::new(AddressIndex::new(IndexOptions {
            batch_size: 16,
            ..Default::default()
        }));
        index.rebuild(dir.path()).unwrap();

        let readers: Vec<_> = (0..100)
            .map(|i| {
                let index = index.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let n = (i * 7 + round) % 200;
                        let addr = Ipv4Addr::new(10, (n / 256) as u8, (n % 256) as u8, 0);
                        let d = index.lookup(addr, 24).expect("entry vanished mid-rebuild");
                        assert_eq!(d, resolve_cidr(&format!("{addr}/24")).unwrap().with_doc_type());
                    }
                })
            })
            .collect();
        for _ in 0..5 {
            index.rebuild(dir.path()).unwrap();
        }
        for r in readers {
            r.join().expect("reader panicked");
        }
        assert_eq!(index.generation(), 6);
    }
}
