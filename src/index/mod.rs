//! Search-indexed store of resolved subnets and its reindex worker.

mod document;
mod store;
mod worker;

pub use document::{
    list_documents, load_document, parse_document, write_document, IndexEntry, IndexKey,
};
pub use store::{
    AddressIndex, BuildStats, IndexOptions, IndexQuery, IndexSnapshot, DEFAULT_BATCH_SIZE,
    DEFAULT_SEARCH_LIMIT,
};
pub use worker::{next_wait, ReadySignal, ReindexHandle, ReindexWorker, WorkerState};
