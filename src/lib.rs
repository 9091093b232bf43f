//! CIDR calculator: subnet arithmetic, an indexed cache of resolved subnets
//! and conflict checks against a data-center catalog.
//!
//! - [`processing`] - subnet arithmetic, catalog loading, conflict detection
//! - [`index`] - the address index and its reindex worker
//! - [`resolver`] - read-through resolve and conflict checks
//! - [`output`] - CSV and terminal rendering

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod output;
pub mod processing;
pub mod resolver;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{AddressIndex, IndexOptions, ReindexHandle, ReindexWorker, WorkerState};
pub use models::{ConflictResult, Ipv4, SubnetDescriptor};
pub use resolver::Resolver;
