//! Lexis Progress Store
//!
//! Durable per-node mastery records behind a small key-value contract.
//!
//! # Semantics
//!
//! - A session report overwrites the node's record; mastery is the latest
//!   session's score, not an average.
//! - Reads fail soft: missing or corrupt data reads as empty.
//! - The store assumes a single writer. Concurrent hosts sharing a backend
//!   lose updates, last write wins.

mod backend;
mod error;
mod record;
mod store;

#[cfg(feature = "rocksdb")]
pub use backend::RocksBackend;
pub use backend::{JsonFileBackend, KeyValueBackend, MemoryBackend};
pub use error::{Result, StoreError};
pub use record::{mastery_level, now_millis, NodeProgress, ProgressMap, SessionReport};
pub use store::{ProgressStore, PROGRESS_KEY, SNAPSHOT_KEY};
