//! Durable key-value store subsystem
//!
//! The store is an append-only, checksum-verified record log with an
//! in-memory ordered index. The log is replayed on open and never
//! truncated; the latest record for a key wins.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - Durable writes fsync before acknowledgment
//! - Replay-on-open rebuilds the index from the existing log

mod checksum;
mod engine;
mod errors;
mod log;
mod record;

pub use checksum::{compute_checksum, verify_checksum};
pub use engine::Store;
pub use errors::{StoreError, StoreResult};
pub use log::LogReader;
pub use record::LogRecord;
