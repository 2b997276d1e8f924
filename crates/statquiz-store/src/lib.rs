//! Record store backends.
//!
//! [`SqliteRecordStore`] is the production backend, one SQLite file per
//! installation with an additive versioned schema. [`MemoryRecordStore`]
//! backs tests and the degraded no-persistence mode used when the database
//! file cannot be opened.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
