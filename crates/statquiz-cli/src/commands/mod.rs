//! Subcommand implementations and shared helpers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use statquiz_core::bank::Question;
use statquiz_core::parser;
use statquiz_core::store::RecordStore;
use statquiz_store::{MemoryRecordStore, SqliteRecordStore};

pub mod init;
pub mod profile;
pub mod progress;
pub mod quiz;
pub mod validate;

/// Default database location under the platform data directory.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("statquiz")
        .join("statquiz.db")
}

/// Open the record store, falling back to an in-memory store when the
/// database cannot be opened. The quiz stays playable either way; only
/// history is lost.
pub fn open_store(db: Option<PathBuf>) -> Arc<dyn RecordStore> {
    let path = db.unwrap_or_else(default_db_path);
    match SqliteRecordStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("record store unavailable, history disabled: {e}");
            Arc::new(MemoryRecordStore::new())
        }
    }
}

/// Load one bank file or every bank in a directory, flattened to the
/// question list a session runs over.
pub fn load_questions(bank: &Path, topic: Option<u32>) -> Result<Vec<Question>> {
    let banks = if bank.is_dir() {
        parser::load_bank_directory(bank)?
    } else {
        vec![parser::parse_bank(bank)?]
    };

    Ok(banks.iter().flat_map(|b| b.for_topic(topic)).collect())
}

/// Format seconds as `m:ss`.
pub fn format_secs(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
