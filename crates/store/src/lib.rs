//! SplitBill Store - JSON snapshot persistence
//!
//! The whole ledger lives in one pretty-printed JSON array (`bills.json`).
//! Every save writes a sibling temp file, syncs it and renames it over the
//! snapshot, so a crash leaves either the old or the new file, never a mix.

pub mod store;

pub use store::{JsonFileStore, SNAPSHOT_FILE};
