//! Ledger persistence contract
//!
//! The ledger never writes individual records: every mutation replaces the
//! whole snapshot through `save`, and `load` returns the last saved snapshot.

use std::sync::{Arc, Mutex, PoisonError};

use crate::bill::Bill;
use crate::error::StoreError;

/// Durable storage of the full, ordered bill snapshot
pub trait LedgerStore: Send + Sync {
    /// Load the last saved snapshot. A missing or empty store yields no bills.
    fn load(&self) -> Result<Vec<Bill>, StoreError>;

    /// Replace the stored snapshot. Must either fully succeed or leave the
    /// previous snapshot in place.
    fn save(&self, bills: &[Bill]) -> Result<(), StoreError>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn load(&self) -> Result<Vec<Bill>, StoreError> {
        (**self).load()
    }

    fn save(&self, bills: &[Bill]) -> Result<(), StoreError> {
        (**self).save(bills)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for Box<S> {
    fn load(&self) -> Result<Vec<Bill>, StoreError> {
        (**self).load()
    }

    fn save(&self, bills: &[Bill]) -> Result<(), StoreError> {
        (**self).save(bills)
    }
}

/// Process-local store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    bills: Mutex<Vec<Bill>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self
            .bills
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, bills: &[Bill]) -> Result<(), StoreError> {
        *self.bills.lock().unwrap_or_else(PoisonError::into_inner) = bills.to_vec();
        Ok(())
    }
}
