//! Application context - wires configuration, store and ledger together

use splitbill_ledger::{BillLedger, LedgerStore};
use splitbill_store::JsonFileStore;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;

/// Application context - one ledger per process, shared by CLI commands and the HTTP adapter
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub ledger: Arc<BillLedger>,
}

impl AppContext {
    /// Open the ledger stored under `config.data_dir`
    pub fn new(config: AppConfig) -> Result<Self, anyhow::Error> {
        let store = JsonFileStore::in_dir(&config.data_dir)?;
        info!(path = %store.path().display(), "opening ledger");
        Self::with_store(config, store)
    }

    /// Open a ledger over an arbitrary store
    pub fn with_store(
        config: AppConfig,
        store: impl LedgerStore + 'static,
    ) -> Result<Self, anyhow::Error> {
        let ledger = BillLedger::open(store)?;
        info!(bills = ledger.len(), "ledger ready");

        Ok(Self {
            config,
            ledger: Arc::new(ledger),
        })
    }

    /// Persist the current snapshot before the process exits
    pub fn shutdown(&self) -> Result<(), anyhow::Error> {
        self.ledger.flush()?;
        info!(bills = self.ledger.len(), "ledger flushed");
        Ok(())
    }
}
