//! SplitBill Ledger - Bill ledger & split reconciliation
//!
//! All bill state changes go through `BillLedger`.
//!
//! # Key Types
//! - `Bill` / `Participant`: the persisted records
//! - `NewBill`: an unvalidated submission
//! - `BillLedger`: owns every bill; create, pay, remove, query
//! - `LedgerStore`: snapshot persistence contract
//!
//! # Flow
//! ```text
//! create:  validate_bill → compute_shares → append → store.save
//! payment: record_payment → (active → completed) → store.save
//! ```

pub mod bill;
pub mod error;
pub mod ledger;
pub mod split;
pub mod store;
pub mod validation;

pub use bill::{Bill, BillId, BillStatus, NewBill, NewParticipant, Participant, SplitMethod};
pub use error::{LedgerError, StoreError, ValidationError};
pub use ledger::{BillLedger, BillSummary};
pub use split::{compute_shares, equal_share};
pub use store::{LedgerStore, MemoryStore};
pub use validation::{validate_bill, AMOUNT_TOLERANCE};
