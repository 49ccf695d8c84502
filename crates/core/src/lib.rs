//! SplitBill Core - Domain types
//!
//! This crate contains the fundamental types shared by the ledger and its adapters:
//! - `Amount`: Non-negative, finite monetary value
//! - `Address`: Normalized chain address identifying a creator or participant

pub mod address;
pub mod amount;

pub use address::{Address, AddressError};
pub use amount::{Amount, AmountError};
