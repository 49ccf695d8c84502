//! SplitBill RPC - API/CLI orchestrator
//!
//! This crate provides the `splitbill` binary, the CLI commands and the
//! HTTP adapter over the bill ledger.

pub mod api;
pub mod commands;
pub mod config;
pub mod context;

pub use config::AppConfig;
pub use context::AppContext;
