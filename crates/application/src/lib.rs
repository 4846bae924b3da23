//! Application layer - Use cases and business workflows

pub mod ledger;

pub use ledger::{SessionLedger, TruckLocks};
