mod session_ledger;
mod truck_locks;

pub use session_ledger::SessionLedger;
pub use truck_locks::{TruckGuard, TruckLocks};
