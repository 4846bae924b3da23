use application::SessionLedger;
use infrastructure::{SeaOrmTareRegistry, SeaOrmTransactionRepository};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub struct AppState {
    pub ledger: SessionLedger,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let ledger = SessionLedger::new(
            Arc::new(SeaOrmTransactionRepository::new(db.clone())),
            Arc::new(SeaOrmTareRegistry::new(db.clone())),
        );
        Self { ledger, db }
    }
}
