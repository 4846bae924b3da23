mod connection;
mod tare_registry;
mod transaction_repository;

pub mod entities;

pub use connection::connect;
pub use tare_registry::SeaOrmTareRegistry;
pub use transaction_repository::SeaOrmTransactionRepository;

use domain::DomainError;
use sea_orm::DbErr;

pub(crate) fn db_error(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
