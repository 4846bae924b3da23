//! Infrastructure layer - External integrations

pub mod config;
pub mod database;

pub use config::{DatabaseConfig, ServerConfig};
pub use database::{SeaOrmTareRegistry, SeaOrmTransactionRepository};
