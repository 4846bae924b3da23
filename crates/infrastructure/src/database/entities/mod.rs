pub mod containers_registered;
pub mod transactions;
