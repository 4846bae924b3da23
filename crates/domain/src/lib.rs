//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Value objects (Direction, WeightUnit, TruckId, ContainerList, NetWeight)
//! - The Transaction entity
//! - The weigh-in/weigh-out session state machine
//! - Repository and registry interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod error;
pub mod weighing;

// Re-export commonly used types
pub use error::DomainError;
pub use weighing::{
    ContainerList, ContainerTare, Direction, NetWeight, NewTransaction, RawWeighingRequest,
    SessionState, SessionSummary, TareRegistry, Transaction, TransactionId,
    TransactionRepository, TruckId, WeighingPlan, WeighingRequest, WeightUnit,
};
