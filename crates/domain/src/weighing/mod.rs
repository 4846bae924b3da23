mod containers;
mod direction;
mod net_weight;
mod registry;
mod repository;
mod request;
mod session;
mod transaction;
mod truck_id;
mod unit;

pub use containers::ContainerList;
pub use direction::Direction;
pub use net_weight::NetWeight;
pub use registry::{ContainerTare, TareRegistry};
pub use repository::TransactionRepository;
pub use request::{RawWeighingRequest, WeighingRequest};
pub use session::{SessionState, WeighingPlan};
pub use transaction::{NewTransaction, SessionSummary, Transaction, TransactionId};
pub use truck_id::TruckId;
pub use unit::WeightUnit;
