use super::{ContainerList, Direction, NetWeight, TruckId, WeighingRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub type TransactionId = i32;

/// One persisted scale event.
///
/// Rows are never updated: closing a session writes a new `out` row that
/// shares the weigh-in's `session_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub session_id: TransactionId,
    pub direction: Direction,
    pub truck: TruckId,
    pub containers: ContainerList,
    /// Gross weight in kg. On `out` rows this repeats the weigh-in's bruto.
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    /// Only `out` rows carry a net weight.
    pub neto: Option<NetWeight>,
    pub produce: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn is_weigh_out(&self) -> bool {
        self.direction == Direction::Out
    }
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// `None` starts a new session keyed by the row's own id.
    pub session_id: Option<TransactionId>,
    pub direction: Direction,
    pub truck: TruckId,
    pub containers: ContainerList,
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    pub neto: Option<NetWeight>,
    pub produce: String,
    pub timestamp: DateTime<Utc>,
}

impl NewTransaction {
    /// Record for an `in` or `none` reading.
    pub fn opening(request: &WeighingRequest, timestamp: DateTime<Utc>) -> Self {
        Self {
            session_id: None,
            direction: request.direction,
            truck: request.truck.clone(),
            containers: request.containers.clone(),
            bruto: request.weight_kg,
            truck_tara: None,
            neto: None,
            produce: request.produce.clone(),
            timestamp,
        }
    }

    /// `out` record closing `weigh_in`. Cargo data is copied from the session.
    pub fn closing(
        weigh_in: &Transaction,
        truck_tara: i64,
        neto: NetWeight,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: Some(weigh_in.session_id),
            direction: Direction::Out,
            truck: weigh_in.truck.clone(),
            containers: weigh_in.containers.clone(),
            bruto: weigh_in.bruto,
            truck_tara: Some(truck_tara),
            neto: Some(neto),
            produce: weigh_in.produce.clone(),
            timestamp,
        }
    }
}

/// What the caller gets back after an event is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub session_id: TransactionId,
    pub truck: TruckId,
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    pub neto: Option<NetWeight>,
}

impl From<&Transaction> for SessionSummary {
    fn from(tx: &Transaction) -> Self {
        Self {
            session_id: tx.session_id,
            truck: tx.truck.clone(),
            bruto: tx.bruto,
            truck_tara: tx.truck_tara,
            neto: tx.neto,
        }
    }
}
