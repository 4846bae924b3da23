use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use domain::{
    ContainerList, DomainError, NetWeight, NewTransaction, SessionState, SessionSummary,
    TareRegistry, TransactionId, TransactionRepository, TruckId, WeighingRequest,
};

use super::TruckLocks;

/// Resolves scale events into weighing sessions.
///
/// Every event for a named truck runs under that truck's lock, from the
/// session lookup to the final write.
pub struct SessionLedger {
    transactions: Arc<dyn TransactionRepository>,
    tares: Arc<dyn TareRegistry>,
    truck_locks: TruckLocks,
}

impl SessionLedger {
    pub fn new(transactions: Arc<dyn TransactionRepository>, tares: Arc<dyn TareRegistry>) -> Self {
        Self {
            transactions,
            tares,
            truck_locks: TruckLocks::new(),
        }
    }

    pub async fn record_event(
        &self,
        request: WeighingRequest,
    ) -> Result<SessionSummary, DomainError> {
        // Anonymous weighings never look up a session, so there is nothing to race on.
        let _guard = if request.truck.is_unspecified() {
            None
        } else {
            Some(self.truck_locks.lock(&request.truck).await)
        };

        let state = self.session_state(&request.truck).await?;
        let plan = match state.plan(request.direction, request.force, &request.truck) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(truck = %request.truck, direction = %request.direction, "Weighing rejected: {}", e);
                return Err(e);
            }
        };

        let now = Utc::now();
        let record = match &plan.closes {
            None => NewTransaction::opening(&request, now),
            Some(weigh_in) => {
                let tares = self.container_tares(&weigh_in.containers).await?;
                let neto = NetWeight::compute(weigh_in.bruto, request.weight_kg, &tares)?;
                NewTransaction::closing(weigh_in, request.weight_kg, neto, now)
            }
        };

        if let Some(superseded) = plan.supersedes {
            info!(truck = %request.truck, superseded, "Forced overwrite of previous weighing");
        }

        let saved = self.transactions.replace(plan.supersedes, record).await?;

        info!(
            truck = %saved.truck,
            session_id = saved.session_id,
            direction = %saved.direction,
            bruto = saved.bruto,
            "Weighing recorded"
        );

        Ok(SessionSummary::from(&saved))
    }

    /// Summary of a session: the closing record once weighed out, else the opening one.
    pub async fn session(
        &self,
        session_id: TransactionId,
    ) -> Result<SessionSummary, DomainError> {
        let records = self.transactions.find_session(session_id).await?;

        records
            .iter()
            .find(|t| t.is_weigh_out())
            .or_else(|| records.first())
            .map(SessionSummary::from)
            .ok_or_else(|| DomainError::NotFound(format!("session {session_id} not found")))
    }

    async fn session_state(&self, truck: &TruckId) -> Result<SessionState, DomainError> {
        if truck.is_unspecified() {
            return Ok(SessionState::Idle);
        }

        let Some(weigh_in) = self.transactions.find_latest_weigh_in(truck).await? else {
            return Ok(SessionState::Idle);
        };

        Ok(match self.transactions.find_weigh_out(weigh_in.session_id).await? {
            Some(weigh_out) => SessionState::Closed {
                weigh_in,
                weigh_out,
            },
            None => SessionState::Open(weigh_in),
        })
    }

    /// Tare in kg per container, `None` where the registry can't tell.
    async fn container_tares(
        &self,
        containers: &ContainerList,
    ) -> Result<Vec<Option<i64>>, DomainError> {
        let mut tares = Vec::with_capacity(containers.len());
        for container_id in containers.iter() {
            let tare = self
                .tares
                .lookup(container_id)
                .await?
                .and_then(|entry| entry.tare_kg());

            if tare.is_none() {
                debug!(container_id = %container_id, "Container tare unknown, net weight will be na");
            }
            tares.push(tare);
        }
        Ok(tares)
    }
}
