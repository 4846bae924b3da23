use super::{Direction, Transaction, TransactionId, TruckId};
use crate::error::{DomainError, Result};

/// Where a truck stands in the weigh-in/weigh-out protocol.
///
/// Derived from storage on every event and never cached: the latest `in`
/// record for the truck, and whether an `out` record references it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No weigh-in on record (or the truck is anonymous).
    Idle,
    /// Weighed in, waiting for the weigh-out.
    Open(Transaction),
    /// Latest session already weighed out.
    Closed {
        weigh_in: Transaction,
        weigh_out: Transaction,
    },
}

/// Outcome of applying an event to a [`SessionState`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeighingPlan {
    /// Row removed in the same unit of work as the insert (forced overwrite).
    pub supersedes: Option<TransactionId>,
    /// Set for `out` events: the weigh-in being closed.
    pub closes: Option<Transaction>,
}

impl SessionState {
    /// Decide what an event does to this truck's session.
    ///
    /// Errors are returned before anything is written.
    pub fn plan(self, direction: Direction, force: bool, truck: &TruckId) -> Result<WeighingPlan> {
        match (direction, self) {
            (Direction::In, SessionState::Open(open)) if force => Ok(WeighingPlan {
                supersedes: Some(open.id),
                closes: None,
            }),
            (Direction::In, SessionState::Open(open)) => Err(DomainError::Conflict(format!(
                "truck {truck} already has an open session {}, use force=true to overwrite",
                open.session_id
            ))),
            (Direction::In, _) => Ok(WeighingPlan::default()),

            (Direction::None, SessionState::Open(open)) => Err(DomainError::Conflict(format!(
                "truck {truck} has an open session {}, standalone weighing is not allowed",
                open.session_id
            ))),
            (Direction::None, _) => Ok(WeighingPlan::default()),

            (Direction::Out, SessionState::Idle) => Err(DomainError::NotFound(format!(
                "no open session for truck {truck}"
            ))),
            (Direction::Out, SessionState::Open(weigh_in)) => Ok(WeighingPlan {
                supersedes: None,
                closes: Some(weigh_in),
            }),
            (
                Direction::Out,
                SessionState::Closed {
                    weigh_in,
                    weigh_out,
                },
            ) => {
                if !force {
                    return Err(DomainError::Conflict(format!(
                        "session {} of truck {truck} already weighed out, use force=true to overwrite",
                        weigh_in.session_id
                    )));
                }
                Ok(WeighingPlan {
                    supersedes: Some(weigh_out.id),
                    closes: Some(weigh_in),
                })
            }
        }
    }
}
