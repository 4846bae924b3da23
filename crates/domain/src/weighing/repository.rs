use super::{NewTransaction, Transaction, TransactionId, TruckId};
use crate::DomainError;
use async_trait::async_trait;

/// Repository interface for weighing transactions
///
/// This trait defines the contract for transaction storage and retrieval.
/// Implementations should be provided in the infrastructure layer.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Most recent `in` record for a truck, whether or not it was weighed out
    async fn find_latest_weigh_in(&self, truck: &TruckId)
    -> Result<Option<Transaction>, DomainError>;

    /// The `out` record closing a session, if any
    async fn find_weigh_out(
        &self,
        session_id: TransactionId,
    ) -> Result<Option<Transaction>, DomainError>;

    /// All records of a session, oldest first
    async fn find_session(
        &self,
        session_id: TransactionId,
    ) -> Result<Vec<Transaction>, DomainError>;

    /// Delete `superseded` (if any) and insert `record` as one unit of work.
    ///
    /// Either both happen or neither does. A record without a session id
    /// gets its own id as session id.
    async fn replace(
        &self,
        superseded: Option<TransactionId>,
        record: NewTransaction,
    ) -> Result<Transaction, DomainError>;
}
