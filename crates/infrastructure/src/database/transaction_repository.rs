use crate::database::db_error;
use crate::database::entities::transactions;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use domain::{
    ContainerList, Direction, DomainError, NetWeight, NewTransaction, Transaction, TransactionId,
    TransactionRepository, TruckId,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

pub struct SeaOrmTransactionRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_transaction(&self, model: transactions::Model) -> Result<Transaction, DomainError> {
        let direction: Direction = model.direction.parse().map_err(|_| {
            DomainError::Storage(format!(
                "Unknown direction '{}' in transaction {}",
                model.direction, model.id
            ))
        })?;

        let truck = TruckId::new(model.truck)
            .map_err(|e| DomainError::Storage(format!("Transaction {}: {}", model.id, e)))?;

        let session_id = model.session_id.ok_or_else(|| {
            DomainError::Storage(format!("Transaction {} has no session id", model.id))
        })?;

        // A NULL neto is only meaningful ("na") on weigh-out rows.
        let neto = (direction == Direction::Out).then(|| NetWeight::from(model.neto));

        Ok(Transaction {
            id: model.id,
            session_id,
            direction,
            truck,
            containers: ContainerList::parse(&model.containers),
            bruto: model.bruto,
            truck_tara: model.truck_tara,
            neto,
            produce: model.produce,
            timestamp: model.datetime.with_timezone(&Utc),
        })
    }

    fn to_offset(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
        dt.fixed_offset()
    }
}

/// Unique violations on (session_id, direction) mean someone else closed the session first.
fn write_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            DomainError::Conflict(format!("weighing already recorded: {detail}"))
        }
        _ => db_error(e),
    }
}

#[async_trait]
impl TransactionRepository for SeaOrmTransactionRepository {
    async fn find_latest_weigh_in(
        &self,
        truck: &TruckId,
    ) -> Result<Option<Transaction>, DomainError> {
        let model = transactions::Entity::find()
            .filter(transactions::Column::Direction.eq(Direction::In.as_str()))
            .filter(transactions::Column::Truck.eq(truck.as_str()))
            .order_by_desc(transactions::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(|m| self.model_to_transaction(m)).transpose()
    }

    async fn find_weigh_out(
        &self,
        session_id: TransactionId,
    ) -> Result<Option<Transaction>, DomainError> {
        let model = transactions::Entity::find()
            .filter(transactions::Column::Direction.eq(Direction::Out.as_str()))
            .filter(transactions::Column::SessionId.eq(session_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(|m| self.model_to_transaction(m)).transpose()
    }

    async fn find_session(
        &self,
        session_id: TransactionId,
    ) -> Result<Vec<Transaction>, DomainError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::SessionId.eq(session_id))
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut result = Vec::new();
        for m in models {
            result.push(self.model_to_transaction(m)?);
        }
        Ok(result)
    }

    async fn replace(
        &self,
        superseded: Option<TransactionId>,
        record: NewTransaction,
    ) -> Result<Transaction, DomainError> {
        // Dropping `txn` without commit rolls everything back.
        let txn = self.db.begin().await.map_err(db_error)?;

        if let Some(id) = superseded {
            let deleted = transactions::Entity::delete_by_id(id)
                .exec(&txn)
                .await
                .map_err(write_error)?;
            debug!(transaction_id = id, rows = deleted.rows_affected, "Deleted superseded transaction");
        }

        let active_model = transactions::ActiveModel {
            id: NotSet,
            datetime: Set(Self::to_offset(record.timestamp)),
            direction: Set(record.direction.as_str().to_string()),
            truck: Set(record.truck.as_str().to_string()),
            containers: Set(record.containers.to_joined()),
            bruto: Set(record.bruto),
            truck_tara: Set(record.truck_tara),
            neto: Set(record.neto.and_then(|n| n.kg())),
            produce: Set(record.produce),
            session_id: Set(record.session_id),
        };

        let mut model = active_model.insert(&txn).await.map_err(write_error)?;

        if model.session_id.is_none() {
            let id = model.id;
            let mut active_model: transactions::ActiveModel = model.into();
            active_model.session_id = Set(Some(id));
            model = active_model.update(&txn).await.map_err(write_error)?;
        }

        txn.commit().await.map_err(write_error)?;

        self.model_to_transaction(model)
    }
}
