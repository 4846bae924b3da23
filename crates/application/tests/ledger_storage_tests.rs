use application::SessionLedger;
use async_trait::async_trait;
use chrono::Utc;
use domain::{
    ContainerList, ContainerTare, Direction, DomainError, NewTransaction, TareRegistry,
    Transaction, TransactionId, TransactionRepository, TruckId, WeighingRequest,
};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;

mock! {
    pub Transactions {}

    #[async_trait]
    impl TransactionRepository for Transactions {
        async fn find_latest_weigh_in(&self, truck: &TruckId) -> Result<Option<Transaction>, DomainError>;
        async fn find_weigh_out(&self, session_id: TransactionId) -> Result<Option<Transaction>, DomainError>;
        async fn find_session(&self, session_id: TransactionId) -> Result<Vec<Transaction>, DomainError>;
        async fn replace(&self, superseded: Option<TransactionId>, record: NewTransaction) -> Result<Transaction, DomainError>;
    }
}

mock! {
    pub Tares {}

    #[async_trait]
    impl TareRegistry for Tares {
        async fn lookup(&self, container_id: &str) -> Result<Option<ContainerTare>, DomainError>;
    }
}

fn open_weigh_in(truck: &str, containers: &str) -> Transaction {
    Transaction {
        id: 7,
        session_id: 7,
        direction: Direction::In,
        truck: TruckId::new(truck).unwrap(),
        containers: ContainerList::parse(containers),
        bruto: 15000,
        truck_tara: None,
        neto: None,
        produce: "na".to_string(),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_conflict_performs_no_write() {
    let mut transactions = MockTransactions::new();
    transactions
        .expect_find_latest_weigh_in()
        .returning(|_| Ok(Some(open_weigh_in("T-1", ""))));
    transactions
        .expect_find_weigh_out()
        .with(eq(7))
        .returning(|_| Ok(None));
    transactions.expect_replace().never();

    let ledger = SessionLedger::new(Arc::new(transactions), Arc::new(MockTares::new()));

    let err = ledger
        .record_event(WeighingRequest::new(
            Direction::In,
            TruckId::new("T-1").unwrap(),
            14000,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn test_storage_failure_on_write_is_propagated() {
    let mut transactions = MockTransactions::new();
    transactions
        .expect_find_latest_weigh_in()
        .returning(|_| Ok(Some(open_weigh_in("T-2", ""))));
    transactions.expect_find_weigh_out().returning(|_| Ok(None));
    transactions
        .expect_replace()
        .times(1)
        .returning(|_, _| Err(DomainError::Storage("connection reset".to_string())));

    let ledger = SessionLedger::new(Arc::new(transactions), Arc::new(MockTares::new()));

    let err = ledger
        .record_event(WeighingRequest::new(
            Direction::Out,
            TruckId::new("T-2").unwrap(),
            4500,
        ))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::Storage("connection reset".to_string()));
}

#[tokio::test]
async fn test_registry_failure_aborts_before_write() {
    let mut transactions = MockTransactions::new();
    transactions
        .expect_find_latest_weigh_in()
        .returning(|_| Ok(Some(open_weigh_in("T-3", "C-1"))));
    transactions.expect_find_weigh_out().returning(|_| Ok(None));
    transactions.expect_replace().never();

    let mut tares = MockTares::new();
    tares
        .expect_lookup()
        .returning(|_| Err(DomainError::Storage("registry offline".to_string())));

    let ledger = SessionLedger::new(Arc::new(transactions), Arc::new(tares));

    let err = ledger
        .record_event(WeighingRequest::new(
            Direction::Out,
            TruckId::new("T-3").unwrap(),
            4500,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Storage(_)));
}

#[tokio::test]
async fn test_tares_looked_up_from_session_containers() {
    let mut transactions = MockTransactions::new();
    transactions
        .expect_find_latest_weigh_in()
        .returning(|_| Ok(Some(open_weigh_in("T-4", "C-A,C-B"))));
    transactions.expect_find_weigh_out().returning(|_| Ok(None));
    transactions
        .expect_replace()
        .withf(|superseded, record| {
            superseded.is_none()
                && record.session_id == Some(7)
                && record.containers.to_joined() == "C-A,C-B"
        })
        .returning(|_, record| {
            Ok(Transaction {
                id: 8,
                session_id: 7,
                direction: record.direction,
                truck: record.truck,
                containers: record.containers,
                bruto: record.bruto,
                truck_tara: record.truck_tara,
                neto: record.neto,
                produce: record.produce,
                timestamp: record.timestamp,
            })
        });

    let mut tares = MockTares::new();
    tares
        .expect_lookup()
        .times(2)
        .returning(|id| Ok(Some(ContainerTare::new(id, Some(250), Default::default()))));

    let ledger = SessionLedger::new(Arc::new(transactions), Arc::new(tares));

    // The out event names no containers; the session's list is used.
    let summary = ledger
        .record_event(WeighingRequest::new(
            Direction::Out,
            TruckId::new("T-4").unwrap(),
            4500,
        ))
        .await
        .unwrap();

    assert_eq!(summary.session_id, 7);
    assert_eq!(summary.neto.and_then(|n| n.kg()), Some(15000 - 4500 - 500));
}
