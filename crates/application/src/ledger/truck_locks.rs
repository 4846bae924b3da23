use dashmap::DashMap;
use domain::TruckId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per truck, created on demand.
///
/// Held across the lookup-then-write of an event so two events for the same
/// truck never interleave. Different trucks never wait on each other.
#[derive(Clone, Default)]
pub struct TruckLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl TruckLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, truck: &TruckId) -> TruckGuard {
        // Declared before the wait so a cancelled waiter still prunes the entry.
        let mut truck_guard = TruckGuard {
            key: truck.as_str().to_string(),
            guard: None,
            locks: self.locks.clone(),
        };

        // Clone the Arc out so the shard lock is released before awaiting.
        let mutex = self
            .locks
            .entry(truck.as_str().to_string())
            .or_default()
            .clone();
        truck_guard.guard = Some(mutex.lock_owned().await);

        truck_guard
    }

    /// Number of trucks with a holder or waiter.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Releases the truck's mutex on drop and forgets it once nobody waits.
///
/// `guard` is `None` only while the lock is still being awaited.
pub struct TruckGuard {
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for TruckGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map holds the Arc now: no holder, no waiter.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn truck(id: &str) -> TruckId {
        TruckId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_entry_pruned_after_release() {
        let locks = TruckLocks::new();
        {
            let _guard = locks.lock(&truck("T-1")).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_same_truck_waits() {
        let locks = TruckLocks::new();
        let _held = locks.lock(&truck("T-1")).await;

        let waiting = tokio::time::timeout(Duration::from_millis(50), locks.lock(&truck("T-1"))).await;
        assert!(waiting.is_err(), "second lock on same truck must block");
    }

    #[tokio::test]
    async fn test_different_trucks_do_not_contend() {
        let locks = TruckLocks::new();
        let _a = locks.lock(&truck("T-1")).await;

        let b = tokio::time::timeout(Duration::from_millis(50), locks.lock(&truck("T-2"))).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_waiter_acquires_after_release() {
        let locks = TruckLocks::new();
        let held = locks.lock(&truck("T-1")).await;

        let locks_clone = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = locks_clone.lock(&truck("T-1")).await;
        });

        tokio::task::yield_now().await;
        drop(held);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire")
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_prunes_entry() {
        let locks = TruckLocks::new();
        let t = truck("T-1");
        let held = locks.lock(&t).await;

        let mut waiter = Box::pin(locks.lock(&t));
        let polled = tokio::time::timeout(Duration::from_millis(20), &mut waiter).await;
        assert!(polled.is_err(), "waiter must still be queued");

        // Holder leaves while the waiter is queued, so it cannot prune.
        drop(held);
        assert_eq!(locks.len(), 1);

        // Waiter gives up before it is polled again.
        drop(waiter);
        assert!(locks.is_empty());
    }
}
