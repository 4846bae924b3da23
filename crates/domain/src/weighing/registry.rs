use super::WeightUnit;
use crate::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Registered tare of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerTare {
    pub container_id: String,
    /// `None` when the container is registered but was never weighed.
    pub weight: Option<i64>,
    pub unit: WeightUnit,
}

impl ContainerTare {
    pub fn new(container_id: impl Into<String>, weight: Option<i64>, unit: WeightUnit) -> Self {
        Self {
            container_id: container_id.into(),
            weight,
            unit,
        }
    }

    /// Tare in kilograms, `None` if unknown.
    pub fn tare_kg(&self) -> Option<i64> {
        self.weight.map(|w| self.unit.to_kg(w))
    }
}

/// Read-only lookup of container tares.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait TareRegistry: Send + Sync {
    /// Find the registry entry for a container, `None` if not registered
    async fn lookup(&self, container_id: &str) -> Result<Option<ContainerTare>, DomainError>;
}
