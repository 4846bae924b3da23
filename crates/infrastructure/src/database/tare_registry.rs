use crate::database::db_error;
use crate::database::entities::containers_registered;
use async_trait::async_trait;
use domain::{ContainerTare, DomainError, TareRegistry, WeightUnit};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::warn;

/// Tare registry backed by the `containers_registered` table.
pub struct SeaOrmTareRegistry {
    db: DatabaseConnection,
}

impl SeaOrmTareRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_tare(model: containers_registered::Model) -> ContainerTare {
        // NULL unit reads as kg; an unreadable one makes the tare unknown.
        let (weight, unit) = match model.unit.as_deref() {
            None => (model.weight, WeightUnit::Kg),
            Some(raw) => match raw.parse::<WeightUnit>() {
                Ok(unit) => (model.weight, unit),
                Err(_) => {
                    warn!(container_id = %model.container_id, unit = %raw, "Unrecognised tare unit");
                    (None, WeightUnit::Kg)
                }
            },
        };

        // A negative tare is a registry data error, not a weight.
        let weight = match weight {
            Some(w) if w < 0 => {
                warn!(container_id = %model.container_id, weight = w, "Negative tare in registry");
                None
            }
            other => other,
        };

        ContainerTare::new(model.container_id, weight, unit)
    }
}

#[async_trait]
impl TareRegistry for SeaOrmTareRegistry {
    async fn lookup(&self, container_id: &str) -> Result<Option<ContainerTare>, DomainError> {
        let model = containers_registered::Entity::find_by_id(container_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Self::model_to_tare))
    }
}
