use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub datetime: DateTimeWithTimeZone,
    pub direction: String,
    pub truck: String,
    pub containers: String, // comma-joined container ids
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    pub neto: Option<i64>, // NULL on out rows means "na"
    pub produce: String,
    pub session_id: Option<i32>, // NULL only inside the insert transaction
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
