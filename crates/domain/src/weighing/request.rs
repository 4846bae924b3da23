use super::{ContainerList, Direction, TruckId, WeightUnit};
use crate::error::{DomainError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Scale event exactly as it arrived (JSON body or form fields).
///
/// Every field is untyped here; [`WeighingRequest::try_from`] is the only way
/// to turn it into something the ledger accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawWeighingRequest {
    pub direction: Option<Value>,
    pub weight: Option<Value>,
    pub truck: Option<Value>,
    pub containers: Option<Value>,
    pub unit: Option<Value>,
    pub force: Option<Value>,
    pub produce: Option<Value>,
}

/// Validated scale event, weight already normalized to kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct WeighingRequest {
    pub direction: Direction,
    pub truck: TruckId,
    pub weight_kg: i64,
    pub containers: ContainerList,
    pub produce: String,
    pub force: bool,
}

impl WeighingRequest {
    pub fn new(direction: Direction, truck: TruckId, weight_kg: i64) -> Self {
        Self {
            direction,
            truck,
            weight_kg,
            containers: ContainerList::default(),
            produce: PRODUCE_UNSPECIFIED.to_string(),
            force: false,
        }
    }

    pub fn with_containers(mut self, containers: ContainerList) -> Self {
        self.containers = containers;
        self
    }

    pub fn with_produce(mut self, produce: impl Into<String>) -> Self {
        self.produce = produce.into();
        self
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

const PRODUCE_UNSPECIFIED: &str = "na";

impl TryFrom<RawWeighingRequest> for WeighingRequest {
    type Error = DomainError;

    fn try_from(raw: RawWeighingRequest) -> Result<Self> {
        let direction = present(raw.direction);
        let weight = present(raw.weight);

        let (direction, weight) = match (direction, weight) {
            (Some(d), Some(w)) => (d, w),
            (d, w) => {
                let mut missing = Vec::new();
                if d.is_none() {
                    missing.push("direction");
                }
                if w.is_none() {
                    missing.push("weight");
                }
                return Err(DomainError::Validation(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        let direction: Direction = text(&direction, "direction")?.parse()?;
        let unit = match present(raw.unit) {
            Some(v) => text(&v, "unit")?.parse()?,
            None => WeightUnit::default(),
        };
        let weight_kg = unit.to_kg(parse_weight(&weight)?);

        let truck = match present(raw.truck) {
            Some(v) => TruckId::new(text(&v, "truck")?)?,
            None => TruckId::unspecified(),
        };

        let containers = match present(raw.containers) {
            Some(v) => parse_containers(&v)?,
            None => ContainerList::default(),
        };

        let produce = match present(raw.produce) {
            Some(v) => text(&v, "produce")?.trim().to_string(),
            None => PRODUCE_UNSPECIFIED.to_string(),
        };

        Ok(Self {
            direction,
            truck,
            weight_kg,
            containers,
            produce,
            force: parse_force(raw.force.as_ref()),
        })
    }
}

/// `true` only for boolean `true` or a case-insensitive `"true"` string.
pub(crate) fn parse_force(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Largest reading accepted from a scale, in the reading's own unit.
const MAX_SCALE_READING: i64 = 1_000_000;

fn parse_weight(value: &Value) -> Result<i64> {
    let weight = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| DomainError::Validation(format!("weight must be an integer, got {value}")))?;

    if weight < 0 {
        return Err(DomainError::Validation(format!(
            "weight must not be negative, got {weight}"
        )));
    }
    if weight > MAX_SCALE_READING {
        return Err(DomainError::Validation(format!(
            "weight must not exceed {MAX_SCALE_READING}, got {weight}"
        )));
    }
    Ok(weight)
}

fn parse_containers(value: &Value) -> Result<ContainerList> {
    match value {
        Value::String(s) => Ok(ContainerList::parse(s)),
        Value::Array(items) => items
            .iter()
            .map(|item| text(item, "containers").map(str::to_string))
            .collect::<Result<Vec<_>>>()
            .map(ContainerList::new),
        other => Err(DomainError::Validation(format!(
            "containers must be a comma-separated string, got {other}"
        ))),
    }
}

/// Drops null and blank-string values so they read as "not provided".
fn present(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn text<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| DomainError::Validation(format!("{field} must be a string, got {value}")))
}
