use crate::error::{DomainError, Result};
use serde::{Serialize, Serializer};

/// Net cargo weight of a closed session.
///
/// `Unknown` whenever any container tare could not be resolved; it
/// serializes as the string `"na"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetWeight {
    Known(i64),
    Unknown,
}

impl NetWeight {
    /// `bruto - truck_tara - sum(tares)`, or `Unknown` if any tare is `None`.
    ///
    /// Not clamped: a negative result is reported as-is. Fails with
    /// `Validation` when the result does not fit in an `i64`.
    pub fn compute(bruto: i64, truck_tara: i64, tares: &[Option<i64>]) -> Result<Self> {
        let mut containers_kg = 0i64;
        for tare in tares {
            match tare {
                Some(kg) => {
                    containers_kg = containers_kg.checked_add(*kg).ok_or_else(out_of_range)?
                }
                None => return Ok(NetWeight::Unknown),
            }
        }
        bruto
            .checked_sub(truck_tara)
            .and_then(|w| w.checked_sub(containers_kg))
            .map(NetWeight::Known)
            .ok_or_else(out_of_range)
    }

    pub fn kg(&self) -> Option<i64> {
        match self {
            NetWeight::Known(kg) => Some(*kg),
            NetWeight::Unknown => None,
        }
    }
}

fn out_of_range() -> DomainError {
    DomainError::Validation("net weight out of range".to_string())
}

impl From<Option<i64>> for NetWeight {
    fn from(value: Option<i64>) -> Self {
        value.map(NetWeight::Known).unwrap_or(NetWeight::Unknown)
    }
}

impl Serialize for NetWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NetWeight::Known(kg) => serializer.serialize_i64(*kg),
            NetWeight::Unknown => serializer.serialize_str("na"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_containers() {
        assert_eq!(NetWeight::compute(15000, 4500, &[]), Ok(NetWeight::Known(10500)));
    }

    #[test]
    fn test_subtracts_container_tares() {
        let neto = NetWeight::compute(15000, 4500, &[Some(300), Some(200)]).unwrap();
        assert_eq!(neto, NetWeight::Known(10000));
    }

    #[test]
    fn test_unknown_tare_poisons_result() {
        let neto = NetWeight::compute(15000, 4500, &[Some(300), None]).unwrap();
        assert_eq!(neto, NetWeight::Unknown);
        assert_eq!(neto.kg(), None);
    }

    #[test]
    fn test_negative_is_not_clamped() {
        assert_eq!(NetWeight::compute(4000, 4500, &[]), Ok(NetWeight::Known(-500)));
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            NetWeight::compute(0, i64::MAX, &[Some(300)]),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NetWeight::compute(15000, 4500, &[Some(i64::MAX), Some(1)]),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NetWeight::compute(i64::MIN, 1, &[]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_serializes_number_or_na() {
        assert_eq!(serde_json::to_value(NetWeight::Known(10000)).unwrap(), json!(10000));
        assert_eq!(serde_json::to_value(NetWeight::Unknown).unwrap(), json!("na"));
    }
}
