use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit a scale reading or a registered tare is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

/// 0.453592 kg per lb, kept as an exact ratio so truncation never drifts.
const KG_PER_LB_MICRO: i64 = 453_592;
const MICRO: i64 = 1_000_000;

impl WeightUnit {
    /// Normalize `value` in this unit to whole kilograms.
    ///
    /// Pounds are truncated toward zero. Callers only pass non-negative
    /// weights, for which that equals `floor`.
    pub fn to_kg(self, value: i64) -> i64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => ((value as i128 * KG_PER_LB_MICRO as i128) / MICRO as i128) as i64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" => Ok(WeightUnit::Lbs),
            other => Err(DomainError::Validation(format!("invalid unit: {other}"))),
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lbs_to_kg_basic() {
        assert_eq!(WeightUnit::Lbs.to_kg(1000), 453);
    }

    #[test]
    fn test_lbs_to_kg_zero() {
        assert_eq!(WeightUnit::Lbs.to_kg(0), 0);
    }

    #[test]
    fn test_lbs_to_kg_truncates() {
        // 33000 * 0.453592 = 14968.536
        assert_eq!(WeightUnit::Lbs.to_kg(33000), 14968);
        // 1 * 0.453592
        assert_eq!(WeightUnit::Lbs.to_kg(1), 0);
        // 3 * 0.453592 = 1.360776
        assert_eq!(WeightUnit::Lbs.to_kg(3), 1);
    }

    #[test]
    fn test_lbs_to_kg_matches_floor_over_range() {
        for lbs in (0..200_000).step_by(997) {
            let expected = (lbs as f64 * 0.453592).floor() as i64;
            let actual = WeightUnit::Lbs.to_kg(lbs);
            // float product can land a hair under an exact integer
            assert!(
                actual == expected || actual == expected + 1,
                "lbs={lbs} actual={actual} expected={expected}"
            );
        }
    }

    #[test]
    fn test_kg_is_identity() {
        assert_eq!(WeightUnit::Kg.to_kg(15000), 15000);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!(" lbs ".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert!("ton".parse::<WeightUnit>().is_err());
    }
}
