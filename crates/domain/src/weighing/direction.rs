use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which way the truck crossed the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Entry weighing, opens a session.
    In,
    /// Exit weighing, closes the truck's session.
    Out,
    /// Standalone reading (e.g. containers only), never paired.
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::None => "none",
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "none" => Ok(Direction::None),
            other => Err(DomainError::Validation(format!("invalid direction: {other}"))),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("out".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!("none".parse::<Direction>().unwrap(), Direction::None);
    }

    #[test]
    fn test_invalid_direction() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("invalid direction: sideways".to_string())
        );
    }

    #[test]
    fn test_round_trip_as_str() {
        for d in [Direction::In, Direction::Out, Direction::None] {
            assert_eq!(d.as_str().parse::<Direction>().unwrap(), d);
        }
    }
}
