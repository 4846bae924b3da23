use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object representing a truck licence/identifier
///
/// Rules:
/// - Blank input means "no truck" and maps to the `na` sentinel
/// - Max length 50 characters
/// - No commas or control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruckId(String);

impl TruckId {
    pub const UNSPECIFIED: &'static str = "na";

    /// Create a new TruckId with validation
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let id = id.trim();

        if id.is_empty() {
            return Ok(Self::unspecified());
        }

        if id.chars().count() > 50 {
            return Err(DomainError::Validation(format!(
                "truck id too long: {} chars (max 50)",
                id.chars().count()
            )));
        }

        if id.chars().any(|c| c == ',' || c.is_control()) {
            return Err(DomainError::Validation(format!(
                "truck id {id} contains invalid characters"
            )));
        }

        Ok(Self(id.to_string()))
    }

    /// The `na` truck used for standalone container weighings.
    pub fn unspecified() -> Self {
        Self(Self::UNSPECIFIED.to_string())
    }

    /// Anonymous weighings carry no session and are never looked up.
    pub fn is_unspecified(&self) -> bool {
        self.0 == Self::UNSPECIFIED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TruckId {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl std::fmt::Display for TruckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
