use serde::{Deserialize, Serialize};

/// Ordered list of container identifiers riding on a truck.
///
/// Stored as a comma-joined string; empty segments are dropped on parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerList(Vec<String>);

impl ContainerList {
    pub fn new(ids: Vec<String>) -> Self {
        Self(
            ids.into_iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-delimited list, e.g. `"C-1, C-2"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(',').map(str::to_string).collect())
    }

    /// Storage form, the inverse of [`ContainerList::parse`].
    pub fn to_joined(&self) -> String {
        self.0.join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
