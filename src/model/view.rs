//! Cross-cube view definitions.

use serde::{Serialize, Serializer};

/// Which members of a cube a view exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeSelector {
    /// Every measure and dimension (`"*"`).
    All,
    /// An explicit member list.
    Members(Vec<String>),
}

impl Serialize for IncludeSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IncludeSelector::All => serializer.serialize_str("*"),
            IncludeSelector::Members(names) => names.serialize(serializer),
        }
    }
}

/// Prefix applied to included member names to avoid collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPrefix {
    /// Prefix with the cube's own name (`prefix: true`).
    CubeName,
    /// Prefix with an explicit alias.
    Alias(String),
}

impl Serialize for ViewPrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ViewPrefix::CubeName => serializer.serialize_bool(true),
            ViewPrefix::Alias(alias) => serializer.serialize_str(alias),
        }
    }
}

/// One cube inclusion inside a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCube {
    /// Dotted join path from the view root, e.g. `orders.customers`.
    pub join_path: String,
    pub includes: IncludeSelector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<ViewPrefix>,
}

/// A named view over several cubes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDefinition {
    pub name: String,
    pub description: String,
    pub cubes: Vec<ViewCube>,
}

impl ViewDefinition {
    pub fn cube(&self, join_path: &str) -> Option<&ViewCube> {
        self.cubes.iter().find(|c| c.join_path == join_path)
    }
}
