//! Column definitions

use serde::{Deserialize, Serialize};

/// Whether a column is a metric or a dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Metric,
    Dimension,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Metric => "metric",
            Self::Dimension => "dimension",
        })
    }
}

/// A metric or dimension defined by the account catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier, e.g. `ga:sessions`
    pub id: String,
    /// Human-readable name, e.g. `Sessions`
    pub name: String,
    pub kind: ColumnKind,
    /// Value type reported by the API (`INTEGER`, `STRING`, ...)
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Column {
    /// Create a metric column
    pub fn metric(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ColumnKind::Metric, "INTEGER")
    }

    /// Create a dimension column
    pub fn dimension(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ColumnKind::Dimension, "STRING")
    }

    fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ColumnKind,
        data_type: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            data_type: data_type.to_string(),
            group: None,
            deprecated: false,
        }
    }

    /// Identifier without the `ga:` prefix
    pub fn slug(&self) -> &str {
        self.id.strip_prefix("ga:").unwrap_or(&self.id)
    }

    /// Whether `key` addresses this column by id, bare slug or name
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.slug() == key || self.name.eq_ignore_ascii_case(key)
    }
}

/// A column given either by name or as an already-resolved handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Name(String),
    Column(Column),
}

impl ColumnRef {
    /// Lookup key for this reference
    pub fn key(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Column(column) => &column.id,
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Column> for ColumnRef {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<&Column> for ColumnRef {
    fn from(column: &Column) -> Self {
        Self::Column(column.clone())
    }
}
