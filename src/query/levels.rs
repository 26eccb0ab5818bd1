//! Sampling precision and time granularity levels
//!
//! Both are ordered sets that callers may address by position or by name.

use crate::query::error::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};

/// A level given either by index into its ordered set or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelArg {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for LevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for LevelArg {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for LevelArg {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for LevelArg {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Precision> for LevelArg {
    fn from(precision: Precision) -> Self {
        Self::Name(precision.token().to_string())
    }
}

impl From<Granularity> for LevelArg {
    fn from(granularity: Granularity) -> Self {
        Self::Name(granularity.to_string())
    }
}

/// Server-side sampling precision (`samplingLevel`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Precision {
    /// Smaller sample, faster response
    Faster,
    /// Balance of speed and accuracy
    #[default]
    Default,
    /// Larger sample, slower response
    HighPrecision,
}

impl Precision {
    /// All levels, in index order
    pub const ALL: [Precision; 3] = [Self::Faster, Self::Default, Self::HighPrecision];

    /// Token sent on the wire
    pub fn token(&self) -> &'static str {
        match self {
            Self::Faster => "FASTER",
            Self::Default => "DEFAULT",
            Self::HighPrecision => "HIGH_PRECISION",
        }
    }

    /// Resolve an index or token, rejecting anything else
    pub fn resolve(arg: &LevelArg) -> QueryResult<Self> {
        let found = match arg {
            LevelArg::Index(i) => Self::ALL.get(*i).copied(),
            LevelArg::Name(name) => Self::ALL.iter().copied().find(|p| p.token() == name.as_str()),
        };

        found.ok_or_else(|| QueryError::InvalidPrecision {
            given: arg.to_string(),
            valid: Self::ALL.map(|p| p.token()).join(", "),
        })
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Time bucket size for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
    Hour,
}

impl Granularity {
    /// All levels, in index order
    pub const ALL: [Granularity; 5] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
    ];

    /// Synthetic date dimension that buckets rows at this granularity
    pub fn dimension(&self) -> &'static str {
        match self {
            Self::Year => "ga:year",
            Self::Month => "ga:yearMonth",
            Self::Week => "ga:yearWeek",
            Self::Day => "ga:date",
            Self::Hour => "ga:dateHour",
        }
    }

    /// Resolve an index or level name, rejecting anything else
    pub fn resolve(arg: &LevelArg) -> QueryResult<Self> {
        let found = match arg {
            LevelArg::Index(i) => Self::ALL.get(*i).copied(),
            LevelArg::Name(name) => Self::ALL.iter().copied().find(|g| g.to_string() == *name),
        };

        found.ok_or_else(|| QueryError::InvalidGranularity {
            given: arg.to_string(),
            valid: Self::ALL.map(|g| g.to_string()).join(", "),
        })
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
            Self::Week => write!(f, "week"),
            Self::Day => write!(f, "day"),
            Self::Hour => write!(f, "hour"),
        }
    }
}
