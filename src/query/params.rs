//! Request parameters and builder-only metadata

use crate::account::{Column, ColumnRef};
use crate::query::levels::Precision;
use crate::transport::RequestParams;

/// Page size the API uses when `max-results` is not sent
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Which reporting API a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Core Reporting: historical, date-ranged, paginated
    Core,
    /// Real Time Reporting: declared but not supported
    RealTime,
}

/// Parameters sent to the reporting API
///
/// Metrics and dimensions stay as ordered identifier lists until
/// [`RawParams::serialize`] joins them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawParams {
    pub ids: String,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sampling_level: Option<Precision>,
    pub start_index: Option<u32>,
    pub max_results: Option<u32>,
}

impl RawParams {
    pub fn new(ids: impl Into<String>) -> Self {
        Self {
            ids: ids.into(),
            ..Self::default()
        }
    }

    /// Effective page size
    pub fn page_size(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Effective 1-based offset of the first row
    pub fn offset(&self) -> u32 {
        self.start_index.unwrap_or(1)
    }

    /// Flatten into API-named string pairs
    pub fn serialize(&self) -> RequestParams {
        let mut params = vec![
            ("ids".to_string(), self.ids.clone()),
            ("metrics".to_string(), self.metrics.join(",")),
            ("dimensions".to_string(), self.dimensions.join(",")),
        ];

        let optional = [
            ("start-date", self.start_date.clone()),
            ("end-date", self.end_date.clone()),
            ("samplingLevel", self.sampling_level.map(|p| p.token().to_string())),
            ("start-index", self.start_index.map(|v| v.to_string())),
            ("max-results", self.max_results.map(|v| v.to_string())),
        ];

        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key.to_string(), value));
            }
        }

        params
    }
}

/// Builder state that is never sent to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryMeta {
    /// Row count at which pagination stops; `None` is unbounded
    pub limit: Option<usize>,
}

/// An ordered list of column references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnList(pub Vec<ColumnRef>);

impl ColumnList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[ColumnRef] {
        &self.0
    }
}

impl From<&str> for ColumnList {
    fn from(name: &str) -> Self {
        Self(vec![name.into()])
    }
}

impl From<String> for ColumnList {
    fn from(name: String) -> Self {
        Self(vec![name.into()])
    }
}

impl From<Column> for ColumnList {
    fn from(column: Column) -> Self {
        Self(vec![column.into()])
    }
}

impl<T: Into<ColumnRef>> From<Vec<T>> for ColumnList {
    fn from(columns: Vec<T>) -> Self {
        Self(columns.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ColumnRef>, const N: usize> From<[T; N]> for ColumnList {
    fn from(columns: [T; N]) -> Self {
        Self(columns.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for ColumnList {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| ColumnRef::from(*n)).collect())
    }
}
