//! Reporting Transport
//!
//! The transport is the only component that talks to the network. It takes a
//! flat list of request parameters and returns one raw [`Page`].
//!
//! - **Transport**: async trait implemented by concrete backends
//! - **HttpTransport**: Core Reporting v3 REST backend
//! - **Page**: one raw response, rows plus an optional continuation link

mod http;

pub use http::{HttpTransport, TransportConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serialized request parameters, in emission order
pub type RequestParams = Vec<(String, String)>;

/// Executes a single report request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch one page for the given parameters
    async fn get(&self, params: &RequestParams) -> Result<Page, TransportError>;
}

/// One raw response page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Columns declared by the response, in row order
    #[serde(default)]
    pub column_headers: Vec<ColumnHeader>,
    /// Row batch; the API omits the field when there are no rows
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Continuation link, present while more pages remain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    /// Total number of rows matching the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    /// Whether the server sampled the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_sampled_data: Option<bool>,
}

impl Page {
    /// Header names in declaration order
    pub fn header_names(&self) -> Vec<&str> {
        self.column_headers.iter().map(|h| h.name.as_str()).collect()
    }

    /// Whether more pages remain
    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}

/// A column declared by a response page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

impl ColumnHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
            data_type: None,
        }
    }
}

/// Errors that can occur when talking to the reporting service
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Reporting service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize() {
        let page: Page = serde_json::from_str(
            r#"{
                "columnHeaders": [
                    {"name": "ga:date", "columnType": "DIMENSION", "dataType": "STRING"},
                    {"name": "ga:sessions", "columnType": "METRIC", "dataType": "INTEGER"}
                ],
                "rows": [["20230101", "10"]],
                "nextLink": "https://example.test/next",
                "totalResults": 2,
                "containsSampledData": false
            }"#,
        )
        .unwrap();

        assert_eq!(page.header_names(), vec!["ga:date", "ga:sessions"]);
        assert_eq!(page.rows, vec![vec!["20230101", "10"]]);
        assert!(page.has_next());
        assert_eq!(page.total_results, Some(2));
    }

    #[test]
    fn test_page_without_rows() {
        let page: Page =
            serde_json::from_str(r#"{"columnHeaders": [{"name": "ga:sessions"}]}"#).unwrap();

        assert!(page.rows.is_empty());
        assert!(!page.has_next());
    }
}
