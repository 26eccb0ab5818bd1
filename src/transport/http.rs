//! Core Reporting REST Transport
//!
//! HTTP backend for the Core Reporting v3 API and its column metadata API.

use super::{Page, RequestParams, Transport, TransportError};
use crate::account::{Column, ColumnKind};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

/// Core Reporting REST transport
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the API (e.g., "https://www.googleapis.com/analytics/v3")
    pub base_url: String,
    /// OAuth access token sent as a bearer token
    pub access_token: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/analytics/v3".to_string(),
            access_token: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl HttpTransport {
    /// Create a new transport with the given configuration
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("analytics-query/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn data_url(&self) -> String {
        format!("{}/data/ga", self.config.base_url.trim_end_matches('/'))
    }

    fn columns_url(&self) -> String {
        format!(
            "{}/metadata/ga/columns",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Fetch the full column catalog from the metadata API
    pub async fn columns(&self) -> Result<Vec<Column>, TransportError> {
        let request = self.client.get(self.columns_url());
        let response = self.authorize(request).send().await.map_err(classify)?;
        let response = check_status(response).await?;

        let body: MetadataResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::debug!(columns = body.items.len(), "Fetched column metadata");

        Ok(body.items.into_iter().map(Column::from).collect())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &RequestParams) -> Result<Page, TransportError> {
        let request = self.client.get(self.data_url()).query(params);
        let response = self.authorize(request).send().await.map_err(classify)?;
        let response = check_status(response).await?;

        response
            .json::<Page>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Unavailable
    } else {
        TransportError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response, TransportError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(TransportError::ApiError {
        status: status.as_u16(),
        message: text,
    })
}

// ============================================
// Metadata DTOs
// ============================================

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    items: Vec<MetadataColumn>,
}

#[derive(Debug, Deserialize)]
struct MetadataColumn {
    id: String,
    #[serde(default)]
    attributes: MetadataAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataAttributes {
    #[serde(rename = "type", default)]
    column_type: String,
    #[serde(default)]
    data_type: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    ui_name: Option<String>,
}

impl From<MetadataColumn> for Column {
    fn from(item: MetadataColumn) -> Self {
        let attrs = item.attributes;
        let kind = if attrs.column_type.eq_ignore_ascii_case("METRIC") {
            ColumnKind::Metric
        } else {
            ColumnKind::Dimension
        };

        Column {
            name: attrs.ui_name.unwrap_or_else(|| item.id.clone()),
            id: item.id,
            kind,
            data_type: attrs.data_type,
            group: attrs.group,
            deprecated: attrs.status.as_deref() == Some("DEPRECATED"),
        }
    }
}
