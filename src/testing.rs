//! Shared test fixtures: a fixed column catalog and a scripted transport.

use crate::account::{Column, ColumnCatalog, Profile};
use crate::transport::{ColumnHeader, Page, RequestParams, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays canned pages and records every request
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Page, TransportError>>>,
    requests: Mutex<Vec<RequestParams>>,
}

impl ScriptedTransport {
    pub(crate) fn new(pages: Vec<Page>) -> Arc<Self> {
        Self::with_results(pages.into_iter().map(Ok).collect())
    }

    pub(crate) fn with_results(results: Vec<Result<Page, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<RequestParams> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, params: &RequestParams) -> Result<Page, TransportError> {
        self.requests.lock().unwrap().push(params.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::ApiError {
                    status: 500,
                    message: "no scripted page left".to_string(),
                })
            })
    }
}

/// Look up a serialized parameter by API name
pub(crate) fn param<'a>(params: &'a RequestParams, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub(crate) fn catalog() -> ColumnCatalog {
    ColumnCatalog::new(vec![
        Column::dimension("ga:year", "Year"),
        Column::dimension("ga:yearMonth", "Month of Year"),
        Column::dimension("ga:yearWeek", "Week of Year"),
        Column::dimension("ga:date", "Date"),
        Column::dimension("ga:dateHour", "Hour of Day"),
        Column::dimension("ga:country", "Country"),
        Column::dimension("ga:browser", "Browser"),
        Column::metric("ga:sessions", "Sessions"),
        Column::metric("ga:pageviews", "Pageviews"),
        Column::metric("ga:users", "Users"),
    ])
}

pub(crate) fn profile(transport: Arc<ScriptedTransport>) -> Arc<Profile> {
    Arc::new(
        Profile::new("12345", "Main View", Arc::new(catalog()), transport)
            .webproperty("UA-12345-1")
            .account("12345"),
    )
}

pub(crate) fn page(headers: &[&str], rows: &[&[&str]], more: bool) -> Page {
    Page {
        column_headers: headers.iter().map(|h| ColumnHeader::new(*h)).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect(),
        next_link: more.then(|| "https://example.test/next".to_string()),
        total_results: None,
        contains_sampled_data: None,
    }
}
