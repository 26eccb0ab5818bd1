//! Query Executor
//!
//! Runs a [`QuerySpec`] against a [`Transport`], following continuation
//! pages until the report is complete or the row limit is reached.
//!
//! # Execution Pipeline
//!
//! ```text
//! QuerySpec → serialize → Transport::get → Report::new
//!     ↑                                        │
//!     └── next() ← not complete, under limit ──┘
//! ```
//!
//! Pages are fetched strictly one after another; page N+1 is requested only
//! after page N has been merged.

use crate::query::error::{QueryError, QueryResult};
use crate::query::params::QueryKind;
use crate::query::report::Report;
use crate::query::spec::QuerySpec;
use crate::transport::{Page, Transport};
use std::sync::Arc;
use std::time::Instant;

/// Query executor
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
}

impl QueryExecutor {
    /// Create a new query executor
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute a query, merging pages until it is complete or has enough rows
    pub async fn execute(&self, query: &QuerySpec) -> QueryResult<Report> {
        let start = Instant::now();

        let page = self.fetch_page(query).await?;
        let mut report = Report::new(page, query.clone())?;
        let mut current = query.clone();

        while !(has_enough(&report, query) || report.is_complete()) {
            let next = current.next(None)?;
            let page = self.fetch_page(&next).await?;
            report.append(page, next.clone())?;
            current = next;
        }

        tracing::info!(
            profile = %query.profile().id,
            pages = report.queries().len(),
            rows = report.len(),
            complete = report.is_complete(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query executed"
        );

        Ok(report)
    }

    /// Fetch exactly one page for `query`
    pub async fn fetch_page(&self, query: &QuerySpec) -> QueryResult<Page> {
        if query.kind() == QueryKind::RealTime {
            return Err(QueryError::Unimplemented("real-time reporting"));
        }

        let params = query.raw().serialize();
        let page = self.transport.get(&params).await?;

        tracing::debug!(
            start_index = query.raw().offset(),
            max_results = query.raw().page_size(),
            rows = page.rows.len(),
            has_next = page.has_next(),
            "Fetched page"
        );

        Ok(page)
    }
}

/// Whether the caller's row limit has been reached
fn has_enough(report: &Report, query: &QuerySpec) -> bool {
    query
        .meta()
        .limit
        .map_or(false, |limit| report.len() >= limit)
}
