//! Lazily executed query
//!
//! [`Query`] owns a [`QuerySpec`] and at most one memoized [`Report`].
//! Row access executes the query on first use; later accesses reuse the
//! stored report until [`Query::execute`] is called again.

use crate::query::error::QueryResult;
use crate::query::report::Report;
use crate::query::spec::QuerySpec;

/// A query paired with its (possibly not yet fetched) report
#[derive(Debug, Clone)]
pub struct Query {
    spec: QuerySpec,
    report: Option<Report>,
}

impl Query {
    pub fn new(spec: QuerySpec) -> Self {
        Self { spec, report: None }
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    pub fn is_executed(&self) -> bool {
        self.report.is_some()
    }

    /// Fetch a fresh report, replacing any stored one
    pub async fn execute(&mut self) -> QueryResult<&Report> {
        let report = self.spec.execute().await?;
        Ok(self.report.insert(report))
    }

    /// The stored report, executing first if needed
    pub async fn report(&mut self) -> QueryResult<&Report> {
        let report = match self.report.take() {
            Some(report) => report,
            None => self.spec.execute().await?,
        };
        Ok(self.report.insert(report))
    }

    /// Number of rows, executing first if needed
    pub async fn len(&mut self) -> QueryResult<usize> {
        Ok(self.report().await?.len())
    }

    /// Iterate over rows, executing first if needed
    pub async fn rows(&mut self) -> QueryResult<std::slice::Iter<'_, Vec<String>>> {
        Ok(self.report().await?.rows().iter())
    }

    /// Release the stored report, if any
    pub fn into_report(self) -> Option<Report> {
        self.report
    }
}

impl From<QuerySpec> for Query {
    fn from(spec: QuerySpec) -> Self {
        Self::new(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, profile, ScriptedTransport};
    use std::sync::Arc;

    fn one_page() -> crate::transport::Page {
        page(
            &["ga:date", "ga:sessions"],
            &[&["20230101", "10"], &["20230102", "20"]],
            false,
        )
    }

    #[tokio::test]
    async fn test_lazy_execution_once() {
        let transport = ScriptedTransport::new(vec![one_page()]);
        let spec = QuerySpec::new(profile(Arc::clone(&transport)), "ga:sessions", "ga:date")
            .unwrap();
        let mut query = spec.into_query();

        assert!(!query.is_executed());
        assert_eq!(transport.request_count(), 0);

        assert_eq!(query.len().await.unwrap(), 2);
        let values: Vec<_> = query
            .rows()
            .await
            .unwrap()
            .map(|row| row[1].clone())
            .collect();

        assert_eq!(values, vec!["10", "20"]);
        assert!(query.is_executed());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_refetches() {
        let transport = ScriptedTransport::new(vec![one_page(), one_page()]);
        let spec = QuerySpec::new(profile(Arc::clone(&transport)), "ga:sessions", "ga:date")
            .unwrap();
        let mut query = Query::from(spec);

        query.report().await.unwrap();
        query.execute().await.unwrap();

        assert_eq!(transport.request_count(), 2);
        assert_eq!(query.into_report().map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn test_failed_execution_stays_pending() {
        let transport = ScriptedTransport::new(vec![]);
        let spec = QuerySpec::new(profile(Arc::clone(&transport)), "ga:sessions", "ga:date")
            .unwrap();
        let mut query = Query::new(spec);

        assert!(query.len().await.is_err());
        assert!(!query.is_executed());
    }

    #[tokio::test]
    async fn test_report_is_memoized() {
        let transport = ScriptedTransport::new(vec![one_page()]);
        let spec = QuerySpec::new(profile(Arc::clone(&transport)), "ga:sessions", "ga:date")
            .unwrap();
        let mut query = Query::new(spec);

        assert_eq!(query.report().await.unwrap().len(), 2);
        assert_eq!(query.report().await.unwrap().len(), 2);
        assert_eq!(transport.request_count(), 1);
    }
}
