//! Report Accumulator
//!
//! Collects the rows of every page a query produced into one logical
//! report with column-oriented access.

use crate::account::{Column, ColumnKind};
use crate::query::error::{QueryError, QueryResult};
use crate::query::spec::QuerySpec;
use crate::transport::{ColumnHeader, Page};
use serde::Serialize;

/// Rows accumulated across the pages of one query
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Column definitions, parallel to each row
    headers: Vec<Column>,
    /// Result rows
    rows: Vec<Vec<String>>,
    /// Every query that contributed a page
    #[serde(skip)]
    queries: Vec<QuerySpec>,
    /// False while the last page carried a continuation link
    is_complete: bool,
    /// Whether any page was computed from sampled data
    sampled: bool,
    /// Server-declared total row count, from the latest page
    #[serde(skip_serializing_if = "Option::is_none")]
    total_results: Option<u64>,
}

impl Report {
    /// Build a report from the first page of `query`
    ///
    /// Headers are taken from the account catalog in the order the page
    /// declares them. A header the catalog does not list is kept as
    /// declared by the response so rows stay aligned.
    pub fn new(page: Page, query: QuerySpec) -> QueryResult<Self> {
        let catalog = query.profile().catalog();
        let headers = page
            .column_headers
            .iter()
            .map(|header| {
                catalog
                    .iter()
                    .find(|c| c.id == header.name)
                    .cloned()
                    .unwrap_or_else(|| column_from_header(header))
            })
            .collect();

        let mut report = Self {
            headers,
            rows: Vec::new(),
            queries: Vec::new(),
            is_complete: false,
            sampled: false,
            total_results: None,
        };
        report.append(page, query)?;
        Ok(report)
    }

    /// Merge a follow-up page produced by `query`
    pub fn append(&mut self, page: Page, query: QuerySpec) -> QueryResult<()> {
        let names = page.header_names();
        if !names.is_empty() && !self.headers_match(&names) {
            return Err(QueryError::SchemaMismatch {
                expected: self.header_ids().join(", "),
                found: names.join(", "),
            });
        }

        let expected = self.headers.len();
        if let Some((i, row)) = page
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(QueryError::MalformedRow {
                row: self.rows.len() + i,
                expected,
                found: row.len(),
            });
        }

        self.queries.push(query);
        self.is_complete = !page.has_next();
        self.sampled |= page.contains_sampled_data.unwrap_or(false);
        if page.total_results.is_some() {
            self.total_results = page.total_results;
        }
        self.rows.extend(page.rows);

        Ok(())
    }

    fn headers_match(&self, names: &[&str]) -> bool {
        self.headers.len() == names.len()
            && self.headers.iter().zip(names).all(|(c, n)| c.id == *n)
    }

    /// Values of one column across all rows
    pub fn column(&self, name: &str) -> QueryResult<Vec<&str>> {
        let index = self.column_index(name)?;
        // every stored row is as wide as the headers
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Position of a column, by id first and then by name
    pub fn column_index(&self, name: &str) -> QueryResult<usize> {
        self.headers
            .iter()
            .position(|c| c.id == name)
            .or_else(|| self.headers.iter().position(|c| c.matches(name)))
            .ok_or_else(|| QueryError::ColumnNotInReport(name.to_string()))
    }

    pub fn headers(&self) -> &[Column] {
        &self.headers
    }

    pub fn header_ids(&self) -> Vec<&str> {
        self.headers.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn queries(&self) -> &[QuerySpec] {
        &self.queries
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_sampled(&self) -> bool {
        self.sampled
    }

    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Number of accumulated rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn column_from_header(header: &ColumnHeader) -> Column {
    let kind = match header.column_type.as_deref() {
        Some("METRIC") => ColumnKind::Metric,
        _ => ColumnKind::Dimension,
    };

    Column {
        id: header.name.clone(),
        name: header.name.clone(),
        kind,
        data_type: header.data_type.clone().unwrap_or_default(),
        group: None,
        deprecated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, profile, ScriptedTransport};

    fn query() -> QuerySpec {
        let profile = profile(ScriptedTransport::new(vec![]));
        QuerySpec::new(profile, "ga:sessions", "ga:date").unwrap()
    }

    fn two_page_report() -> Report {
        let q = query();
        let mut report = Report::new(
            page(&["ga:date", "ga:sessions"], &[&["20230101", "10"]], true),
            q.clone(),
        )
        .unwrap();
        report
            .append(
                page(&["ga:date", "ga:sessions"], &[&["20230102", "20"]], false),
                q.next(None).unwrap(),
            )
            .unwrap();
        report
    }

    #[test]
    fn test_new_report() {
        let report = Report::new(
            page(&["ga:date", "ga:sessions"], &[&["20230101", "10"]], true),
            query(),
        )
        .unwrap();

        assert_eq!(report.header_ids(), vec!["ga:date", "ga:sessions"]);
        assert_eq!(report.headers()[1].name, "Sessions");
        assert_eq!(report.len(), 1);
        assert!(!report.is_complete());
        assert_eq!(report.queries().len(), 1);
    }

    #[test]
    fn test_merge_pages() {
        let report = two_page_report();

        assert_eq!(
            report.rows(),
            &[
                vec!["20230101".to_string(), "10".to_string()],
                vec!["20230102".to_string(), "20".to_string()],
            ]
        );
        assert!(report.is_complete());
        assert_eq!(report.column("ga:sessions").unwrap(), vec!["10", "20"]);
        assert_eq!(report.queries().len(), 2);
        assert_eq!(report.queries()[1].raw().start_index, Some(1001));
    }

    #[test]
    fn test_column_by_name() {
        let report = two_page_report();
        assert_eq!(report.column("Date").unwrap(), vec!["20230101", "20230102"]);
    }

    #[test]
    fn test_missing_column() {
        let report = two_page_report();
        let err = report.column("ga:bogus").unwrap_err();

        assert!(matches!(err, QueryError::ColumnNotInReport(ref c) if c == "ga:bogus"));
        assert_eq!(err.to_string(), "ga:bogus not in column headers");
    }

    #[test]
    fn test_len_tracks_rows() {
        let report = two_page_report();
        assert_eq!(report.len(), report.rows().len());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_headers_follow_response_order() {
        let report = Report::new(
            page(&["ga:sessions", "ga:date"], &[&["10", "20230101"]], false),
            query(),
        )
        .unwrap();

        assert_eq!(report.header_ids(), vec!["ga:sessions", "ga:date"]);
        assert_eq!(report.column("ga:date").unwrap(), vec!["20230101"]);
    }

    #[test]
    fn test_unknown_header_kept() {
        let report = Report::new(
            page(&["ga:dimension1", "ga:sessions"], &[&["gold", "3"]], false),
            query(),
        )
        .unwrap();

        assert_eq!(report.headers()[0].id, "ga:dimension1");
        assert_eq!(report.column("ga:dimension1").unwrap(), vec!["gold"]);
    }

    #[test]
    fn test_schema_mismatch() {
        let q = query();
        let mut report = Report::new(
            page(&["ga:date", "ga:sessions"], &[&["20230101", "10"]], true),
            q.clone(),
        )
        .unwrap();

        let result = report.append(
            page(&["ga:date", "ga:users"], &[&["20230102", "4"]], false),
            q.next(None).unwrap(),
        );

        assert!(matches!(result, Err(QueryError::SchemaMismatch { .. })));
        assert_eq!(report.len(), 1);
        assert_eq!(report.queries().len(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_sampled_and_totals() {
        let q = query();
        let mut first = page(&["ga:date", "ga:sessions"], &[&["20230101", "10"]], true);
        first.contains_sampled_data = Some(true);
        first.total_results = Some(2);

        let mut report = Report::new(first, q.clone()).unwrap();
        report
            .append(
                page(&["ga:date", "ga:sessions"], &[&["20230102", "20"]], false),
                q.next(None).unwrap(),
            )
            .unwrap();

        assert!(report.is_sampled());
        assert_eq!(report.total_results(), Some(2));
    }

    #[test]
    fn test_serialize() {
        let report = two_page_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["rows"][1][1], "20");
        assert_eq!(json["headers"][0]["id"], "ga:date");
        assert_eq!(json["is_complete"], true);
    }

    #[test]
    fn test_short_row_rejected() {
        let q = query();
        let mut report = Report::new(
            page(&["ga:date", "ga:sessions"], &[&["20230101", "10"]], true),
            q.clone(),
        )
        .unwrap();

        let result = report.append(
            page(
                &["ga:date", "ga:sessions"],
                &[&["20230102", "20"], &["20230103"]],
                false,
            ),
            q.next(None).unwrap(),
        );

        assert!(matches!(
            result,
            Err(QueryError::MalformedRow { row: 2, expected: 2, found: 1 })
        ));
        assert_eq!(report.len(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_short_row_in_first_page_rejected() {
        let result = Report::new(
            page(&["ga:date", "ga:sessions"], &[&["20230101"]], false),
            query(),
        );

        assert!(matches!(result, Err(QueryError::MalformedRow { row: 0, .. })));
    }
}
