//! Column catalog and name resolution

use super::column::{Column, ColumnRef};
use crate::query::{QueryError, QueryResult};

/// Resolves column references to canonical identifiers
pub trait ColumnResolver: Send + Sync {
    /// Resolve one reference, failing if the catalog does not know it
    fn resolve(&self, column: &ColumnRef) -> QueryResult<String>;

    /// Resolve every reference, or fail on the first unknown one
    fn resolve_all(&self, columns: &[ColumnRef]) -> QueryResult<Vec<String>> {
        columns.iter().map(|c| self.resolve(c)).collect()
    }
}

/// Ordered catalog of every column an account exposes
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<Column>,
}

impl ColumnCatalog {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Find a column by id, bare slug or name
    ///
    /// Exact identifier matches win over name matches.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.id == key)
            .or_else(|| self.columns.iter().find(|c| c.matches(key)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl ColumnResolver for ColumnCatalog {
    fn resolve(&self, column: &ColumnRef) -> QueryResult<String> {
        self.get(column.key())
            .map(|c| c.id.clone())
            .ok_or_else(|| QueryError::ColumnNotFound(column.key().to_string()))
    }
}

impl FromIterator<Column> for ColumnCatalog {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ColumnCatalog {
        ColumnCatalog::new(vec![
            Column::dimension("ga:date", "Date"),
            Column::metric("ga:sessions", "Sessions"),
            Column::metric("ga:pageviews", "Pageviews"),
        ])
    }

    #[test]
    fn test_resolve_by_name() {
        let catalog = catalog();

        assert_eq!(catalog.resolve(&"ga:sessions".into()).unwrap(), "ga:sessions");
        assert_eq!(catalog.resolve(&"pageviews".into()).unwrap(), "ga:pageviews");
        assert_eq!(catalog.resolve(&"Date".into()).unwrap(), "ga:date");
    }

    #[test]
    fn test_resolve_handle_matches_name() {
        let catalog = catalog();
        let handle = catalog.get("ga:sessions").unwrap().clone();

        let by_handle = catalog.resolve(&ColumnRef::from(handle)).unwrap();
        let by_name = catalog.resolve(&ColumnRef::from("sessions")).unwrap();

        assert_eq!(by_handle, by_name);
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = catalog();
        let result = catalog.resolve(&"ga:bogus".into());

        assert!(matches!(result, Err(QueryError::ColumnNotFound(ref name)) if name == "ga:bogus"));
    }

    #[test]
    fn test_resolve_all_is_all_or_nothing() {
        let catalog = catalog();
        let refs = vec![ColumnRef::from("sessions"), ColumnRef::from("bogus")];

        assert!(catalog.resolve_all(&refs).is_err());
    }

    #[test]
    fn test_resolve_foreign_handle() {
        let catalog = catalog();
        let foreign = Column::metric("ga:goal1Completions", "Goal 1 Completions");

        assert!(catalog.resolve(&foreign.into()).is_err());
    }
}
