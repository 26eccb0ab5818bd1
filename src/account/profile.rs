//! Reporting profiles

use super::catalog::ColumnCatalog;
use crate::query::{ColumnList, QueryResult, QuerySpec};
use crate::transport::Transport;
use std::sync::Arc;

/// A reporting view (profile) within a web property
///
/// Supplies the identifier sent as `ids`, the account's column catalog
/// used for name resolution, and the transport queries run through.
pub struct Profile {
    pub id: String,
    pub name: String,
    pub webproperty_id: Option<String>,
    pub account_id: Option<String>,
    catalog: Arc<ColumnCatalog>,
    transport: Arc<dyn Transport>,
}

impl Profile {
    /// Create a new profile
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        catalog: Arc<ColumnCatalog>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            webproperty_id: None,
            account_id: None,
            catalog,
            transport,
        }
    }

    /// Builder method: set the owning web property
    pub fn webproperty(mut self, id: impl Into<String>) -> Self {
        self.webproperty_id = Some(id.into());
        self
    }

    /// Builder method: set the owning account
    pub fn account(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    /// The `ids` parameter value for this profile
    pub fn table_id(&self) -> String {
        format!("ga:{}", self.id)
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Start a Core Reporting query against this profile
    pub fn query(
        self: &Arc<Self>,
        metrics: impl Into<ColumnList>,
        dimensions: impl Into<ColumnList>,
    ) -> QueryResult<QuerySpec> {
        QuerySpec::new(Arc::clone(self), metrics, dimensions)
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("webproperty_id", &self.webproperty_id)
            .field("account_id", &self.account_id)
            .field("columns", &self.catalog.len())
            .finish_non_exhaustive()
    }
}
