//! # analytics-query
//!
//! An immutable, chainable query builder for the Core Reporting analytics
//! API, with a report accumulator that stitches paginated responses into
//! one logical report.
//!
//! ## Modules
//!
//! - [`query`]: query builder, pagination executor and report accumulator
//! - [`account`]: profiles and the column catalog used for name resolution
//! - [`transport`]: the request/page boundary and its HTTP implementation
//! - [`dates`]: date range resolution
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use analytics_query::account::{ColumnCatalog, Profile};
//! use analytics_query::query::DateRange;
//! use analytics_query::transport::{HttpTransport, TransportConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(HttpTransport::new(TransportConfig::default())?);
//!     let catalog = Arc::new(ColumnCatalog::new(transport.columns().await?));
//!     let profile = Arc::new(Profile::new("12345678", "Main View", catalog, transport));
//!
//!     let report = profile
//!         .query("ga:sessions", "ga:country")?
//!         .days(DateRange::new("30daysAgo").stop("yesterday"))?
//!         .execute()
//!         .await?;
//!
//!     println!("{} rows", report.len());
//!     for sessions in report.column("ga:sessions")? {
//!         println!("{}", sessions);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod config;
pub mod dates;
pub mod query;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export top-level types for convenience
pub use account::{Column, ColumnCatalog, ColumnKind, ColumnRef, ColumnResolver, Profile};

pub use query::{
    ColumnList, DateRange, Granularity, LevelArg, Precision, Query, QueryError, QueryExecutor,
    QueryMeta, QueryResult, QuerySpec, Report,
};

pub use transport::{HttpTransport, Page, Transport, TransportConfig, TransportError};

pub use config::{Config, ConfigError, LoggingConfig};
