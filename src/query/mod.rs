//! Report Query Engine
//!
//! Builds Core Reporting queries and fetches their paginated results:
//!
//! - **Spec**: immutable, chainable query builder
//! - **Levels**: sampling precision and time granularity
//! - **Executor**: pagination loop over a transport
//! - **Report**: accumulated rows with column-oriented access
//! - **Query**: lazily executed wrapper with a memoized report
//!
//! # Examples
//!
//! ```rust,ignore
//! use analytics_query::query::DateRange;
//!
//! let query = profile
//!     .query(["ga:sessions", "ga:pageviews"], "ga:country")?
//!     .days(DateRange::new("2023-01-01").stop("2023-01-31").precision("HIGH_PRECISION"))?
//!     .limit(500);
//!
//! let report = query.execute().await?;
//! let sessions = report.column("ga:sessions")?;
//! ```

mod error;
mod executor;
mod lazy;
mod levels;
mod params;
mod report;
mod spec;

pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use lazy::Query;
pub use levels::{Granularity, LevelArg, Precision};
pub use params::{ColumnList, QueryKind, QueryMeta, RawParams, DEFAULT_PAGE_SIZE};
pub use report::Report;
pub use spec::{DateRange, QuerySpec};
