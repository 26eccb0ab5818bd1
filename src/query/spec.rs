//! Query Specification Builder
//!
//! [`QuerySpec`] is an immutable value. Every chain method copies the current
//! state, applies one change to the copy and returns it, so a spec can be
//! shared and branched freely:
//!
//! ```rust,ignore
//! let base = profile.query(["ga:sessions", "ga:pageviews"], "ga:country")?;
//! let january = base.days(DateRange::new("2023-01-01").stop("2023-01-31"))?;
//! let top_ten = january.limit(10);
//! // `base` and `january` are unchanged
//! ```

use crate::account::{ColumnResolver, Profile};
use crate::dates;
use crate::query::error::{QueryError, QueryResult};
use crate::query::executor::QueryExecutor;
use crate::query::lazy::Query;
use crate::query::levels::{Granularity, LevelArg, Precision};
use crate::query::params::{ColumnList, QueryKind, QueryMeta, RawParams};
use crate::query::report::Report;
use std::sync::Arc;

/// Date range and sampling options for [`QuerySpec::range`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (`YYYY-MM-DD`, `today`, `yesterday` or `NdaysAgo`)
    pub start: String,
    /// Explicit end date; when absent the offsets determine it
    pub stop: Option<String>,
    pub months: i32,
    pub days: i64,
    /// Sampling precision by index or token
    pub precision: LevelArg,
    /// Optional time bucket by index or name
    pub granularity: Option<LevelArg>,
}

impl DateRange {
    /// A single-day range at default precision
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            stop: None,
            months: 0,
            days: 0,
            precision: LevelArg::Index(1),
            granularity: None,
        }
    }

    pub fn stop(mut self, stop: impl Into<String>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn months(mut self, months: i32) -> Self {
        self.months = months;
        self
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    pub fn precision(mut self, precision: impl Into<LevelArg>) -> Self {
        self.precision = precision.into();
        self
    }

    pub fn granularity(mut self, granularity: impl Into<LevelArg>) -> Self {
        self.granularity = Some(granularity.into());
        self
    }
}

/// An immutable report query
#[derive(Clone)]
pub struct QuerySpec {
    kind: QueryKind,
    raw: RawParams,
    meta: QueryMeta,
    profile: Arc<Profile>,
}

impl QuerySpec {
    /// Create a Core Reporting query
    pub fn new(
        profile: Arc<Profile>,
        metrics: impl Into<ColumnList>,
        dimensions: impl Into<ColumnList>,
    ) -> QueryResult<Self> {
        Self::with_meta(profile, metrics, dimensions, QueryMeta::default())
    }

    /// Create a Core Reporting query with initial metadata
    pub fn with_meta(
        profile: Arc<Profile>,
        metrics: impl Into<ColumnList>,
        dimensions: impl Into<ColumnList>,
        meta: QueryMeta,
    ) -> QueryResult<Self> {
        Self::build(QueryKind::Core, profile, metrics.into(), dimensions.into(), meta)
    }

    /// Create a Real Time Reporting query
    ///
    /// The variant resolves its columns like any other query but cannot be
    /// ranged or executed.
    pub fn real_time(
        profile: Arc<Profile>,
        metrics: impl Into<ColumnList>,
        dimensions: impl Into<ColumnList>,
    ) -> QueryResult<Self> {
        Self::build(
            QueryKind::RealTime,
            profile,
            metrics.into(),
            dimensions.into(),
            QueryMeta::default(),
        )
    }

    fn build(
        kind: QueryKind,
        profile: Arc<Profile>,
        metrics: ColumnList,
        dimensions: ColumnList,
        meta: QueryMeta,
    ) -> QueryResult<Self> {
        let spec = Self {
            kind,
            raw: RawParams::new(profile.table_id()),
            meta,
            profile,
        };
        spec.specify(metrics, dimensions)
    }

    /// Copy this spec, apply `change` to the copy and return it
    fn derive<F>(&self, change: F) -> QueryResult<Self>
    where
        F: FnOnce(&mut Self) -> QueryResult<()>,
    {
        let mut next = self.clone();
        change(&mut next)?;
        Ok(next)
    }

    /// Infallible form of [`derive`](Self::derive)
    fn with<F>(&self, change: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut next = self.clone();
        change(&mut next);
        next
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn raw(&self) -> &RawParams {
        &self.raw
    }

    pub fn meta(&self) -> &QueryMeta {
        &self.meta
    }

    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    /// Append metrics and dimensions, resolved through the account catalog
    pub fn specify(
        &self,
        metrics: impl Into<ColumnList>,
        dimensions: impl Into<ColumnList>,
    ) -> QueryResult<Self> {
        let metrics = self.profile.catalog().resolve_all(metrics.into().as_slice())?;
        let dimensions = self
            .profile
            .catalog()
            .resolve_all(dimensions.into().as_slice())?;

        Ok(self.with(|q| {
            q.raw.metrics.extend(metrics);
            q.raw.dimensions.extend(dimensions);
        }))
    }

    /// Set the date range, sampling precision and optional granularity
    ///
    /// A granularity puts its date dimension first in the dimension list.
    pub fn range(&self, range: DateRange) -> QueryResult<Self> {
        if self.kind == QueryKind::RealTime {
            return Err(QueryError::Unimplemented("date ranges on real-time queries"));
        }

        let (start, stop) =
            dates::daterange(&range.start, range.stop.as_deref(), range.months, range.days)?;
        let precision = Precision::resolve(&range.precision)?;
        let granularity = range
            .granularity
            .as_ref()
            .map(Granularity::resolve)
            .transpose()?;

        self.derive(|q| {
            q.raw.start_date = Some(start);
            q.raw.end_date = Some(stop);
            q.raw.sampling_level = Some(precision);
            if let Some(granularity) = granularity {
                q.raw
                    .dimensions
                    .insert(0, granularity.dimension().to_string());
            }
            Ok(())
        })
    }

    /// [`range`](Self::range) bucketed by hour
    pub fn hours(&self, range: DateRange) -> QueryResult<Self> {
        self.range(range.granularity(Granularity::Hour))
    }

    /// [`range`](Self::range) bucketed by day
    pub fn days(&self, range: DateRange) -> QueryResult<Self> {
        self.range(range.granularity(Granularity::Day))
    }

    /// [`range`](Self::range) bucketed by week
    pub fn weeks(&self, range: DateRange) -> QueryResult<Self> {
        self.range(range.granularity(Granularity::Week))
    }

    /// [`range`](Self::range) bucketed by month
    pub fn months(&self, range: DateRange) -> QueryResult<Self> {
        self.range(range.granularity(Granularity::Month))
    }

    /// [`range`](Self::range) bucketed by year
    pub fn years(&self, range: DateRange) -> QueryResult<Self> {
        self.range(range.granularity(Granularity::Year))
    }

    /// Set the page size of each request without capping the total
    pub fn step(&self, maximum: u32) -> Self {
        self.with(|q| q.raw.max_results = Some(maximum))
    }

    /// Fetch at most `maximum` rows, starting from the first
    pub fn limit(&self, maximum: u32) -> Self {
        self.limit_from(1, maximum)
    }

    /// Fetch at most `maximum` rows starting at the 1-based `start` offset
    ///
    /// Same argument order as SQL `LIMIT start, count`.
    pub fn limit_from(&self, start: u32, maximum: u32) -> Self {
        self.with(|q| {
            q.meta.limit = Some(maximum as usize);
            q.raw.start_index = Some(start);
            q.raw.max_results = Some(maximum);
        })
    }

    /// The same query positioned at the following page
    ///
    /// Without an explicit `start`, the new offset is the current
    /// `start_index` (default 1) plus `max_results` (default 1000), so
    /// `limit_from(101, 20)` advances to 121 rather than 21.
    pub fn next(&self, start: Option<u32>) -> QueryResult<Self> {
        let start = match start {
            Some(start) => start,
            None => {
                let (start_index, page_size) = (self.raw.offset(), self.raw.page_size());
                start_index
                    .checked_add(page_size)
                    .ok_or(QueryError::OffsetOverflow {
                        start_index,
                        page_size,
                    })?
            }
        };
        Ok(self.with(|q| q.raw.start_index = Some(start)))
    }

    /// Sorting is not supported yet; returns an unchanged copy
    pub fn sort(&self) -> Self {
        self.clone()
    }

    /// Filtering is not supported yet; returns an unchanged copy
    pub fn filter(&self) -> Self {
        self.clone()
    }

    /// Switch to the real-time API
    pub fn live(&self) -> QueryResult<Self> {
        Err(QueryError::Unimplemented("real-time reporting"))
    }

    /// Fetch every page (up to the row limit) through the profile's transport
    pub async fn execute(&self) -> QueryResult<Report> {
        QueryExecutor::new(self.profile.transport())
            .execute(self)
            .await
    }

    /// Wrap in a lazily executed [`Query`]
    pub fn into_query(self) -> Query {
        Query::new(self)
    }
}

impl PartialEq for QuerySpec {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.raw == other.raw
            && self.meta == other.meta
            && (Arc::ptr_eq(&self.profile, &other.profile) || self.profile.id == other.profile.id)
    }
}

impl std::fmt::Debug for QuerySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySpec")
            .field("kind", &self.kind)
            .field("profile", &self.profile.name)
            .field("raw", &self.raw)
            .field("meta", &self.meta)
            .finish()
    }
}

impl std::fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Query: {}>", self.profile.name)
    }
}
