//! Query error types
//!
//! Defines all error conditions that can occur while building, executing and
//! reading back a query.

use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// Sampling precision outside the accepted set
    #[error("Precision should be one of: {valid} (got {given})")]
    InvalidPrecision { given: String, valid: String },

    /// Time granularity outside the accepted set
    #[error("Granularity should be one of: {valid} (got {given})")]
    InvalidGranularity { given: String, valid: String },

    /// Date string or offset that could not be resolved
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Column name or handle absent from the account catalog
    #[error("Column not found in catalog: {0}")]
    ColumnNotFound(String),

    /// Column requested from a report that does not carry it
    #[error("{0} not in column headers")]
    ColumnNotInReport(String),

    /// A follow-up page declared different columns than the first page
    #[error("Schema mismatch between pages: expected [{expected}], got [{found}]")]
    SchemaMismatch { expected: String, found: String },

    /// A page row with a different number of cells than the report has columns
    #[error("Row {row} has {found} cells, expected {expected}")]
    MalformedRow { row: usize, expected: usize, found: usize },

    /// Advancing past the last addressable `start-index`
    #[error("Next page offset overflows: start index {start_index} + page size {page_size}")]
    OffsetOverflow { start_index: u32, page_size: u32 },

    /// Feature that is declared but not implemented
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),

    /// Failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
