//! Account Hierarchy
//!
//! The account side of a query: the profile being reported on and the
//! catalog of columns its account exposes.
//!
//! - **Column**: a metric or dimension with a stable `ga:` identifier
//! - **ColumnCatalog**: the ordered set of columns, used to resolve names
//! - **Profile**: identifies the reporting view and carries the transport

mod catalog;
mod column;
mod profile;

pub use catalog::{ColumnCatalog, ColumnResolver};
pub use column::{Column, ColumnKind, ColumnRef};
pub use profile::Profile;
