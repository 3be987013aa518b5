//! Data parsing and aggregation module
//!
//! This module turns raw payloads into a [`Dataset`](crate::types::Dataset)
//! and reduces datasets into the aggregates behind cards and charts.
//!
//! ## Error Handling
//!
//! Fallible operations return `LoadResult<T>` which uses the `LoadError`
//! type. Delimited text never fails to parse; JSON fails on bad syntax, on
//! a non-array payload and on a server-signalled `error` field.

mod aggregate;
mod csv_parser;
mod error;
mod json_parser;

pub use aggregate::*;
pub use csv_parser::*;
pub use error::*;
pub use json_parser::*;
