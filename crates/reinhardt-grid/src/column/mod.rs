//! Grid columns.
//!
//! A column maps one attribute of a row to a formatted cell and describes the
//! header, filter and footer cells exposed to the client.
//!
//! Columns are declared as [`ColumnSpec`]s: compact text
//! (`"price:decimal:Price (US$)"`), a typed [`ColumnConfig`], or a prebuilt
//! [`DataColumn`]. Serial columns are a [`ColumnKind`] of `DataColumn`.

pub mod base;
pub mod config;
pub mod label;

pub use base::{ColumnKind, DataColumn, FieldAccessor, ValueFn};
pub use config::{ColumnConfig, ColumnSpec};
pub use label::{humanize, resolve_label};
