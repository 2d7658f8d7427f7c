//! REST data grids for Reinhardt
//!
//! This crate renders a paginated, sortable data source and a set of column
//! definitions into a JSON object a REST client can draw a table from.
//!
//! # Features
//!
//! - **Grid**: data source, columns, display flags and a request-selected layout
//! - **Columns**: data and serial columns, declared as compact text
//!   (`"price:decimal:Price (US$)"`), typed configuration or builders
//! - **Labels**: resolved from the record type, the filter model or the first
//!   row, falling back to the humanized attribute name
//! - **Formatting**: text, numbers, booleans and dates through a [`Formatter`]
//! - **Data providers**: in-memory rows or a paginated [`Query`]
//! - **Settings**: grid defaults loaded from TOML or JSON
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[GridFactory] --> B[GridBuilder]
//!     B --> C[Grid]
//!     C --> D[DataProvider]
//!     C --> E[DataColumn]
//!     C --> F[Formatter]
//!     C --> G[GridViewRenderer]
//!     G --> H[metadata]
//!     G --> I[pager]
//!     G --> J[columns]
//!     G --> K[items]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_grid::{ArrayDataProvider, GridFactory, GridSettings, Pagination};
//! use serde_json::{Value, json};
//!
//! let rows: Vec<Value> = (1..=100)
//!     .map(|id| json!({"id": id, "name": format!("Product {}", id), "price": 100 + id}))
//!     .collect();
//!
//! let factory = GridFactory::new(GridSettings::default());
//! let grid = factory
//!     .grid()
//!     .with_data_provider(ArrayDataProvider::new(rows).with_pagination(Pagination::new(20)))
//!     .with_columns(["id", "name", "price:decimal:Price (US$)"])
//!     .build()
//!     .unwrap();
//!
//! let output = grid.run().unwrap();
//! assert_eq!(output["pager"]["results"]["total"], json!(100));
//! assert_eq!(output["columns"][2]["label"], json!("Price (US$)"));
//! assert_eq!(output["items"][0]["price"], json!("101.00"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod data;
pub mod error;
pub mod factory;
pub mod formatter;
pub mod grid;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod request;
pub mod settings;

// Re-exports for convenience
pub use column::{ColumnConfig, ColumnKind, ColumnSpec, DataColumn, FieldAccessor};
pub use data::{
	ArrayDataProvider, DataProvider, Pagination, Query, QueryDataProvider, Sort, SortOrder,
};
pub use error::{GridError, Result};
pub use factory::{GridFactory, IdCounter};
pub use formatter::{DefaultFormatter, Format, Formatter, FormatterSettings};
pub use grid::{FormatterConfig, Grid, GridBuilder, RowRenderFn};
pub use layout::Section;
pub use model::{AttributeLabelProvider, FilterModel, FilterValues, Model};
pub use renderer::{DataRenderer, GridViewRenderer, RenderParams};
pub use request::QueryParamSource;
pub use settings::GridSettings;
