//! Data sources consumed by the grid.
//!
//! - **DataProvider**: the trait the grid reads rows, keys and counts from
//! - **ArrayDataProvider**: in-memory rows, optionally sorted and paginated
//! - **QueryDataProvider**: rows fetched page by page from a [`Query`]
//! - **Pagination** / **Sort**: descriptors exposed to the rendered metadata

pub mod pagination;
pub mod provider;
pub mod sort;

pub use pagination::Pagination;
pub use provider::{ArrayDataProvider, DataProvider, Query, QueryDataProvider};
pub use sort::{Sort, SortOrder};
