//! Data provider trait and the bundled providers

use std::cell::OnceCell;
use std::fmt::Debug;

use serde_json::Value;

use super::pagination::Pagination;
use super::sort::{Sort, SortOrder, sort_models};
use crate::model::{AttributeLabelProvider, Model};

/// A paginated, sortable, keyed collection of rows.
///
/// The provider owns query execution. The grid only reads the current page of
/// rows and the descriptors needed to render the pager and request
/// parameters.
pub trait DataProvider<M> {
	/// Rows of the current page.
	fn models(&self) -> &[M];

	/// Keys of the current page, parallel to [`DataProvider::models`].
	fn keys(&self) -> Vec<Value>;

	/// Number of rows on the current page.
	fn count(&self) -> usize {
		self.models().len()
	}

	/// Number of rows across all pages.
	fn total_count(&self) -> usize;

	/// Pagination state, `None` when the provider is not paginated.
	fn pagination(&self) -> Option<&Pagination>;

	/// Sort state, `None` when the provider is not sortable.
	fn sort(&self) -> Option<&Sort>;

	/// Label source of the record type served by this provider.
	fn model_labels(&self) -> Option<&dyn AttributeLabelProvider> {
		None
	}
}

/// Keys of a page: the `key` attribute of each row when configured,
/// otherwise the absolute row position.
fn page_keys<M: Model>(models: &[M], key: Option<&str>, offset: usize) -> Vec<Value> {
	models
		.iter()
		.enumerate()
		.map(|(index, model)| match key {
			Some(key) => model.attribute_value(key).unwrap_or(Value::Null),
			None => Value::from(offset.saturating_add(index)),
		})
		.collect()
}

/// Data provider over an in-memory list of rows.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::{ArrayDataProvider, DataProvider, Pagination};
/// use serde_json::json;
///
/// let rows: Vec<_> = (1..=5).map(|id| json!({"id": id})).collect();
/// let provider = ArrayDataProvider::new(rows)
///     .with_key("id")
///     .with_pagination(Pagination::new(2).with_page(1));
///
/// assert_eq!(provider.total_count(), 5);
/// assert_eq!(provider.count(), 2);
/// assert_eq!(provider.keys(), vec![json!(3), json!(4)]);
/// ```
pub struct ArrayDataProvider<M> {
	all_models: Vec<M>,
	key: Option<String>,
	pagination: Option<Pagination>,
	sort: Option<Sort>,
	labels: Option<Box<dyn AttributeLabelProvider>>,
}

impl<M: Model> ArrayDataProvider<M> {
	/// Creates an unpaginated, unsorted provider over `models`.
	pub fn new(models: Vec<M>) -> Self {
		Self {
			all_models: models,
			key: None,
			pagination: None,
			sort: None,
			labels: None,
		}
	}

	/// Uses the given attribute as row key.
	pub fn with_key(mut self, attribute: impl Into<String>) -> Self {
		self.key = Some(attribute.into());
		self
	}

	/// Paginates the rows; the total count is taken from the row list.
	pub fn with_pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination.with_total_count(self.all_models.len()));
		self
	}

	/// Orders the rows by the sort's attribute orders.
	pub fn with_sort(mut self, sort: Sort) -> Self {
		sort_models(&mut self.all_models, &sort.orders);
		self.sort = Some(sort);
		self
	}

	/// Declares the label source for the record type of the rows.
	pub fn with_model_labels(mut self, labels: impl AttributeLabelProvider + 'static) -> Self {
		self.labels = Some(Box::new(labels));
		self
	}

	fn page_range(&self) -> (usize, usize) {
		let total = self.all_models.len();
		match &self.pagination {
			Some(pagination) => {
				let start = pagination.offset().min(total);
				let end = pagination
					.limit()
					.map_or(total, |limit| start.saturating_add(limit).min(total));
				(start, end)
			}
			None => (0, total),
		}
	}
}

impl<M: Model> DataProvider<M> for ArrayDataProvider<M> {
	fn models(&self) -> &[M] {
		let (start, end) = self.page_range();
		&self.all_models[start..end]
	}

	fn keys(&self) -> Vec<Value> {
		let (start, _) = self.page_range();
		page_keys(self.models(), self.key.as_deref(), start)
	}

	fn total_count(&self) -> usize {
		self.all_models.len()
	}

	fn pagination(&self) -> Option<&Pagination> {
		self.pagination.as_ref()
	}

	fn sort(&self) -> Option<&Sort> {
		self.sort.as_ref()
	}

	fn model_labels(&self) -> Option<&dyn AttributeLabelProvider> {
		self.labels.as_deref().map(|labels| labels as &dyn AttributeLabelProvider)
	}
}

impl<M> Debug for ArrayDataProvider<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ArrayDataProvider")
			.field("total_count", &self.all_models.len())
			.field("key", &self.key)
			.field("pagination", &self.pagination)
			.field("sort", &self.sort)
			.finish_non_exhaustive()
	}
}

/// A source of rows that can count and fetch a window of its results.
pub trait Query<M> {
	/// Total number of rows matched by the query.
	fn count(&self) -> usize;

	/// Fetches up to `limit` rows starting at `offset`, ordered by `orders`.
	fn fetch(&self, offset: usize, limit: Option<usize>, orders: &[(String, SortOrder)]) -> Vec<M>;
}

impl<M: Model + Clone> Query<M> for Vec<M> {
	fn count(&self) -> usize {
		self.len()
	}

	fn fetch(&self, offset: usize, limit: Option<usize>, orders: &[(String, SortOrder)]) -> Vec<M> {
		let mut rows = self.clone();
		sort_models(&mut rows, orders);
		rows.into_iter()
			.skip(offset)
			.take(limit.unwrap_or(usize::MAX))
			.collect()
	}
}

/// Data provider backed by a [`Query`].
///
/// The total count is read when the provider is built; the current page is
/// fetched on first access and kept for the provider's lifetime.
pub struct QueryDataProvider<M> {
	query: Box<dyn Query<M>>,
	key: Option<String>,
	pagination: Option<Pagination>,
	sort: Option<Sort>,
	labels: Option<Box<dyn AttributeLabelProvider>>,
	total_count: usize,
	models: OnceCell<Vec<M>>,
}

impl<M: Model> QueryDataProvider<M> {
	/// Creates an unpaginated provider over `query`.
	pub fn new(query: impl Query<M> + 'static) -> Self {
		Self::from_boxed(Box::new(query))
	}

	/// Creates an unpaginated provider over an already boxed query.
	pub fn from_boxed(query: Box<dyn Query<M>>) -> Self {
		let total_count = query.count();
		Self {
			query,
			key: None,
			pagination: None,
			sort: None,
			labels: None,
			total_count,
			models: OnceCell::new(),
		}
	}

	/// Uses the given attribute as row key.
	pub fn with_key(mut self, attribute: impl Into<String>) -> Self {
		self.key = Some(attribute.into());
		self
	}

	/// Paginates the query results.
	pub fn with_pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination.with_total_count(self.total_count));
		self
	}

	/// Orders the query results.
	pub fn with_sort(mut self, sort: Sort) -> Self {
		self.sort = Some(sort);
		self
	}

	/// Declares the label source for the record type of the query.
	pub fn with_model_labels(mut self, labels: impl AttributeLabelProvider + 'static) -> Self {
		self.labels = Some(Box::new(labels));
		self
	}

	fn offset(&self) -> usize {
		self.pagination.as_ref().map_or(0, Pagination::offset)
	}
}

impl<M: Model> DataProvider<M> for QueryDataProvider<M> {
	fn models(&self) -> &[M] {
		self.models.get_or_init(|| {
			let limit = self.pagination.as_ref().and_then(Pagination::limit);
			let orders = self.sort.as_ref().map_or(&[][..], |sort| &sort.orders[..]);
			tracing::debug!(offset = self.offset(), ?limit, "fetching grid page");
			self.query.fetch(self.offset(), limit, orders)
		})
	}

	fn keys(&self) -> Vec<Value> {
		page_keys(self.models(), self.key.as_deref(), self.offset())
	}

	fn total_count(&self) -> usize {
		self.total_count
	}

	fn pagination(&self) -> Option<&Pagination> {
		self.pagination.as_ref()
	}

	fn sort(&self) -> Option<&Sort> {
		self.sort.as_ref()
	}

	fn model_labels(&self) -> Option<&dyn AttributeLabelProvider> {
		self.labels.as_deref().map(|labels| labels as &dyn AttributeLabelProvider)
	}
}

impl<M> Debug for QueryDataProvider<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryDataProvider")
			.field("total_count", &self.total_count)
			.field("key", &self.key)
			.field("pagination", &self.pagination)
			.field("sort", &self.sort)
			.finish_non_exhaustive()
	}
}
