//! Pagination descriptor for data providers

use serde::{Deserialize, Serialize};

/// Pagination state of a data provider.
///
/// Pages are zero-based internally; the rendered pager reports them
/// one-based.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::Pagination;
///
/// let pagination = Pagination::new(20).with_total_count(95).with_page(2);
/// assert_eq!(pagination.page_count(), 5);
/// assert_eq!(pagination.offset(), 40);
/// assert_eq!(pagination.limit(), Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
	/// Request parameter carrying the page number
	pub page_param: String,
	/// Request parameter carrying the page size
	pub page_size_param: String,
	/// Items per page, `0` disables paging
	pub page_size: usize,
	/// Requested zero-based page
	pub page: usize,
	/// Total number of items across all pages
	pub total_count: usize,
	/// Whether [`Pagination::page`] is clamped into the valid page range
	pub validate_page: bool,
}

impl Default for Pagination {
	fn default() -> Self {
		Self {
			page_param: "page".to_string(),
			page_size_param: "per-page".to_string(),
			page_size: 20,
			page: 0,
			total_count: 0,
			validate_page: true,
		}
	}
}

impl Pagination {
	/// Creates a pagination with the given page size.
	pub fn new(page_size: usize) -> Self {
		Self {
			page_size,
			..Self::default()
		}
	}

	/// Sets the requested zero-based page.
	pub fn with_page(mut self, page: usize) -> Self {
		self.page = page;
		self
	}

	/// Sets the total item count.
	pub fn with_total_count(mut self, total_count: usize) -> Self {
		self.total_count = total_count;
		self
	}

	/// Sets the page and page size request parameter names.
	pub fn with_params(
		mut self,
		page_param: impl Into<String>,
		page_size_param: impl Into<String>,
	) -> Self {
		self.page_param = page_param.into();
		self.page_size_param = page_size_param.into();
		self
	}

	/// Number of pages.
	pub fn page_count(&self) -> usize {
		if self.page_size == 0 {
			usize::from(self.total_count > 0)
		} else {
			self.total_count.div_ceil(self.page_size)
		}
	}

	/// Current zero-based page, clamped when `validate_page` is set.
	pub fn current_page(&self) -> usize {
		if self.validate_page {
			self.page.min(self.page_count().saturating_sub(1))
		} else {
			self.page
		}
	}

	/// Offset of the first item on the current page.
	pub fn offset(&self) -> usize {
		self.current_page().saturating_mul(self.page_size)
	}

	/// Maximum number of items on a page, `None` when paging is disabled.
	pub fn limit(&self) -> Option<usize> {
		(self.page_size > 0).then_some(self.page_size)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, 20, 0)]
	#[case(1, 20, 1)]
	#[case(20, 20, 1)]
	#[case(21, 20, 2)]
	#[case(100, 20, 5)]
	#[case(5, 0, 1)]
	#[case(0, 0, 0)]
	fn test_page_count(#[case] total: usize, #[case] size: usize, #[case] expected: usize) {
		let pagination = Pagination::new(size).with_total_count(total);
		assert_eq!(pagination.page_count(), expected);
	}

	#[rstest]
	fn test_page_is_clamped() {
		let pagination = Pagination::new(10).with_total_count(25).with_page(9);
		assert_eq!(pagination.current_page(), 2);
		assert_eq!(pagination.offset(), 20);
	}

	#[rstest]
	fn test_page_not_clamped_without_validation() {
		let mut pagination = Pagination::new(10).with_total_count(25).with_page(9);
		pagination.validate_page = false;
		assert_eq!(pagination.current_page(), 9);
		assert_eq!(pagination.offset(), 90);
	}

	#[rstest]
	fn test_offset_saturates_for_huge_page() {
		let mut pagination = Pagination::new(10).with_total_count(25).with_page(usize::MAX);
		pagination.validate_page = false;
		assert_eq!(pagination.offset(), usize::MAX);
	}

	#[rstest]
	fn test_disabled_paging_has_no_limit() {
		let pagination = Pagination::new(0).with_total_count(50).with_page(3);
		assert_eq!(pagination.limit(), None);
		assert_eq!(pagination.offset(), 0);
	}

	#[rstest]
	fn test_default_param_names() {
		let pagination = Pagination::default();
		assert_eq!(pagination.page_param, "page");
		assert_eq!(pagination.page_size_param, "per-page");
	}
}
