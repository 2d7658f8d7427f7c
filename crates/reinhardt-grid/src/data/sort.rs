//! Sort descriptor for data providers

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Model;

/// Sort direction of a single attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	/// Ascending order (A-Z, 0-9)
	Ascending,
	/// Descending order (Z-A, 9-0)
	Descending,
}

/// Sort state of a data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sort {
	/// Request parameter carrying the sort attributes
	pub sort_param: String,
	/// Separator between attributes in the sort parameter
	pub separator: String,
	/// Whether more than one attribute may be sorted at once
	pub enable_multi_sort: bool,
	/// Attribute orders applied by the provider
	pub orders: Vec<(String, SortOrder)>,
}

impl Default for Sort {
	fn default() -> Self {
		Self {
			sort_param: "sort".to_string(),
			separator: ",".to_string(),
			enable_multi_sort: false,
			orders: Vec::new(),
		}
	}
}

impl Sort {
	/// Creates a sort with default parameter names and no orders.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an attribute order.
	///
	/// Without multi-sort the new order replaces any previous one.
	pub fn order_by(mut self, attribute: impl Into<String>, order: SortOrder) -> Self {
		if !self.enable_multi_sort {
			self.orders.clear();
		}
		self.orders.push((attribute.into(), order));
		self
	}

	/// Enables or disables multi-attribute sorting.
	pub fn multi_sort(mut self, enabled: bool) -> Self {
		self.enable_multi_sort = enabled;
		self
	}

	/// Sets the sort parameter name and attribute separator.
	pub fn with_param(mut self, sort_param: impl Into<String>, separator: impl Into<String>) -> Self {
		self.sort_param = sort_param.into();
		self.separator = separator.into();
		self
	}
}

/// Stable-sorts `models` by the given attribute orders.
pub fn sort_models<M: Model>(models: &mut [M], orders: &[(String, SortOrder)]) {
	if orders.is_empty() {
		return;
	}
	models.sort_by(|a, b| {
		for (attribute, order) in orders {
			let ordering = compare_values(
				a.attribute_value(attribute).as_ref(),
				b.attribute_value(attribute).as_ref(),
			);
			let ordering = match order {
				SortOrder::Ascending => ordering,
				SortOrder::Descending => ordering.reverse(),
			};
			if ordering != Ordering::Equal {
				return ordering;
			}
		}
		Ordering::Equal
	});
}

fn rank(value: Option<&Value>) -> u8 {
	match value {
		None | Some(Value::Null) => 0,
		Some(Value::Bool(_)) => 1,
		Some(Value::Number(_)) => 2,
		Some(Value::String(_)) => 3,
		Some(_) => 4,
	}
}

/// Orders JSON values: missing and null first, then booleans, numbers,
/// strings. Nested structures compare equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a, b) {
		(Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
		(Some(Value::Number(x)), Some(Value::Number(y))) => {
			match (x.as_i64(), y.as_i64()) {
				(Some(x), Some(y)) => x.cmp(&y),
				_ => x
					.as_f64()
					.partial_cmp(&y.as_f64())
					.unwrap_or(Ordering::Equal),
			}
		}
		(Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
		_ => rank(a).cmp(&rank(b)),
	}
}
