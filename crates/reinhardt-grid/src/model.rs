//! Row and filter model abstractions.
//!
//! A grid never owns the shape of its rows. It only needs to read attribute
//! values from them, iterate their fields when columns are guessed, and
//! optionally ask them for human readable attribute labels.
//!
//! Labels are an opt-in capability: any row, filter model or data provider may
//! expose an [`AttributeLabelProvider`] through `as_label_provider`. When none
//! does, column labels fall back to the humanized attribute name.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::request::QueryParamSource;

/// Capability to resolve a display label for an attribute name.
pub trait AttributeLabelProvider {
	/// Returns the label for `attribute`, or `None` when this source has no
	/// opinion about it.
	fn attribute_label(&self, attribute: &str) -> Option<String>;
}

/// A single record rendered as one grid row.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::Model;
/// use serde_json::json;
///
/// let row = json!({"id": 1, "author": {"name": "Alice"}});
/// assert_eq!(row.attribute_value("id"), Some(json!(1)));
/// assert_eq!(row.attribute_value("author.name"), Some(json!("Alice")));
/// assert_eq!(row.attribute_value("missing"), None);
/// ```
pub trait Model {
	/// Reads an attribute by name. Dotted names address nested records.
	fn attribute_value(&self, name: &str) -> Option<Value>;

	/// Returns the record fields in iteration order.
	fn fields(&self) -> Vec<(String, Value)>;

	/// Exposes the label capability of this record, if any.
	fn as_label_provider(&self) -> Option<&dyn AttributeLabelProvider> {
		None
	}
}

/// Looks up `path` inside a JSON value.
///
/// An exact key match wins over path splitting, so a key literally named
/// `"a.b"` is found before the nested `a` → `b` lookup is attempted.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
	match value {
		Value::Object(map) => lookup_in_map(map, path),
		Value::Array(items) => {
			if let Ok(index) = path.parse::<usize>() {
				return items.get(index);
			}
			let (parent, child) = path.rsplit_once('.')?;
			lookup_path(lookup_path(value, parent)?, child)
		}
		_ => None,
	}
}

fn lookup_in_map<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
	if let Some(found) = map.get(path) {
		return Some(found);
	}
	let (parent, child) = path.rsplit_once('.')?;
	lookup_path(lookup_in_map(map, parent)?, child)
}

impl Model for Value {
	fn attribute_value(&self, name: &str) -> Option<Value> {
		lookup_path(self, name).cloned()
	}

	fn fields(&self) -> Vec<(String, Value)> {
		match self {
			Value::Object(map) => map.fields(),
			_ => Vec::new(),
		}
	}
}

impl Model for Map<String, Value> {
	fn attribute_value(&self, name: &str) -> Option<Value> {
		lookup_in_map(self, name).cloned()
	}

	fn fields(&self) -> Vec<(String, Value)> {
		self.iter()
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}
}

/// The model holding user-entered filter values for a grid.
pub trait FilterModel {
	/// Names of the attributes this filter model knows about.
	fn attributes(&self) -> Vec<String>;

	/// Current value of a filter attribute.
	fn attribute_value(&self, attribute: &str) -> Option<Value>;

	/// Exposes the label capability of this filter model, if any.
	fn as_label_provider(&self) -> Option<&dyn AttributeLabelProvider> {
		None
	}
}

/// Ordered attribute → value filter model with optional labels.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::{FilterModel, FilterValues};
/// use serde_json::json;
///
/// let filters = FilterValues::new()
///     .attribute("status", json!("active"))
///     .attribute("name", json!(null))
///     .label("status", "Account status");
///
/// assert_eq!(filters.attributes(), vec!["status", "name"]);
/// assert_eq!(filters.attribute_value("status"), Some(json!("active")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterValues {
	values: Map<String, Value>,
	labels: HashMap<String, String>,
}

impl FilterValues {
	/// Creates an empty filter model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a filter attribute with its current value.
	pub fn attribute(mut self, name: impl Into<String>, value: Value) -> Self {
		self.values.insert(name.into(), value);
		self
	}

	/// Sets the display label of a filter attribute.
	pub fn label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
		self.labels.insert(name.into(), label.into());
		self
	}

	/// Declares `attributes` and fills them from request query parameters.
	///
	/// Attributes absent from the request are declared with a `null` value so
	/// they still count as known filter attributes.
	pub fn load(attributes: &[&str], source: &dyn QueryParamSource) -> Self {
		let params = source.query_params();
		let values = attributes
			.iter()
			.map(|name| {
				let value = params
					.get(*name)
					.map(|v| Value::String(v.clone()))
					.unwrap_or(Value::Null);
				(name.to_string(), value)
			})
			.collect();

		Self {
			values,
			labels: HashMap::new(),
		}
	}
}

impl FilterModel for FilterValues {
	fn attributes(&self) -> Vec<String> {
		self.values.keys().cloned().collect()
	}

	fn attribute_value(&self, attribute: &str) -> Option<Value> {
		self.values.get(attribute).cloned()
	}

	fn as_label_provider(&self) -> Option<&dyn AttributeLabelProvider> {
		Some(self)
	}
}

impl AttributeLabelProvider for FilterValues {
	fn attribute_label(&self, attribute: &str) -> Option<String> {
		self.labels.get(attribute).cloned()
	}
}
