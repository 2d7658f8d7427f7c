//! Grid renderers
//!
//! A renderer turns a built [`Grid`] into the response object. The bundled
//! [`GridViewRenderer`] emits up to four sections (metadata, pager, columns,
//! items) merged in layout order.

pub mod grid_view;

pub use grid_view::GridViewRenderer;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::grid::Grid;

/// Parameters handed to a renderer view.
pub struct RenderParams<'a, M> {
	/// The grid to render
	pub grid: Option<&'a Grid<M>>,
}

impl<'a, M> RenderParams<'a, M> {
	/// Parameters carrying `grid`.
	pub fn new(grid: &'a Grid<M>) -> Self {
		Self { grid: Some(grid) }
	}

	/// Parameters without a grid.
	pub fn empty() -> Self {
		Self { grid: None }
	}
}

/// Renders named views of a grid into a JSON object.
pub trait DataRenderer<M> {
	/// Renders the view named `view`.
	fn run(&self, view: &str, params: &RenderParams<'_, M>) -> Result<Map<String, Value>>;
}

/// Merges `source` into `target`.
///
/// Objects are merged recursively, arrays are appended and every other value
/// replaces the existing one.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::renderer::merge;
/// use serde_json::json;
///
/// let mut target = json!({"a": {"x": 1}, "list": [1]}).as_object().unwrap().clone();
/// let source = json!({"a": {"y": 2}, "list": [2], "b": true}).as_object().unwrap().clone();
/// merge(&mut target, source);
///
/// assert_eq!(
///     serde_json::Value::Object(target),
///     json!({"a": {"x": 1, "y": 2}, "list": [1, 2], "b": true})
/// );
/// ```
pub fn merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
	for (key, incoming) in source {
		match target.get_mut(&key) {
			Some(existing) => merge_value(existing, incoming),
			None => {
				target.insert(key, incoming);
			}
		}
	}
}

fn merge_value(existing: &mut Value, incoming: Value) {
	match (existing, incoming) {
		(Value::Object(existing), Value::Object(incoming)) => merge(existing, incoming),
		(Value::Array(existing), Value::Array(incoming)) => existing.extend(incoming),
		(existing, incoming) => *existing = incoming,
	}
}
