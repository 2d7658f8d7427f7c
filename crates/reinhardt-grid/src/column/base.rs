//! Data column definition

use std::fmt;

use serde_json::{Map, Value, json};

use super::config::ColumnConfig;
use super::label::resolve_label;
use crate::data::Pagination;
use crate::error::{GridError, Result};
use crate::formatter::Format;
use crate::grid::Grid;
use crate::model::Model;

/// Callable computing a cell value from `(model, key, index, column)`.
pub type ValueFn<M> = Box<dyn Fn(&M, &Value, usize, &DataColumn<M>) -> Option<Value>>;

/// How a column reads its raw cell value from a row.
pub enum FieldAccessor<M> {
	/// Reads the named field of the row (dotted names reach nested records).
	Attribute(String),
	/// Computes the value from the row.
	Callable(ValueFn<M>),
	/// Uses the same value for every row.
	Literal(Value),
}

impl<M> fmt::Debug for FieldAccessor<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
			Self::Callable(_) => f.write_str("Callable(..)"),
			Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
		}
	}
}

/// Column flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
	/// Reads and formats a row attribute
	#[default]
	Data,
	/// Emits the 1-based position of the row across all pages
	Serial,
}

impl ColumnKind {
	/// Resolves the column class named in a configuration.
	///
	/// `None` selects a data column.
	pub fn from_class(class: Option<&str>) -> Result<Self> {
		match class {
			None | Some("data") | Some("DataColumn") => Ok(Self::Data),
			Some("serial") | Some("SerialColumn") => Ok(Self::Serial),
			Some(other) => Err(GridError::InvalidConfig(format!(
				"The column must be a data or serial column, got \"{}\"",
				other
			))),
		}
	}
}

/// One output field of a grid.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::column::DataColumn;
/// use reinhardt_grid::Format;
/// use serde_json::Value;
///
/// let column: DataColumn<Value> = DataColumn::new("price")
///     .with_label("Price")
///     .with_format(Format::new("decimal"));
///
/// assert_eq!(column.attribute.as_deref(), Some("price"));
/// assert!(column.enable_sorting);
/// assert!(!column.enable_filtering);
/// ```
pub struct DataColumn<M> {
	/// Column flavour
	pub kind: ColumnKind,
	/// Attribute this column renders, also the key of its data cells
	pub attribute: Option<String>,
	/// Explicit header label; resolved from label sources when unset
	pub label: Option<String>,
	/// Free-form description
	pub description: Option<String>,
	/// Explicit value accessor; the attribute is read when unset
	pub value: Option<FieldAccessor<M>>,
	/// Format applied to non-null cell values
	pub format: Format,
	/// Header cell content
	pub header: Option<Value>,
	/// Footer cell content
	pub footer: Option<Value>,
	/// Header cell options
	pub header_options: Map<String, Value>,
	/// Footer cell options
	pub footer_options: Map<String, Value>,
	/// Row options exposed with the column descriptor
	pub row_options: Map<String, Value>,
	/// Filter items offered to the client
	pub filter: Option<Value>,
	/// Whether the client may sort by this column
	pub enable_sorting: bool,
	/// Whether the client may filter by this column
	pub enable_filtering: bool,
	/// Invisible columns are dropped when the grid is built
	pub visible: bool,
}

impl<M> DataColumn<M> {
	fn of_kind(kind: ColumnKind) -> Self {
		let serial = kind == ColumnKind::Serial;
		Self {
			kind,
			attribute: serial.then(|| "#".to_string()),
			label: None,
			description: None,
			value: None,
			format: Format::default(),
			header: serial.then(|| Value::String(String::new())),
			footer: None,
			header_options: Map::new(),
			footer_options: Map::new(),
			row_options: Map::new(),
			filter: None,
			enable_sorting: !serial,
			enable_filtering: false,
			visible: true,
		}
	}

	/// Creates a data column rendering `attribute`.
	pub fn new(attribute: impl Into<String>) -> Self {
		Self::of_kind(ColumnKind::Data).with_attribute(attribute)
	}

	/// Creates a serial column.
	pub fn serial() -> Self {
		Self::of_kind(ColumnKind::Serial)
	}

	/// Instantiates the column described by `config`.
	///
	/// Unset configuration fields keep the defaults of the configured column
	/// kind.
	pub fn from_config(config: ColumnConfig) -> Result<Self> {
		let mut column = Self::of_kind(ColumnKind::from_class(config.class.as_deref())?);

		if let Some(attribute) = config.attribute {
			column.attribute = Some(attribute);
		}
		if let Some(value) = config.value {
			column.value = Some(FieldAccessor::Attribute(value));
		}
		if let Some(format) = config.format {
			column.format = format;
		}
		if config.header.is_some() {
			column.header = config.header;
		}
		if let Some(enable_sorting) = config.enable_sorting {
			column.enable_sorting = enable_sorting;
		}
		if let Some(enable_filtering) = config.enable_filtering {
			column.enable_filtering = enable_filtering;
		}
		if let Some(visible) = config.visible {
			column.visible = visible;
		}
		column.label = config.label;
		column.description = config.description;
		column.footer = config.footer;
		column.filter = config.filter.or(column.filter);
		column.header_options = config.header_options;
		column.footer_options = config.footer_options;
		column.row_options = config.row_options;

		Ok(column)
	}

	/// Sets the rendered attribute.
	pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.attribute = Some(attribute.into());
		self
	}

	/// Sets an explicit header label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the column description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Sets the value accessor.
	pub fn with_value(mut self, value: FieldAccessor<M>) -> Self {
		self.value = Some(value);
		self
	}

	/// Computes cell values with `f(model, key, index, column)`.
	pub fn with_value_fn<F>(self, f: F) -> Self
	where
		F: Fn(&M, &Value, usize, &DataColumn<M>) -> Option<Value> + 'static,
	{
		self.with_value(FieldAccessor::Callable(Box::new(f)))
	}

	/// Sets the cell format.
	pub fn with_format(mut self, format: impl Into<Format>) -> Self {
		self.format = format.into();
		self
	}

	/// Sets the header cell content.
	pub fn with_header(mut self, header: impl Into<Value>) -> Self {
		self.header = Some(header.into());
		self
	}

	/// Sets the footer cell content.
	pub fn with_footer(mut self, footer: impl Into<Value>) -> Self {
		self.footer = Some(footer.into());
		self
	}

	/// Sets the header cell options.
	pub fn with_header_options(mut self, options: Map<String, Value>) -> Self {
		self.header_options = options;
		self
	}

	/// Sets the footer cell options.
	pub fn with_footer_options(mut self, options: Map<String, Value>) -> Self {
		self.footer_options = options;
		self
	}

	/// Sets the row options.
	pub fn with_row_options(mut self, options: Map<String, Value>) -> Self {
		self.row_options = options;
		self
	}

	/// Sets the filter items.
	pub fn with_filter(mut self, filter: impl Into<Value>) -> Self {
		self.filter = Some(filter.into());
		self
	}

	/// Enables or disables sorting.
	pub fn with_sorting(mut self, enabled: bool) -> Self {
		self.enable_sorting = enabled;
		self
	}

	/// Enables or disables filtering.
	pub fn with_filtering(mut self, enabled: bool) -> Self {
		self.enable_filtering = enabled;
		self
	}

	/// Shows or hides the column.
	pub fn with_visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// The attribute name, empty when the column has none.
	pub fn attribute_name(&self) -> &str {
		self.attribute.as_deref().unwrap_or_default()
	}

	/// Configured description, `null` when unset.
	pub fn render_description(&self) -> Value {
		self.description.clone().map_or(Value::Null, Value::String)
	}

	/// Header cell: `{value, options}`.
	pub fn render_header_cell(&self) -> Value {
		cell(&self.header, &self.header_options)
	}

	/// Footer cell: `{value, options}`.
	pub fn render_footer_cell(&self) -> Value {
		cell(&self.footer, &self.footer_options)
	}
}

impl<M: Model> DataColumn<M> {
	/// Header label, resolved through the grid's label sources when no
	/// explicit label is set.
	pub fn render_label(&self, grid: &Grid<M>) -> String {
		match &self.label {
			Some(label) => label.clone(),
			None => resolve_label(grid, self.attribute_name()),
		}
	}

	/// Filter cell: `{selected, items, options}`.
	///
	/// `selected` carries the filter model's current value when the filter
	/// model knows this column's attribute.
	pub fn render_filter_cell(&self, grid: &Grid<M>) -> Value {
		let attribute = self.attribute_name();
		let selected = grid
			.filter_model()
			.filter(|filter| filter.attributes().iter().any(|name| name == attribute))
			.and_then(|filter| filter.attribute_value(attribute))
			.unwrap_or(Value::Null);

		json!({
			"selected": selected,
			"items": content_or_empty(&self.filter),
			"options": {},
		})
	}

	/// Raw value of this column for one row.
	pub fn data_cell_value(
		&self,
		grid: &Grid<M>,
		model: &M,
		key: &Value,
		index: usize,
	) -> Option<Value> {
		if self.kind == ColumnKind::Serial {
			let offset = grid
				.data_provider()
				.pagination()
				.map_or(0, Pagination::offset);
			return Some(Value::from(offset + index + 1));
		}

		match &self.value {
			Some(FieldAccessor::Attribute(name)) => model.attribute_value(name),
			Some(FieldAccessor::Callable(f)) => f(model, key, index, self),
			Some(FieldAccessor::Literal(value)) => Some(value.clone()),
			None => self
				.attribute
				.as_deref()
				.and_then(|attribute| model.attribute_value(attribute)),
		}
	}

	/// Data cell: `{attribute: formattedValue}`.
	///
	/// Missing and null values render as the grid's empty cell without going
	/// through the formatter.
	pub fn render_data_cell(
		&self,
		grid: &Grid<M>,
		model: &M,
		key: &Value,
		index: usize,
	) -> Result<Map<String, Value>> {
		let value = match self.data_cell_value(grid, model, key, index) {
			Some(value) if !value.is_null() => grid.formatter().format(&value, &self.format)?,
			_ => grid.empty_cell().clone(),
		};

		let mut cell = Map::new();
		cell.insert(self.attribute_name().to_string(), value);
		Ok(cell)
	}
}

impl<M> fmt::Debug for DataColumn<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataColumn")
			.field("kind", &self.kind)
			.field("attribute", &self.attribute)
			.field("label", &self.label)
			.field("value", &self.value)
			.field("format", &self.format)
			.field("visible", &self.visible)
			.finish_non_exhaustive()
	}
}

fn cell(content: &Option<Value>, options: &Map<String, Value>) -> Value {
	json!({
		"value": content_or_empty(content),
		"options": options,
	})
}

/// Configured content, or an empty list when unset or blank.
fn content_or_empty(content: &Option<Value>) -> Value {
	match content {
		Some(value) if !is_blank(value) => value.clone(),
		_ => Value::Array(Vec::new()),
	}
}

fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(text) => text.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Bool(_) | Value::Number(_) => false,
	}
}
