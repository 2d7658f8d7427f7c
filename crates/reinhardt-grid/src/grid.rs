//! The grid and its builder

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::column::{ColumnSpec, DataColumn};
use crate::data::{DataProvider, Pagination, Query, QueryDataProvider};
use crate::error::{GridError, Result};
use crate::factory::IdCounter;
use crate::formatter::{DefaultFormatter, Formatter, FormatterSettings};
use crate::layout::{Section, parse_layout};
use crate::model::{FilterModel, Model};
use crate::renderer::{DataRenderer, GridViewRenderer, RenderParams};
use crate::request::QueryParamSource;
use crate::settings::GridSettings;

/// Row post-processing hook, called with the cells rendered so far.
pub type RowRenderFn<M> = Box<dyn Fn(&Grid<M>, Map<String, Value>) -> Map<String, Value>>;

/// Formatter of a grid: a ready instance or settings for the default one.
pub enum FormatterConfig {
	/// Formatter instance
	Instance(Box<dyn Formatter>),
	/// Settings of a [`DefaultFormatter`]
	Settings(FormatterSettings),
}

impl fmt::Debug for FormatterConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Instance(_) => f.write_str("Instance(..)"),
			Self::Settings(settings) => f.debug_tuple("Settings").field(settings).finish(),
		}
	}
}

/// A configured data grid.
///
/// A grid is built once per request through [`GridBuilder`], then rendered
/// with [`Grid::run`].
///
/// # Examples
///
/// ```
/// use reinhardt_grid::{ArrayDataProvider, Grid, Pagination};
/// use serde_json::{Value, json};
///
/// let rows: Vec<Value> = (1..=3)
///     .map(|id| json!({"id": id, "name": format!("Product {}", id)}))
///     .collect();
///
/// let grid = Grid::builder()
///     .with_data_provider(ArrayDataProvider::new(rows).with_pagination(Pagination::new(2)))
///     .with_columns(["id", "name:text:Title"])
///     .with_params([("layout".to_string(), "pager,items".to_string())].into())
///     .build()
///     .unwrap();
///
/// let output = grid.run().unwrap();
/// assert_eq!(output["pager"]["results"]["total"], json!(3));
/// assert_eq!(output["items"][1], json!({"id": 2, "name": "Product 2"}));
/// assert!(output.get("columns").is_none());
/// ```
pub struct Grid<M> {
	id: OnceCell<String>,
	id_counter: IdCounter,
	data_provider: Box<dyn DataProvider<M>>,
	filter_model: Option<Box<dyn FilterModel>>,
	columns: Vec<DataColumn<M>>,
	formatter: Box<dyn Formatter>,
	renderer: Box<dyn DataRenderer<M>>,
	request: Option<Box<dyn QueryParamSource>>,
	params: Option<HashMap<String, String>>,
	caption: Option<String>,
	description: Option<String>,
	options: Map<String, Value>,
	show_header: bool,
	show_filters: bool,
	show_footer: bool,
	empty_cell: Value,
	layout_param: String,
	separator: String,
	default_layout: Vec<Section>,
	row_data_cell_render: Option<RowRenderFn<M>>,
	layout: RefCell<Option<Vec<Section>>>,
}

impl<M: Model + 'static> Grid<M> {
	/// Starts a grid with default settings and its own id counter.
	pub fn builder() -> GridBuilder<M> {
		GridBuilder::new(GridSettings::default(), IdCounter::new())
	}
}

impl<M: Model> Grid<M> {
	/// Renders the grid sections selected by the layout.
	pub fn run(&self) -> Result<Map<String, Value>> {
		self.renderer.run("main", &RenderParams::new(self))
	}

	/// Sections to render, in order.
	///
	/// The layout is read from the explicit parameters, or from the request
	/// when no parameters were given. Unknown sections are dropped; when none
	/// remain the default layout applies. The result is cached until
	/// `refresh` is set.
	pub fn layout_sections(&self, refresh: bool) -> Vec<Section> {
		if !refresh && let Some(cached) = &*self.layout.borrow() {
			return cached.clone();
		}

		let param = match &self.params {
			Some(params) => params.get(&self.layout_param).cloned(),
			None => self
				.request
				.as_ref()
				.and_then(|request| request.query_params().remove(&self.layout_param)),
		};
		let mut sections = param
			.map(|param| parse_layout(&param, &self.separator))
			.unwrap_or_default();
		if sections.is_empty() {
			sections = self.default_layout.clone();
		}
		tracing::debug!(?sections, "resolved grid layout");

		*self.layout.borrow_mut() = Some(sections.clone());
		sections
	}

	fn init_columns(&mut self, specs: Vec<ColumnSpec<M>>) -> Result<()> {
		let specs = if specs.is_empty() {
			self.guess_columns()
		} else {
			specs
		};

		let mut columns = Vec::with_capacity(specs.len());
		for spec in specs {
			let column = spec.into_column()?;
			if column.visible {
				columns.push(column);
			}
		}
		self.columns = columns;
		Ok(())
	}

	/// One column per null or scalar field of the first row.
	fn guess_columns(&self) -> Vec<ColumnSpec<M>> {
		let Some(first) = self.data_provider.models().first() else {
			tracing::warn!("cannot guess grid columns from an empty data provider");
			return Vec::new();
		};

		let specs: Vec<ColumnSpec<M>> = first
			.fields()
			.into_iter()
			.filter(|(_, value)| !value.is_array() && !value.is_object())
			.map(|(name, _)| ColumnSpec::Column(DataColumn::new(name)))
			.collect();
		tracing::debug!(columns = specs.len(), "guessed grid columns");
		specs
	}
}

impl<M> Grid<M> {
	/// Grid id, generated on first access.
	pub fn id(&self) -> &str {
		self.id.get_or_init(|| {
			let digest = Sha256::digest(std::any::type_name::<Self>().as_bytes());
			format!("{}_{}", hex::encode(&digest[..16]), self.id_counter.next())
		})
	}

	/// The data provider rows are read from.
	pub fn data_provider(&self) -> &dyn DataProvider<M> {
		self.data_provider.as_ref()
	}

	/// The filter model, if any.
	pub fn filter_model(&self) -> Option<&dyn FilterModel> {
		self.filter_model
			.as_deref()
			.map(|filter| filter as &dyn FilterModel)
	}

	/// Visible columns in render order.
	pub fn columns(&self) -> &[DataColumn<M>] {
		&self.columns
	}

	/// The cell formatter.
	pub fn formatter(&self) -> &dyn Formatter {
		self.formatter.as_ref()
	}

	/// Placeholder for missing cell values.
	pub fn empty_cell(&self) -> &Value {
		&self.empty_cell
	}

	/// Grid caption.
	pub fn caption(&self) -> Option<&str> {
		self.caption.as_deref()
	}

	/// Grid description.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Client-side options exposed in the metadata.
	pub fn options(&self) -> &Map<String, Value> {
		&self.options
	}

	/// Whether the client should show the header row.
	pub fn show_header(&self) -> bool {
		self.show_header
	}

	/// Whether the client should show the filter row.
	pub fn show_filters(&self) -> bool {
		self.show_filters
	}

	/// Whether the client should show the footer row.
	pub fn show_footer(&self) -> bool {
		self.show_footer
	}

	/// The row post-processing hook, if any.
	pub fn row_data_cell_render(&self) -> Option<&RowRenderFn<M>> {
		self.row_data_cell_render.as_ref()
	}
}

impl<M> fmt::Debug for Grid<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Grid")
			.field("id", &self.id.get())
			.field("columns", &self.columns)
			.field("caption", &self.caption)
			.field("layout_param", &self.layout_param)
			.field("default_layout", &self.default_layout)
			.finish_non_exhaustive()
	}
}

/// Builder for [`Grid`].
///
/// Display defaults come from the [`GridSettings`] the builder was created
/// with; every `with_*` call overrides them for this grid only.
pub struct GridBuilder<M> {
	settings: GridSettings,
	id_counter: IdCounter,
	data_provider: Option<Box<dyn DataProvider<M>>>,
	query: Option<Box<dyn Query<M>>>,
	formatter: Option<FormatterConfig>,
	renderer: Option<Box<dyn DataRenderer<M>>>,
	columns: Vec<ColumnSpec<M>>,
	filter_model: Option<Box<dyn FilterModel>>,
	request: Option<Box<dyn QueryParamSource>>,
	params: Option<HashMap<String, String>>,
	caption: Option<String>,
	description: Option<String>,
	options: Map<String, Value>,
	row_data_cell_render: Option<RowRenderFn<M>>,
}

impl<M: Model + 'static> GridBuilder<M> {
	/// Creates a builder from settings and the counter feeding grid ids.
	pub fn new(settings: GridSettings, id_counter: IdCounter) -> Self {
		Self {
			settings,
			id_counter,
			data_provider: None,
			query: None,
			formatter: None,
			renderer: None,
			columns: Vec::new(),
			filter_model: None,
			request: None,
			params: None,
			caption: None,
			description: None,
			options: Map::new(),
			row_data_cell_render: None,
		}
	}

	/// Reads rows from `provider`.
	pub fn with_data_provider(mut self, provider: impl DataProvider<M> + 'static) -> Self {
		self.data_provider = Some(Box::new(provider));
		self
	}

	/// Reads rows from a query when no data provider is set.
	///
	/// The query is paginated by the batch size.
	pub fn with_query(mut self, query: impl Query<M> + 'static) -> Self {
		self.query = Some(Box::new(query));
		self
	}

	/// Page size of the provider built from a query.
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.settings.batch_size = batch_size;
		self
	}

	/// Formats cells with `formatter`.
	pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
		self.formatter = Some(FormatterConfig::Instance(Box::new(formatter)));
		self
	}

	/// Uses a [`DefaultFormatter`] built from `settings`.
	pub fn with_formatter_settings(mut self, settings: FormatterSettings) -> Self {
		self.formatter = Some(FormatterConfig::Settings(settings));
		self
	}

	/// Renders the grid with `renderer`.
	pub fn with_renderer(mut self, renderer: impl DataRenderer<M> + 'static) -> Self {
		self.renderer = Some(Box::new(renderer));
		self
	}

	/// Appends a column.
	pub fn with_column(mut self, column: impl Into<ColumnSpec<M>>) -> Self {
		self.columns.push(column.into());
		self
	}

	/// Appends several columns.
	pub fn with_columns<I>(mut self, columns: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<ColumnSpec<M>>,
	{
		self.columns.extend(columns.into_iter().map(Into::into));
		self
	}

	/// Sets the filter model.
	pub fn with_filter_model(mut self, filter_model: impl FilterModel + 'static) -> Self {
		self.filter_model = Some(Box::new(filter_model));
		self
	}

	/// Reads the layout from this request's query parameters.
	pub fn with_request(mut self, request: impl QueryParamSource + 'static) -> Self {
		self.request = Some(Box::new(request));
		self
	}

	/// Reads the layout from explicit parameters instead of the request.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = Some(params);
		self
	}

	/// Sets the caption.
	pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = Some(caption.into());
		self
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Sets the client-side options.
	pub fn with_options(mut self, options: Map<String, Value>) -> Self {
		self.options = options;
		self
	}

	/// Shows or hides the header row.
	pub fn with_show_header(mut self, show: bool) -> Self {
		self.settings.show_header = show;
		self
	}

	/// Shows or hides the filter row.
	pub fn with_show_filters(mut self, show: bool) -> Self {
		self.settings.show_filters = show;
		self
	}

	/// Shows or hides the footer row.
	pub fn with_show_footer(mut self, show: bool) -> Self {
		self.settings.show_footer = show;
		self
	}

	/// Sets the placeholder for missing cell values.
	pub fn with_empty_cell(mut self, empty_cell: impl Into<Value>) -> Self {
		self.settings.empty_cell = empty_cell.into();
		self
	}

	/// Sets the request parameter selecting the layout.
	pub fn with_layout_param(mut self, layout_param: impl Into<String>) -> Self {
		self.settings.layout_param = layout_param.into();
		self
	}

	/// Sets the separator of the layout parameter.
	pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
		self.settings.separator = separator.into();
		self
	}

	/// Sets the layout used when the request selects none.
	pub fn with_default_layout(mut self, layout: Vec<Section>) -> Self {
		self.settings.default_layout = layout;
		self
	}

	/// Post-processes the cells of each row after every column merge.
	pub fn with_row_data_cell_render<F>(mut self, render: F) -> Self
	where
		F: Fn(&Grid<M>, Map<String, Value>) -> Map<String, Value> + 'static,
	{
		self.row_data_cell_render = Some(Box::new(render));
		self
	}

	/// Resolves the data provider, formatter, renderer and columns.
	///
	/// # Errors
	///
	/// [`GridError::InvalidConfig`] when neither a data provider nor a query
	/// is set, when the formatter settings are invalid, or when a column
	/// cannot be built.
	pub fn build(self) -> Result<Grid<M>> {
		let settings = self.settings;

		let data_provider: Box<dyn DataProvider<M>> = match (self.data_provider, self.query) {
			(Some(provider), _) => provider,
			(None, Some(query)) => Box::new(
				QueryDataProvider::from_boxed(query)
					.with_pagination(Pagination::new(settings.batch_size)),
			),
			(None, None) => {
				return Err(GridError::InvalidConfig(
					"The grid requires either a data provider or a query".to_string(),
				));
			}
		};

		let formatter: Box<dyn Formatter> = match self.formatter {
			Some(FormatterConfig::Instance(formatter)) => formatter,
			Some(FormatterConfig::Settings(formatter_settings)) => {
				Box::new(DefaultFormatter::from_settings(formatter_settings)?)
			}
			None => Box::new(DefaultFormatter::from_settings(settings.formatter)?),
		};

		let renderer: Box<dyn DataRenderer<M>> = match self.renderer {
			Some(renderer) => renderer,
			None => Box::new(GridViewRenderer::new()),
		};

		let mut grid = Grid {
			id: OnceCell::new(),
			id_counter: self.id_counter,
			data_provider,
			filter_model: self.filter_model,
			columns: Vec::new(),
			formatter,
			renderer,
			request: self.request,
			params: self.params,
			caption: self.caption,
			description: self.description,
			options: self.options,
			show_header: settings.show_header,
			show_filters: settings.show_filters,
			show_footer: settings.show_footer,
			empty_cell: settings.empty_cell,
			layout_param: settings.layout_param,
			separator: settings.separator,
			default_layout: settings.default_layout,
			row_data_cell_render: self.row_data_cell_render,
			layout: RefCell::new(None),
		};
		grid.init_columns(self.columns)?;
		tracing::debug!(columns = grid.columns.len(), "grid initialized");

		Ok(grid)
	}
}
