//! Default grid renderer

use serde_json::{Map, Value, json};

use super::{DataRenderer, RenderParams, merge};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::layout::Section;
use crate::model::Model;

/// Renders a grid as `{metadata, pager, columns, items}`.
///
/// Only the sections selected by the grid layout are rendered, in layout
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridViewRenderer;

impl GridViewRenderer {
	/// Creates the renderer.
	pub fn new() -> Self {
		Self
	}

	/// Renders every layout section of the grid in `params`.
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] when `params` carries no grid, and any
	/// formatting error raised while rendering items.
	pub fn render_main<M: Model>(&self, params: &RenderParams<'_, M>) -> Result<Map<String, Value>> {
		let grid = params.grid.ok_or_else(|| {
			GridError::InvalidArgument(
				"The main view of the grid renderer requires a grid parameter".to_string(),
			)
		})?;

		let mut content = Map::new();
		for section in grid.layout_sections(false) {
			if let Some(data) = self.render_section(grid, section.as_str())? {
				merge(&mut content, data);
			}
		}
		Ok(content)
	}

	/// Renders one section by name; `None` for unknown names.
	pub fn render_section<M: Model>(
		&self,
		grid: &Grid<M>,
		name: &str,
	) -> Result<Option<Map<String, Value>>> {
		let Ok(section) = name.parse::<Section>() else {
			return Ok(None);
		};
		tracing::trace!(section = section.as_str(), "rendering grid section");

		let data = match section {
			Section::Metadata => self.render_metadata(grid),
			Section::Pager => self.render_pager(grid),
			Section::Columns => self.render_column_group(grid),
			Section::Items => self.render_items(grid)?,
		};
		Ok(Some(data))
	}

	/// `{metadata: {id, caption, description, options, header, filters,
	/// footer, request_params}}`
	pub fn render_metadata<M>(&self, grid: &Grid<M>) -> Map<String, Value> {
		let provider = grid.data_provider();
		let mut request_params = Map::new();
		if let Some(pagination) = provider.pagination() {
			request_params.insert(
				"pager".to_string(),
				json!({
					"param": pagination.page_param,
					"size": pagination.page_size_param,
				}),
			);
		}
		if let Some(sort) = provider.sort() {
			request_params.insert(
				"sorter".to_string(),
				json!({
					"param": sort.sort_param,
					"separator": sort.separator,
					"multi_sort": sort.enable_multi_sort,
				}),
			);
		}

		section(
			"metadata",
			json!({
				"id": grid.id(),
				"caption": grid.caption(),
				"description": grid.description(),
				"options": grid.options(),
				"header": {"show": grid.show_header()},
				"filters": {"show": grid.show_filters()},
				"footer": {"show": grid.show_footer()},
				"request_params": request_params,
			}),
		)
	}

	/// `{pager: {results: {total, per_page}, pages: {total, current}}}`
	pub fn render_pager<M>(&self, grid: &Grid<M>) -> Map<String, Value> {
		let provider = grid.data_provider();
		let (total_pages, current_page) = provider
			.pagination()
			.map_or((1, 1), |pagination| {
				(pagination.page_count(), pagination.current_page() + 1)
			});

		section(
			"pager",
			json!({
				"results": {
					"total": provider.total_count(),
					"per_page": provider.count(),
				},
				"pages": {
					"total": total_pages,
					"current": current_page,
				},
			}),
		)
	}

	/// `{columns: [...]}`, one descriptor per column.
	pub fn render_column_group<M: Model>(&self, grid: &Grid<M>) -> Map<String, Value> {
		let columns: Vec<Value> = grid
			.columns()
			.iter()
			.map(|column| {
				json!({
					"label": column.render_label(grid),
					"attribute": column.attribute,
					"description": column.render_description(),
					"sortable": column.enable_sorting,
					"filterable": column.enable_filtering,
					"header": column.render_header_cell(),
					"filter": column.render_filter_cell(grid),
					"row": {"options": column.row_options},
					"footer": column.render_footer_cell(),
				})
			})
			.collect();

		section("columns", Value::Array(columns))
	}

	/// `{items: [...]}`, one cell object per row of the current page.
	///
	/// Cells are merged in column order; a later column with the same
	/// attribute overwrites an earlier one. The grid's row hook, when set,
	/// runs after every merge and its result replaces the row cells.
	pub fn render_items<M: Model>(&self, grid: &Grid<M>) -> Result<Map<String, Value>> {
		let provider = grid.data_provider();
		let keys = provider.keys();
		let render = grid.row_data_cell_render();

		let mut rows = Vec::with_capacity(provider.count());
		for (index, model) in provider.models().iter().enumerate() {
			let key = keys.get(index).cloned().unwrap_or(Value::Null);
			let mut cells = Map::new();
			for column in grid.columns() {
				cells.extend(column.render_data_cell(grid, model, &key, index)?);
				if let Some(render) = render {
					cells = render(grid, cells);
				}
			}
			rows.push(Value::Object(cells));
		}

		Ok(section("items", Value::Array(rows)))
	}
}

impl<M: Model> DataRenderer<M> for GridViewRenderer {
	fn run(&self, view: &str, params: &RenderParams<'_, M>) -> Result<Map<String, Value>> {
		match view {
			"main" => self.render_main(params),
			other => Err(GridError::InvalidArgument(format!(
				"The grid renderer has no view named \"{}\"",
				other
			))),
		}
	}
}

fn section(name: &str, value: Value) -> Map<String, Value> {
	let mut map = Map::new();
	map.insert(name.to_string(), value);
	map
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{ArrayDataProvider, Pagination, Sort, SortOrder};
	use rstest::{fixture, rstest};

	#[fixture]
	fn grid() -> Grid<Value> {
		let rows: Vec<Value> = (1..=5).map(|id| json!({"id": id})).collect();
		Grid::builder()
			.with_data_provider(
				ArrayDataProvider::new(rows)
					.with_pagination(Pagination::new(2).with_page(1))
					.with_sort(Sort::new().order_by("id", SortOrder::Ascending)),
			)
			.with_columns(["id"])
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_unknown_section_is_none(grid: Grid<Value>) {
		let renderer = GridViewRenderer::new();
		assert!(renderer.render_section(&grid, "footer").unwrap().is_none());
		assert!(renderer.render_section(&grid, "Items").unwrap().is_none());
		assert!(renderer.render_section(&grid, "items").unwrap().is_some());
	}

	#[rstest]
	fn test_pager_with_pagination(grid: Grid<Value>) {
		let pager = GridViewRenderer::new().render_pager(&grid);
		assert_eq!(
			Value::Object(pager),
			json!({"pager": {"results": {"total": 5, "per_page": 2}, "pages": {"total": 3, "current": 2}}})
		);
	}

	#[rstest]
	fn test_pager_without_pagination() {
		let grid = Grid::builder()
			.with_data_provider(ArrayDataProvider::new(vec![json!({"id": 1})]))
			.build()
			.unwrap();
		let pager = GridViewRenderer::new().render_pager(&grid);
		assert_eq!(pager["pager"]["pages"], json!({"total": 1, "current": 1}));
		assert_eq!(pager["pager"]["results"], json!({"total": 1, "per_page": 1}));
	}

	#[rstest]
	fn test_request_params(grid: Grid<Value>) {
		let metadata = GridViewRenderer::new().render_metadata(&grid);
		assert_eq!(
			metadata["metadata"]["request_params"],
			json!({
				"pager": {"param": "page", "size": "per-page"},
				"sorter": {"param": "sort", "separator": ",", "multi_sort": false},
			})
		);
	}

	#[rstest]
	fn test_run_rejects_unknown_view(grid: Grid<Value>) {
		let result = GridViewRenderer::new().run("summary", &RenderParams::new(&grid));
		assert!(matches!(result, Err(GridError::InvalidArgument(_))));
	}

	#[rstest]
	fn test_render_main_requires_grid() {
		let result = GridViewRenderer::new().render_main(&RenderParams::<Value>::empty());
		assert!(matches!(result, Err(GridError::InvalidArgument(_))));
	}
}
