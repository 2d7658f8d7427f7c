mod fixtures;

use assert_json_diff::assert_json_eq;
use fixtures::*;
use proptest::prelude::*;
use reinhardt_grid::{
	ArrayDataProvider, ColumnConfig, DataColumn, FieldAccessor, FilterValues, Grid, Pagination,
};
use rstest::*;
use serde_json::{Value, json};

fn paged_grid(products: Vec<Product>, page: usize, page_size: usize) -> Grid<Product> {
	Grid::builder()
		.with_data_provider(
			ArrayDataProvider::new(products)
				.with_pagination(Pagination::new(page_size).with_page(page)),
		)
		.with_column(DataColumn::serial())
		.with_column("name")
		.with_params(layout_params("items"))
		.build()
		.unwrap()
}

#[rstest]
fn test_serial_column_counts_across_pages(products: Vec<Product>) {
	let grid = paged_grid(products, 1, 20);
	let result = grid.run().unwrap();

	assert_json_eq!(result["items"][0], json!({"#": 21, "name": "Product 21"}));
	assert_json_eq!(result["items"][19], json!({"#": 40, "name": "Product 40"}));
}

#[rstest]
fn test_serial_column_without_pagination(product_rows: Vec<Value>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(product_rows))
		.with_column(ColumnConfig {
			class: Some("SerialColumn".to_string()),
			..ColumnConfig::default()
		})
		.build()
		.unwrap();

	let provider = grid.data_provider();
	let column = &grid.columns()[0];
	let model = &provider.models()[4];
	assert_eq!(column.data_cell_value(&grid, model, &json!(4), 4), Some(json!(5)));
}

#[rstest]
fn test_serial_column_descriptor(products: Vec<Product>) {
	let grid = paged_grid(products, 0, 20);
	let column = &grid.columns()[0];

	assert_eq!(column.render_label(&grid), "#");
	assert_json_eq!(
		column.render_filter_cell(&grid),
		json!({"selected": null, "items": [], "options": {}})
	);
	assert!(!column.enable_sorting);
	assert!(!column.enable_filtering);
}

#[rstest]
fn test_value_accessors(products: Vec<Product>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(products).with_key("name"))
		.with_column(ColumnConfig {
			attribute: Some("cost".to_string()),
			value: Some("price".to_string()),
			..ColumnConfig::default()
		})
		.with_column(DataColumn::new("currency").with_value(FieldAccessor::Literal(json!("USD"))))
		.with_column(
			DataColumn::new("row").with_value_fn(|_: &Product, key, index, column| {
				Some(json!(format!("{}/{}/{}", column.attribute_name(), key, index)))
			}),
		)
		.with_params(layout_params("items"))
		.build()
		.unwrap();

	let result = grid.run().unwrap();
	assert_json_eq!(
		result["items"][1],
		json!({"cost": 102, "currency": "USD", "row": "row/\"Product 2\"/1"})
	);
}

#[rstest]
fn test_formats_applied_to_cells(products: Vec<Product>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(products))
		.with_columns([
			"price:decimal",
			"created_at:date",
			"name:text:Name",
		])
		.with_column(DataColumn::new("id").with_format(reinhardt_grid::Format::with_args(
			"percent",
			vec![json!(1)],
		)))
		.with_params(layout_params("items"))
		.build()
		.unwrap();

	let result = grid.run().unwrap();
	assert_json_eq!(
		result["items"][0],
		json!({"price": "101.00", "created_at": "2017-12-12", "name": "Product 1", "id": "100.0%"})
	);
}

#[rstest]
fn test_filter_cell_reads_filter_model(products: Vec<Product>) {
	let filters = FilterValues::new()
		.attribute("name", json!("Product 7"))
		.attribute("status", json!("active"));
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(products))
		.with_columns(["name", "price"])
		.with_filter_model(filters)
		.build()
		.unwrap();

	let columns = grid.columns();
	assert_eq!(columns[0].render_filter_cell(&grid)["selected"], json!("Product 7"));
	assert_eq!(columns[1].render_filter_cell(&grid)["selected"], Value::Null);
}

#[rstest]
fn test_label_from_model_type_wins(products: Vec<Product>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(products).with_model_labels(ProductLabels))
		.with_columns(["name", "price"])
		.with_filter_model(FilterValues::new().label("name", "Filter name"))
		.build()
		.unwrap();

	let columns = grid.columns();
	assert_eq!(columns[0].render_label(&grid), "Product name");
	assert_eq!(columns[1].render_label(&grid), "Price");
}

#[rstest]
fn test_label_from_filter_model_before_first_row(products: Vec<Product>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(products))
		.with_columns(["id", "created_at"])
		.with_filter_model(FilterValues::new().label("id", "Identifier"))
		.build()
		.unwrap();

	let columns = grid.columns();
	assert_eq!(columns[0].render_label(&grid), "Identifier");
	assert_eq!(columns[1].render_label(&grid), "Created At (UTC)");
}

#[rstest]
fn test_label_humanized_without_sources(product_rows: Vec<Value>) {
	let grid = Grid::builder()
		.with_data_provider(ArrayDataProvider::new(product_rows))
		.with_columns(["created_at", "price::Unit price"])
		.build()
		.unwrap();

	let columns = grid.columns();
	assert_eq!(columns[0].render_label(&grid), "Created At");
	assert_eq!(columns[1].render_label(&grid), "Unit price");
}

#[rstest]
fn test_label_from_empty_provider_is_humanized() {
	let grid = Grid::<Product>::builder()
		.with_data_provider(ArrayDataProvider::new(Vec::new()))
		.with_columns(["created_at"])
		.build()
		.unwrap();

	assert_eq!(grid.columns()[0].render_label(&grid), "Created At");
}

proptest! {
	#[test]
	fn prop_serial_starts_at_page_offset(page_size in 1usize..40, page in 0usize..10) {
		let grid = paged_grid(products(), page, page_size);
		let page_count = 100usize.div_ceil(page_size);
		let expected = page.min(page_count - 1) * page_size + 1;

		let result = grid.run().unwrap();
		prop_assert_eq!(&result["items"][0]["#"], &json!(expected));
	}
}
