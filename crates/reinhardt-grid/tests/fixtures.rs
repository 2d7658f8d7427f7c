//! Common test fixtures for reinhardt-grid tests

#![allow(dead_code)]

use std::collections::HashMap;

use reinhardt_grid::{AttributeLabelProvider, Model};
use rstest::*;
use serde_json::{Value, json};

/// Product record with its own attribute labels
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
	pub id: i64,
	pub name: String,
	pub price: i64,
	pub created_at: String,
}

impl Product {
	pub const FIELDS: [&'static str; 4] = ["id", "name", "price", "created_at"];
}

impl Model for Product {
	fn attribute_value(&self, name: &str) -> Option<Value> {
		match name {
			"id" => Some(json!(self.id)),
			"name" => Some(json!(self.name)),
			"price" => Some(json!(self.price)),
			"created_at" => Some(json!(self.created_at)),
			_ => None,
		}
	}

	fn fields(&self) -> Vec<(String, Value)> {
		Self::FIELDS
			.iter()
			.filter_map(|name| {
				self.attribute_value(name)
					.map(|value| (name.to_string(), value))
			})
			.collect()
	}

	fn as_label_provider(&self) -> Option<&dyn AttributeLabelProvider> {
		Some(self)
	}
}

impl AttributeLabelProvider for Product {
	fn attribute_label(&self, attribute: &str) -> Option<String> {
		match attribute {
			"id" => Some("ID".to_string()),
			"created_at" => Some("Created At (UTC)".to_string()),
			_ => None,
		}
	}
}

/// Labels declared for the product record type
pub struct ProductLabels;

impl AttributeLabelProvider for ProductLabels {
	fn attribute_label(&self, attribute: &str) -> Option<String> {
		match attribute {
			"name" => Some("Product name".to_string()),
			_ => None,
		}
	}
}

/// Fixture providing 100 products priced 101..=200
#[fixture]
pub fn products() -> Vec<Product> {
	(1..=100)
		.map(|id| Product {
			id,
			name: format!("Product {}", id),
			price: 100 + id,
			created_at: "2017-12-12 00:00:00".to_string(),
		})
		.collect()
}

/// Fixture providing the same 100 products as plain JSON rows
#[fixture]
pub fn product_rows() -> Vec<Value> {
	(1..=100)
		.map(|id| {
			json!({
				"id": id,
				"name": format!("Product {}", id),
				"price": 100 + id,
				"created_at": "2017-12-12 00:00:00",
			})
		})
		.collect()
}

/// Request parameters selecting `layout`
pub fn layout_params(layout: &str) -> HashMap<String, String> {
	[("layout".to_string(), layout.to_string())].into()
}
