//! Typed column configuration and the compact column grammar

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::base::DataColumn;
use crate::error::{GridError, Result};
use crate::formatter::Format;

/// Configuration of a single column.
///
/// Unset fields keep the defaults of the column kind named by `class`.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::column::ColumnConfig;
///
/// let config: ColumnConfig = toml::from_str(r#"
///     attribute = "created_at"
///     format = ["date", "%d/%m/%Y"]
///     label = "Created"
///     enable_sorting = false
/// "#).unwrap();
///
/// assert_eq!(config.attribute.as_deref(), Some("created_at"));
/// assert_eq!(config.format.unwrap().name, "date");
/// assert_eq!(config.enable_sorting, Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
	/// Column kind: `data` / `DataColumn` (default) or `serial` / `SerialColumn`
	pub class: Option<String>,
	/// Rendered attribute
	pub attribute: Option<String>,
	/// Explicit header label
	pub label: Option<String>,
	/// Column description
	pub description: Option<String>,
	/// Field read instead of `attribute`
	pub value: Option<String>,
	/// Cell format
	pub format: Option<Format>,
	/// Header cell content
	pub header: Option<Value>,
	/// Footer cell content
	pub footer: Option<Value>,
	/// Header cell options
	pub header_options: Map<String, Value>,
	/// Footer cell options
	pub footer_options: Map<String, Value>,
	/// Row options
	pub row_options: Map<String, Value>,
	/// Filter items
	pub filter: Option<Value>,
	/// Sorting override
	pub enable_sorting: Option<bool>,
	/// Filtering override
	pub enable_filtering: Option<bool>,
	/// Visibility override
	pub visible: Option<bool>,
}

impl ColumnConfig {
	/// Parses the compact `attribute[:format[:label]]` grammar.
	///
	/// The format defaults to `raw`, including when its segment is empty. Once
	/// a format segment is present the rest of the text is the label, colons
	/// included.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_grid::column::ColumnConfig;
	///
	/// let config = ColumnConfig::parse_shorthand("price:decimal:Price (US$)").unwrap();
	/// assert_eq!(config.attribute.as_deref(), Some("price"));
	/// assert_eq!(config.format.unwrap().name, "decimal");
	/// assert_eq!(config.label.as_deref(), Some("Price (US$)"));
	///
	/// assert!(ColumnConfig::parse_shorthand("").is_err());
	/// ```
	pub fn parse_shorthand(text: &str) -> Result<Self> {
		let captures = shorthand_pattern().captures(text).ok_or_else(|| {
			GridError::InvalidConfig(
				"The column must be specified in the format of \"attribute\", \"attribute:format\" or \"attribute:format:label\""
					.to_string(),
			)
		})?;

		let format = captures
			.get(3)
			.map(|m| m.as_str())
			.filter(|name| !name.is_empty())
			.map_or_else(Format::default, Format::new);

		Ok(Self {
			attribute: Some(captures[1].to_string()),
			format: Some(format),
			label: captures.get(5).map(|m| m.as_str().to_string()),
			..Self::default()
		})
	}
}

fn shorthand_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^([^:]+)(:(\w*))?(:(.*))?$").expect("Invalid column shorthand pattern")
	})
}

/// A column as configured on a grid, before it is built.
pub enum ColumnSpec<M> {
	/// Compact `attribute[:format[:label]]` text
	Shorthand(String),
	/// Typed configuration
	Config(ColumnConfig),
	/// Prebuilt column
	Column(DataColumn<M>),
}

impl<M> ColumnSpec<M> {
	/// Builds the column this declaration describes.
	pub fn into_column(self) -> Result<DataColumn<M>> {
		match self {
			Self::Shorthand(text) => DataColumn::from_config(ColumnConfig::parse_shorthand(&text)?),
			Self::Config(config) => DataColumn::from_config(config),
			Self::Column(column) => Ok(column),
		}
	}
}

impl<M> std::fmt::Debug for ColumnSpec<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Shorthand(text) => f.debug_tuple("Shorthand").field(text).finish(),
			Self::Config(config) => f.debug_tuple("Config").field(config).finish(),
			Self::Column(column) => f.debug_tuple("Column").field(column).finish(),
		}
	}
}

impl<M> From<&str> for ColumnSpec<M> {
	fn from(text: &str) -> Self {
		Self::Shorthand(text.to_string())
	}
}

impl<M> From<String> for ColumnSpec<M> {
	fn from(text: String) -> Self {
		Self::Shorthand(text)
	}
}

impl<M> From<ColumnConfig> for ColumnSpec<M> {
	fn from(config: ColumnConfig) -> Self {
		Self::Config(config)
	}
}

impl<M> From<DataColumn<M>> for ColumnSpec<M> {
	fn from(column: DataColumn<M>) -> Self {
		Self::Column(column)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnSpecRepr {
	Shorthand(String),
	Config(ColumnConfig),
}

impl<'de, M> Deserialize<'de> for ColumnSpec<M> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		Ok(match ColumnSpecRepr::deserialize(deserializer)? {
			ColumnSpecRepr::Shorthand(text) => Self::Shorthand(text),
			ColumnSpecRepr::Config(config) => Self::Config(config),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ColumnKind;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("name", "name", "raw", None)]
	#[case("price:decimal", "price", "decimal", None)]
	#[case("price:decimal:Price (US$)", "price", "decimal", Some("Price (US$)"))]
	#[case("price::Price", "price", "raw", Some("Price"))]
	#[case("time:datetime:At: 12:00", "time", "datetime", Some("At: 12:00"))]
	#[case("author.name:text", "author.name", "text", None)]
	fn test_parse_shorthand(
		#[case] text: &str,
		#[case] attribute: &str,
		#[case] format: &str,
		#[case] label: Option<&str>,
	) {
		let config = ColumnConfig::parse_shorthand(text).unwrap();
		assert_eq!(config.attribute.as_deref(), Some(attribute));
		assert_eq!(config.format, Some(Format::new(format)));
		assert_eq!(config.label.as_deref(), label);
	}

	#[rstest]
	#[case("")]
	#[case(":decimal")]
	#[case(":")]
	fn test_parse_shorthand_rejects_malformed(#[case] text: &str) {
		assert!(matches!(
			ColumnConfig::parse_shorthand(text),
			Err(GridError::InvalidConfig(_))
		));
	}

	#[rstest]
	fn test_column_specs_deserialize_from_mixed_list() {
		let specs: Vec<ColumnSpec<Value>> = serde_json::from_value(json!([
			"id",
			{"class": "serial"},
			{"attribute": "price", "format": ["decimal", 1], "visible": false},
		]))
		.unwrap();

		let columns: Vec<_> = specs
			.into_iter()
			.map(|spec| spec.into_column().unwrap())
			.collect();
		assert_eq!(columns[0].attribute_name(), "id");
		assert_eq!(columns[1].kind, ColumnKind::Serial);
		assert_eq!(columns[2].format, Format::with_args("decimal", vec![json!(1)]));
		assert!(!columns[2].visible);
	}

	#[rstest]
	fn test_unknown_config_field_is_rejected() {
		let result: std::result::Result<ColumnConfig, _> =
			serde_json::from_value(json!({"attribute": "id", "colour": "red"}));
		assert!(result.is_err());
	}

	proptest! {
		#[test]
		fn prop_shorthand_attribute_survives(
			attribute in "[a-z_][a-z0-9_.]{0,12}",
			format in "[a-z]{0,8}",
			label in "[ -~]{0,16}",
		) {
			let text = format!("{}:{}:{}", attribute, format, label);
			let config = ColumnConfig::parse_shorthand(&text).unwrap();
			prop_assert_eq!(config.attribute.as_deref(), Some(attribute.as_str()));
			prop_assert_eq!(config.label.as_deref(), Some(label.as_str()));
			let expected = if format.is_empty() { "raw".to_string() } else { format };
			prop_assert_eq!(config.format.map(|f| f.name), Some(expected));
		}
	}
}
