//! Grid settings shared by every grid a factory creates

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::formatter::FormatterSettings;
use crate::layout::Section;

/// Defaults applied to new grids.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::GridSettings;
/// use reinhardt_grid::layout::Section;
///
/// let settings = GridSettings::from_toml(r#"
///     layout_param = "view"
///     default_layout = ["pager", "items"]
///     batch_size = 50
///
///     [formatter]
///     boolean_true = "On"
/// "#).unwrap();
///
/// assert_eq!(settings.layout_param, "view");
/// assert_eq!(settings.default_layout, vec![Section::Pager, Section::Items]);
/// assert_eq!(settings.separator, ",");
/// assert_eq!(settings.formatter.boolean_true, "On");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
	/// Request parameter selecting the layout
	pub layout_param: String,
	/// Separator between sections in the layout parameter
	pub separator: String,
	/// Layout used when the request selects none
	pub default_layout: Vec<Section>,
	/// Page size of data providers built from a query
	pub batch_size: usize,
	/// Placeholder for missing cell values
	pub empty_cell: Value,
	/// Whether the client should show the header row
	pub show_header: bool,
	/// Whether the client should show the filter row
	pub show_filters: bool,
	/// Whether the client should show the footer row
	pub show_footer: bool,
	/// Settings of the default formatter
	pub formatter: FormatterSettings,
}

impl Default for GridSettings {
	fn default() -> Self {
		Self {
			layout_param: "layout".to_string(),
			separator: ",".to_string(),
			default_layout: Section::ALL.to_vec(),
			batch_size: 100,
			empty_cell: Value::Null,
			show_header: true,
			show_filters: true,
			show_footer: false,
			formatter: FormatterSettings::default(),
		}
	}
}

impl GridSettings {
	/// Parses settings from TOML.
	pub fn from_toml(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Parses settings from JSON.
	pub fn from_json(content: &str) -> Result<Self> {
		Ok(serde_json::from_str(content)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::GridError;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_empty_documents_yield_defaults() {
		assert_eq!(GridSettings::from_toml("").unwrap(), GridSettings::default());
		assert_eq!(GridSettings::from_json("{}").unwrap(), GridSettings::default());
	}

	#[rstest]
	fn test_json_settings() {
		let settings = GridSettings::from_json(
			r#"{"empty_cell": "-", "show_footer": true, "formatter": {"thousand_separator": " "}}"#,
		)
		.unwrap();
		assert_eq!(settings.empty_cell, json!("-"));
		assert!(settings.show_footer);
		assert_eq!(settings.formatter.thousand_separator, " ");
		assert_eq!(settings.batch_size, 100);
	}

	#[rstest]
	fn test_unknown_section_is_rejected() {
		let result = GridSettings::from_toml(r#"default_layout = ["footer"]"#);
		assert!(matches!(result, Err(GridError::Toml(_))));
	}

	#[rstest]
	fn test_malformed_json_is_rejected() {
		assert!(matches!(
			GridSettings::from_json("{"),
			Err(GridError::Json(_))
		));
	}
}
