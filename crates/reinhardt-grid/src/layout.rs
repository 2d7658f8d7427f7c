//! Output sections and layout parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named block of the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
	/// Grid identity, display flags and request parameter names
	Metadata,
	/// Result and page counts
	Pager,
	/// Column descriptors
	Columns,
	/// Rendered rows
	Items,
}

impl Section {
	/// Every section, in default layout order.
	pub const ALL: [Section; 4] = [Self::Metadata, Self::Pager, Self::Columns, Self::Items];

	/// Section name as used in the layout parameter and the output keys.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Metadata => "metadata",
			Self::Pager => "pager",
			Self::Columns => "columns",
			Self::Items => "items",
		}
	}
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Section {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"metadata" => Ok(Self::Metadata),
			"pager" => Ok(Self::Pager),
			"columns" => Ok(Self::Columns),
			"items" => Ok(Self::Items),
			other => Err(format!("Unknown grid section: {}", other)),
		}
	}
}

/// Splits a layout parameter into known sections, keeping the requested
/// order. Unknown tokens are dropped.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::layout::{Section, parse_layout};
///
/// assert_eq!(
///     parse_layout("pager,bogus,items", ","),
///     vec![Section::Pager, Section::Items]
/// );
/// ```
pub fn parse_layout(param: &str, separator: &str) -> Vec<Section> {
	if separator.is_empty() {
		return param.parse().map(|section| vec![section]).unwrap_or_default();
	}
	param
		.split(separator)
		.filter_map(|token| match token.parse() {
			Ok(section) => Some(section),
			Err(_) => {
				tracing::debug!(token, "dropping unknown layout section");
				None
			}
		})
		.collect()
}
