//! Header label resolution

use convert_case::{Case, Casing};

use crate::grid::Grid;
use crate::model::{AttributeLabelProvider, Model};

/// Resolves the label of `attribute` for a column of `grid`.
///
/// Label sources are tried in a fixed order and the first one that knows the
/// attribute wins:
///
/// 1. the record type behind the data provider,
/// 2. the grid's filter model,
/// 3. the first row of the current page.
///
/// When none of them answers, the attribute name is humanized.
pub fn resolve_label<M: Model>(grid: &Grid<M>, attribute: &str) -> String {
	let provider = grid.data_provider();
	let sources: [Option<&dyn AttributeLabelProvider>; 3] = [
		provider.model_labels(),
		grid.filter_model().and_then(|filter| filter.as_label_provider()),
		provider
			.models()
			.first()
			.and_then(|model| model.as_label_provider()),
	];

	sources
		.into_iter()
		.flatten()
		.find_map(|source| source.attribute_label(attribute))
		.unwrap_or_else(|| humanize(attribute))
}

/// Converts an attribute identifier into title-cased words.
///
/// Dots of a related attribute path separate words like underscores do.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::column::humanize;
///
/// assert_eq!(humanize("created_at"), "Created At");
/// assert_eq!(humanize("firstName"), "First Name");
/// assert_eq!(humanize("XMLHttpRequest"), "Xml Http Request");
/// ```
pub fn humanize(name: &str) -> String {
	name.replace('.', "_").to_case(Case::Title)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("created_at", "Created At")]
	#[case("id", "Id")]
	#[case("ID", "Id")]
	#[case("userID", "User Id")]
	#[case("firstName", "First Name")]
	#[case("address2", "Address 2")]
	#[case("author.name", "Author Name")]
	#[case("post-title", "Post Title")]
	#[case("XMLHttpRequest", "Xml Http Request")]
	#[case("#", "#")]
	#[case("", "")]
	fn test_humanize(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(humanize(name), expected);
	}
}
