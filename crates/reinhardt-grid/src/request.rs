//! Request query parameter sources.
//!
//! The grid only reads its layout parameter (and optionally filter values)
//! from the request, so any flat string map will do.

use std::collections::HashMap;

/// Source of flat, string keyed request query parameters.
pub trait QueryParamSource {
	/// Returns the query parameters of the current request.
	fn query_params(&self) -> HashMap<String, String>;
}

impl QueryParamSource for HashMap<String, String> {
	fn query_params(&self) -> HashMap<String, String> {
		self.clone()
	}
}

impl<B> QueryParamSource for http::Request<B> {
	fn query_params(&self) -> HashMap<String, String> {
		parse_query_string(self.uri().query().unwrap_or_default())
	}
}

/// Parses an `application/x-www-form-urlencoded` query string.
///
/// Malformed input yields an empty map; later duplicates overwrite earlier
/// ones.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::request::parse_query_string;
///
/// let params = parse_query_string("layout=pager%2Citems&page=2");
/// assert_eq!(params.get("layout").map(String::as_str), Some("pager,items"));
/// assert_eq!(params.get("page").map(String::as_str), Some("2"));
/// ```
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
	match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
		Ok(pairs) => pairs.into_iter().collect(),
		Err(error) => {
			tracing::debug!(%error, "ignoring malformed query string");
			HashMap::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_http_request_query_params() {
		let request = http::Request::builder()
			.uri("/products?layout=metadata,items&sort=-price")
			.body(())
			.unwrap();

		let params = request.query_params();
		assert_eq!(params.get("layout").unwrap(), "metadata,items");
		assert_eq!(params.get("sort").unwrap(), "-price");
	}

	#[rstest]
	fn test_http_request_without_query() {
		let request = http::Request::builder().uri("/products").body(()).unwrap();
		assert!(request.query_params().is_empty());
	}

	#[rstest]
	#[case("", 0)]
	#[case("a=1&b=2", 2)]
	#[case("a=1&a=2", 1)]
	fn test_parse_query_string(#[case] query: &str, #[case] expected_len: usize) {
		assert_eq!(parse_query_string(query).len(), expected_len);
	}
}
