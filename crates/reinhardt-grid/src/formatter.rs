//! Cell value formatting.
//!
//! Every data cell passes through the grid's [`Formatter`] together with the
//! column's [`Format`]. A format is either a bare name (`"raw"`, `"text"`) or a
//! name followed by arguments (`["date", "%d/%m/%Y"]`, `["decimal", 3]`).

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GridError, Result};

/// Format descriptor of a column.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::Format;
/// use serde_json::json;
///
/// let format: Format = serde_json::from_value(json!(["date", "%d/%m/%Y"])).unwrap();
/// assert_eq!(format.name, "date");
/// assert_eq!(format.args, vec![json!("%d/%m/%Y")]);
///
/// let raw: Format = serde_json::from_value(json!("raw")).unwrap();
/// assert_eq!(raw, Format::default());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormatRepr", into = "FormatRepr")]
pub struct Format {
	/// Format name understood by the formatter
	pub name: String,
	/// Extra arguments (decimals, date pattern, ...)
	pub args: Vec<Value>,
}

impl Format {
	/// Creates a format without arguments.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			args: Vec::new(),
		}
	}

	/// Creates a format with arguments.
	pub fn with_args(name: impl Into<String>, args: Vec<Value>) -> Self {
		Self {
			name: name.into(),
			args,
		}
	}

	fn arg(&self, index: usize) -> Option<&Value> {
		self.args.get(index).filter(|value| !value.is_null())
	}
}

impl Default for Format {
	fn default() -> Self {
		Self::new("raw")
	}
}

impl From<&str> for Format {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FormatRepr {
	Name(String),
	List(Vec<Value>),
}

impl TryFrom<FormatRepr> for Format {
	type Error = String;

	fn try_from(repr: FormatRepr) -> std::result::Result<Self, Self::Error> {
		match repr {
			FormatRepr::Name(name) => Ok(Format::new(name)),
			FormatRepr::List(mut parts) => {
				if parts.is_empty() {
					return Err("format list must start with a format name".to_string());
				}
				match parts.remove(0) {
					Value::String(name) => Ok(Format::with_args(name, parts)),
					other => Err(format!("format name must be a string, got {}", other)),
				}
			}
		}
	}
}

impl From<Format> for FormatRepr {
	fn from(format: Format) -> Self {
		if format.args.is_empty() {
			FormatRepr::Name(format.name)
		} else {
			let mut parts = vec![Value::String(format.name)];
			parts.extend(format.args);
			FormatRepr::List(parts)
		}
	}
}

/// Turns raw cell values into display values.
pub trait Formatter {
	/// Formats `value` according to `format`.
	fn format(&self, value: &Value, format: &Format) -> Result<Value>;
}

/// Settings of the [`DefaultFormatter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterSettings {
	/// Display value for `null` input
	pub null_display: Value,
	/// Label for `true` in the `boolean` format
	pub boolean_true: String,
	/// Label for `false` in the `boolean` format
	pub boolean_false: String,
	/// Default strftime pattern of the `date` format
	pub date_format: String,
	/// Default strftime pattern of the `datetime` format
	pub datetime_format: String,
	/// Default strftime pattern of the `time` format
	pub time_format: String,
	/// Decimal separator of numeric formats
	pub decimal_separator: String,
	/// Thousands separator of numeric formats
	pub thousand_separator: String,
}

impl Default for FormatterSettings {
	fn default() -> Self {
		Self {
			null_display: Value::Null,
			boolean_true: "Yes".to_string(),
			boolean_false: "No".to_string(),
			date_format: "%Y-%m-%d".to_string(),
			datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
			time_format: "%H:%M:%S".to_string(),
			decimal_separator: ".".to_string(),
			thousand_separator: ",".to_string(),
		}
	}
}

/// The built-in formatter.
///
/// Supported formats: `raw`, `text`, `ntext`, `html`, `email`, `url`,
/// `boolean`, `integer`, `decimal[, decimals]`, `percent[, decimals]`,
/// `date[, pattern]`, `datetime[, pattern]`, `time[, pattern]`.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::{DefaultFormatter, Format, Formatter};
/// use serde_json::json;
///
/// let formatter = DefaultFormatter::default();
/// let value = formatter.format(&json!(1234.5), &Format::new("decimal")).unwrap();
/// assert_eq!(value, json!("1,234.50"));
///
/// let date = Format::with_args("date", vec![json!("%d/%m/%Y")]);
/// let value = formatter.format(&json!("2017-12-12 00:00:00"), &date).unwrap();
/// assert_eq!(value, json!("12/12/2017"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultFormatter {
	settings: FormatterSettings,
}

impl DefaultFormatter {
	/// Builds a formatter from settings, validating its date patterns.
	pub fn from_settings(settings: FormatterSettings) -> Result<Self> {
		for pattern in [
			&settings.date_format,
			&settings.datetime_format,
			&settings.time_format,
		] {
			if !is_valid_pattern(pattern) {
				return Err(GridError::InvalidConfig(format!(
					"The formatter date pattern \"{}\" is invalid",
					pattern
				)));
			}
		}
		if settings.decimal_separator.is_empty() {
			return Err(GridError::InvalidConfig(
				"The formatter decimal separator must not be empty".to_string(),
			));
		}
		Ok(Self { settings })
	}

	/// The settings this formatter was built from.
	pub fn settings(&self) -> &FormatterSettings {
		&self.settings
	}

	fn format_number(&self, value: f64, decimals: usize) -> String {
		let rendered = format!("{:.*}", decimals, value.abs());
		let (int_part, frac_part) = match rendered.split_once('.') {
			Some((int_part, frac_part)) => (int_part, Some(frac_part)),
			None => (rendered.as_str(), None),
		};
		let mut result = String::new();
		if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
			result.push('-');
		}
		result.push_str(&group_thousands(int_part, &self.settings.thousand_separator));
		if let Some(frac_part) = frac_part {
			result.push_str(&self.settings.decimal_separator);
			result.push_str(frac_part);
		}
		result
	}

	fn format_temporal(&self, value: &Value, format: &Format, default_pattern: &str) -> Result<Value> {
		let pattern = match format.arg(0) {
			Some(Value::String(pattern)) => pattern.as_str(),
			Some(other) => {
				return Err(GridError::format(
					&format.name,
					format!("pattern must be a string, got {}", other),
				));
			}
			None => default_pattern,
		};
		let datetime = parse_datetime(value).ok_or_else(|| {
			GridError::format(&format.name, format!("cannot read {} as a date", value))
		})?;
		let rendered = render_pattern(&datetime, pattern).ok_or_else(|| {
			GridError::format(&format.name, format!("invalid pattern \"{}\"", pattern))
		})?;
		Ok(Value::String(rendered))
	}
}

impl Formatter for DefaultFormatter {
	fn format(&self, value: &Value, format: &Format) -> Result<Value> {
		if value.is_null() {
			return Ok(self.settings.null_display.clone());
		}

		let name = format.name.as_str();
		match name {
			"raw" => Ok(value.clone()),
			"text" => Ok(Value::String(escape_html(&scalar_text(value, name)?))),
			"ntext" => Ok(Value::String(
				escape_html(&scalar_text(value, name)?).replace('\n', "<br>\n"),
			)),
			"html" => Ok(Value::String(scalar_text(value, name)?)),
			"email" => {
				let email = escape_html(&scalar_text(value, name)?);
				Ok(Value::String(format!(
					"<a href=\"mailto:{}\">{}</a>",
					email, email
				)))
			}
			"url" => {
				let text = scalar_text(value, name)?;
				let href = if text.contains("://") {
					text.clone()
				} else {
					format!("http://{}", text)
				};
				Ok(Value::String(format!(
					"<a href=\"{}\">{}</a>",
					escape_html(&href),
					escape_html(&text)
				)))
			}
			"boolean" => {
				let label = if is_truthy(value) {
					&self.settings.boolean_true
				} else {
					&self.settings.boolean_false
				};
				Ok(Value::String(label.clone()))
			}
			"integer" => {
				let number = numeric(value, name)?;
				Ok(Value::String(self.format_number(number.trunc(), 0)))
			}
			"decimal" => {
				let decimals = decimals_arg(format, 2)?;
				Ok(Value::String(
					self.format_number(numeric(value, name)?, decimals),
				))
			}
			"percent" => {
				let decimals = decimals_arg(format, 0)?;
				let number = numeric(value, name)? * 100.0;
				Ok(Value::String(format!(
					"{}%",
					self.format_number(number, decimals)
				)))
			}
			"date" => self.format_temporal(value, format, &self.settings.date_format),
			"datetime" => self.format_temporal(value, format, &self.settings.datetime_format),
			"time" => self.format_temporal(value, format, &self.settings.time_format),
			_ => Err(GridError::format(name, "unknown format")),
		}
	}
}

/// Escapes cell content for the `text`, `ntext`, `email` and `url` formats.
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Largest `decimals` argument accepted by the numeric formats.
const MAX_DECIMALS: u64 = 32;

// Offset and timezone specifiers cannot be rendered from a naive datetime.
fn render_pattern(datetime: &NaiveDateTime, pattern: &str) -> Option<String> {
	let mut rendered = String::new();
	write!(rendered, "{}", datetime.format(pattern)).ok()?;
	Some(rendered)
}

fn is_valid_pattern(pattern: &str) -> bool {
	render_pattern(&NaiveDateTime::default(), pattern).is_some()
}

fn scalar_text(value: &Value, format: &str) -> Result<String> {
	match value {
		Value::String(text) => Ok(text.clone()),
		Value::Number(number) => Ok(number.to_string()),
		Value::Bool(flag) => Ok(flag.to_string()),
		Value::Null => Ok(String::new()),
		other => Err(GridError::format(
			format,
			format!("expected a scalar value, got {}", other),
		)),
	}
}

fn numeric(value: &Value, format: &str) -> Result<f64> {
	let number = match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok(),
		Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
		_ => None,
	};
	number.ok_or_else(|| GridError::format(format, format!("{} is not numeric", value)))
}

fn decimals_arg(format: &Format, default: usize) -> Result<usize> {
	match format.arg(0) {
		None => Ok(default),
		Some(value) => value
			.as_u64()
			.filter(|decimals| *decimals <= MAX_DECIMALS)
			.map(|decimals| decimals as usize)
			.ok_or_else(|| {
				GridError::format(
					&format.name,
					format!(
						"decimals must be an integer between 0 and {}, got {}",
						MAX_DECIMALS, value
					),
				)
			}),
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty() && text != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
		Value::Null => false,
	}
}

fn group_thousands(digits: &str, separator: &str) -> String {
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (index, digit) in digits.chars().enumerate() {
		if index > 0 && (digits.len() - index) % 3 == 0 {
			grouped.push_str(separator);
		}
		grouped.push(digit);
	}
	grouped
}

fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
	match value {
		Value::Number(number) => {
			let seconds = number.as_i64()?;
			DateTime::from_timestamp(seconds, 0).map(|datetime| datetime.naive_utc())
		}
		Value::String(text) => {
			let text = text.trim();
			if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
				return Some(datetime.naive_local());
			}
			for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
				if let Ok(datetime) = NaiveDateTime::parse_from_str(text, pattern) {
					return Some(datetime);
				}
			}
			NaiveDate::parse_from_str(text, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn formatter() -> DefaultFormatter {
		DefaultFormatter::default()
	}

	#[rstest]
	#[case(json!(101), "raw", json!(101))]
	#[case(json!("<b>x</b>"), "text", json!("&lt;b&gt;x&lt;/b&gt;"))]
	#[case(json!("a\nb"), "ntext", json!("a<br>\nb"))]
	#[case(json!("<b>x</b>"), "html", json!("<b>x</b>"))]
	#[case(json!(1), "boolean", json!("Yes"))]
	#[case(json!("0"), "boolean", json!("No"))]
	#[case(json!(1234567.89), "integer", json!("1,234,567"))]
	#[case(json!("12.5"), "decimal", json!("12.50"))]
	#[case(json!(-1234.5), "decimal", json!("-1,234.50"))]
	#[case(json!(0.256), "percent", json!("26%"))]
	#[case(json!("2017-12-12 00:00:00"), "date", json!("2017-12-12"))]
	#[case(json!(0), "datetime", json!("1970-01-01 00:00:00"))]
	#[case(json!("2017-12-12T10:20:30+00:00"), "time", json!("10:20:30"))]
	fn test_builtin_formats(
		formatter: DefaultFormatter,
		#[case] value: Value,
		#[case] format: &str,
		#[case] expected: Value,
	) {
		assert_eq!(formatter.format(&value, &Format::new(format)).unwrap(), expected);
	}

	#[rstest]
	fn test_email_and_url(formatter: DefaultFormatter) {
		assert_eq!(
			formatter.format(&json!("a@b.c"), &Format::new("email")).unwrap(),
			json!("<a href=\"mailto:a@b.c\">a@b.c</a>")
		);
		assert_eq!(
			formatter.format(&json!("example.com"), &Format::new("url")).unwrap(),
			json!("<a href=\"http://example.com\">example.com</a>")
		);
	}

	#[rstest]
	fn test_decimal_with_explicit_decimals(formatter: DefaultFormatter) {
		let format = Format::with_args("decimal", vec![json!(3)]);
		assert_eq!(formatter.format(&json!(2), &format).unwrap(), json!("2.000"));
	}

	#[rstest]
	fn test_null_uses_null_display() {
		let formatter = DefaultFormatter::from_settings(FormatterSettings {
			null_display: json!("(not set)"),
			..FormatterSettings::default()
		})
		.unwrap();
		assert_eq!(
			formatter.format(&Value::Null, &Format::new("decimal")).unwrap(),
			json!("(not set)")
		);
	}

	#[rstest]
	#[case(json!("abc"), Format::new("decimal"))]
	#[case(json!([1, 2]), Format::new("text"))]
	#[case(json!("not a date"), Format::new("date"))]
	#[case(json!(1), Format::new("currency"))]
	#[case(json!(1), Format::with_args("decimal", vec![json!("two")]))]
	#[case(json!(0), Format::with_args("date", vec![json!("%Y-%")]))]
	#[case(json!("2017-12-12 00:00:00"), Format::with_args("date", vec![json!("%Y %z")]))]
	#[case(json!(0), Format::with_args("datetime", vec![json!("%Y-%m-%d %Z")]))]
	#[case(json!(1.5), Format::with_args("decimal", vec![json!(70000)]))]
	#[case(json!(1.5), Format::with_args("percent", vec![json!(-1)]))]
	fn test_format_errors(formatter: DefaultFormatter, #[case] value: Value, #[case] format: Format) {
		let result = formatter.format(&value, &format);
		assert!(matches!(result, Err(GridError::Format { .. })));
	}

	#[rstest]
	#[case("%Y-%")]
	#[case("%Y-%m-%d %z")]
	#[case("%Y-%m-%d %:z")]
	fn test_invalid_settings_are_rejected(#[case] date_format: &str) {
		let result = DefaultFormatter::from_settings(FormatterSettings {
			date_format: date_format.to_string(),
			..FormatterSettings::default()
		});
		assert!(matches!(result, Err(GridError::InvalidConfig(_))));
	}

	#[rstest]
	fn test_decimals_upper_bound(formatter: DefaultFormatter) {
		let format = Format::with_args("decimal", vec![json!(MAX_DECIMALS)]);
		let value = formatter.format(&json!(1), &format).unwrap();
		assert_eq!(value, json!(format!("1.{}", "0".repeat(MAX_DECIMALS as usize))));
	}

	#[rstest]
	fn test_format_serializes_to_list() {
		let format = Format::with_args("date", vec![json!("%Y")]);
		assert_eq!(serde_json::to_value(&format).unwrap(), json!(["date", "%Y"]));
		assert_eq!(serde_json::to_value(Format::default()).unwrap(), json!("raw"));
	}

	#[rstest]
	fn test_format_rejects_empty_list() {
		let result = serde_json::from_value::<Format>(json!([]));
		assert!(result.is_err());
	}

	#[rstest]
	#[case("1", "1")]
	#[case("123", "123")]
	#[case("1234", "1,234")]
	#[case("1234567", "1,234,567")]
	fn test_group_thousands(#[case] digits: &str, #[case] expected: &str) {
		assert_eq!(group_thousands(digits, ","), expected);
	}
}
