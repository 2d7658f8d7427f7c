//! Error types for the grid module.

use thiserror::Error;

/// Errors that can occur while configuring or rendering a grid.
#[derive(Debug, Error)]
pub enum GridError {
	/// The grid, a column or the formatter is misconfigured.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// A renderer entry point was called with unusable arguments.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// A value could not be formatted with the requested format.
	#[error("Format error: {format}: {message}")]
	Format {
		/// Name of the format that failed.
		format: String,
		/// Reason reported by the formatter.
		message: String,
	},

	/// TOML settings could not be deserialized.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON settings or column configuration could not be deserialized.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl GridError {
	/// Shorthand for [`GridError::Format`].
	pub fn format(format: impl Into<String>, message: impl Into<String>) -> Self {
		GridError::Format {
			format: format.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
