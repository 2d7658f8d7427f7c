//! Composition root for grids

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::grid::GridBuilder;
use crate::model::Model;
use crate::settings::GridSettings;

/// Monotonic counter feeding grid ids.
///
/// Clones share the same count, so every grid built from one factory gets a
/// distinct id while separate factories stay independent.
#[derive(Debug, Clone, Default)]
pub struct IdCounter(Arc<AtomicUsize>);

impl IdCounter {
	/// Creates a counter starting at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current value and advances the counter.
	pub fn next(&self) -> usize {
		self.0.fetch_add(1, Ordering::Relaxed)
	}
}

/// Hands out grid builders sharing settings and an id counter.
///
/// # Examples
///
/// ```
/// use reinhardt_grid::{ArrayDataProvider, GridFactory, GridSettings};
/// use serde_json::{Value, json};
///
/// let factory = GridFactory::new(GridSettings::default());
/// let rows = vec![json!({"id": 1})];
///
/// let first = factory.grid::<Value>()
///     .with_data_provider(ArrayDataProvider::new(rows.clone()))
///     .build()
///     .unwrap();
/// let second = factory.grid::<Value>()
///     .with_data_provider(ArrayDataProvider::new(rows))
///     .build()
///     .unwrap();
///
/// assert!(first.id().ends_with("_0"));
/// assert!(second.id().ends_with("_1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridFactory {
	settings: GridSettings,
	counter: IdCounter,
}

impl GridFactory {
	/// Creates a factory with its own id counter.
	pub fn new(settings: GridSettings) -> Self {
		Self {
			settings,
			counter: IdCounter::new(),
		}
	}

	/// Settings applied to new grids.
	pub fn settings(&self) -> &GridSettings {
		&self.settings
	}

	/// Starts a grid configured with this factory's settings.
	pub fn grid<M: Model + 'static>(&self) -> GridBuilder<M> {
		GridBuilder::new(self.settings.clone(), self.counter.clone())
	}
}
