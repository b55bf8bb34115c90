//! Bridge configuration: defaults with environment overrides.

use std::time::Duration;

/// Search engine prefix freeform queries are appended to.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// How far back history queries reach.
pub const DEFAULT_HISTORY_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Cap on history results per query.
pub const DEFAULT_HISTORY_MAX_RESULTS: usize = 5000;

/// Runtime configuration for the bridge.
#[derive(Debug, Clone)]
pub struct Config {
	/// Search URL prefix; the percent-encoded query is appended.
	pub search_url: String,
	/// History queries cover `now - history_window .. now`.
	pub history_window: Duration,
	/// Result cap passed to history queries.
	pub history_max_results: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			search_url: DEFAULT_SEARCH_URL.to_owned(),
			history_window: DEFAULT_HISTORY_WINDOW,
			history_max_results: DEFAULT_HISTORY_MAX_RESULTS,
		}
	}
}

impl Config {
	/// Builds a config from the environment:
	///
	/// - `RB_SEARCH_URL` - search engine prefix
	/// - `RB_HISTORY_WINDOW_DAYS` - history window in days
	/// - `RB_HISTORY_MAX_RESULTS` - history result cap
	///
	/// Unparseable values are logged and fall back to the default.
	pub fn from_env() -> Self {
		Self::from_vars(|key| std::env::var(key).ok())
	}

	fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Config::default();

		if let Some(url) = get("RB_SEARCH_URL") {
			config.search_url = url;
		}

		if let Some(days) = get("RB_HISTORY_WINDOW_DAYS") {
			match days.parse::<u64>() {
				Ok(days) => config.history_window = Duration::from_secs(days * 24 * 60 * 60),
				Err(_) => {
					tracing::warn!(value = %days, "RB_HISTORY_WINDOW_DAYS is not a number; using default")
				}
			}
		}

		if let Some(max) = get("RB_HISTORY_MAX_RESULTS") {
			match max.parse::<usize>() {
				Ok(max) => config.history_max_results = max,
				Err(_) => {
					tracing::warn!(value = %max, "RB_HISTORY_MAX_RESULTS is not a number; using default")
				}
			}
		}

		config
	}
}
