//! The browser capability set the bridge consumes.
//!
//! Everything the bridge knows about tabs, windows, history, and downloads
//! goes through [`Browser`]. The embedding process implements it against
//! whatever the actual browser exposes; tests implement it with canned
//! data. Every call is async and may fail independently of the bridge -
//! the failure policy (log, abort the current handler, never retry) lives
//! with the callers.

use async_trait::async_trait;

use crate::error::BrowserError;

/// Browser tab identifier; re-exported from the wire types since tab ids
/// travel in picker requests.
pub type TabId = rb_protocol::TabId;

pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// An open tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
	pub id: TabId,
	pub window_id: i64,
	pub title: String,
	pub url: String,
}

/// One visited page from the browser's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	pub title: String,
	pub url: String,
}

/// Parameters for a history query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
	/// Free-text filter; empty matches everything.
	pub text: String,
	/// Only entries visited at or after this epoch-millisecond timestamp.
	pub start_time_ms: i64,
	/// Result cap.
	pub max_results: usize,
}

/// A download the browser knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
	pub id: i64,
	/// Absolute path of the downloaded file.
	pub filename: String,
	/// Whether the backing file still exists on disk, as reported by the
	/// browser.
	pub exists: bool,
	/// Download start time, epoch milliseconds.
	pub started_ms: i64,
}

/// Lifecycle state of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
	InProgress,
	Complete,
	Interrupted,
}

/// What changed about a download, as delivered by the browser's
/// download-state-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadDelta {
	pub id: i64,
	/// The new state, when the state is what changed.
	pub state: Option<DownloadState>,
}

/// Async capability calls into the browser.
#[async_trait]
pub trait Browser: Send + Sync {
	/// All open tabs across all windows, in browser-reported order.
	async fn tabs(&self) -> BrowserResult<Vec<Tab>>;

	/// One tab by id; fails if the tab is gone.
	async fn tab(&self, id: TabId) -> BrowserResult<Tab>;

	/// The active tab of the current window, if any.
	async fn active_tab(&self) -> BrowserResult<Option<Tab>>;

	/// Brings a window to the front.
	async fn focus_window(&self, window_id: i64) -> BrowserResult<()>;

	/// Makes a tab active and highlighted within its window.
	async fn activate_tab(&self, id: TabId) -> BrowserResult<()>;

	/// Opens a URL in a new tab.
	async fn create_tab(&self, url: &str) -> BrowserResult<()>;

	/// Replaces an existing tab's location in place.
	async fn navigate_tab(&self, id: TabId, url: &str) -> BrowserResult<()>;

	/// History entries matching the query, in collaborator-reported order.
	async fn history(&self, query: HistoryQuery) -> BrowserResult<Vec<HistoryEntry>>;

	/// All downloads the browser knows about.
	async fn downloads(&self) -> BrowserResult<Vec<Download>>;

	/// One download by id, if the browser still tracks it.
	async fn download(&self, id: i64) -> BrowserResult<Option<Download>>;
}
