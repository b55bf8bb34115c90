//! Command handlers: gather browser state, build a picker request, send.

use rb_protocol::{MatchingMode, Notification, Operation, PickerOptions, PickerRequest};
use url::Url;

use crate::bridge::Bridge;
use crate::browser::{HistoryEntry, HistoryQuery, TabId};
use crate::error::Result;

/// Joins title and URL into one display row. Any title or URL containing
/// the literal separator corrupts the split on the way back - known
/// limitation of the host's line-oriented protocol.
pub(crate) const ROW_SEPARATOR: &str = " ::: ";

fn row(title: &str, url: &str) -> String {
	format!("{title}{ROW_SEPARATOR}{url}")
}

fn now_ms() -> i64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|elapsed| elapsed.as_millis() as i64)
		.unwrap_or(0)
}

impl Bridge {
	/// Open tabs first (browser order), then recent history; selections
	/// among the tab rows resolve by id via the correlation payload.
	pub(crate) async fn switch_tab(&self) -> Result<()> {
		let tabs = self.browser.tabs().await?;
		let history = self.recent_history().await?;

		let tab_ids: Vec<TabId> = tabs.iter().map(|tab| tab.id).collect();
		let mut opts: Vec<String> = tabs.iter().map(|tab| row(&tab.title, &tab.url)).collect();
		opts.extend(history.iter().map(|entry| row(&entry.title, &entry.url)));

		let request = PickerRequest::new(
			Operation::SwitchTab,
			PickerOptions::new()
				.matching(MatchingMode::Normal)
				.case_insensitive()
				.prompt("Search"),
			opts,
		)
		.with_tab_ids(tab_ids);
		self.session()?.send(&request)?;
		Ok(())
	}

	/// Downloads whose backing file still exists, newest first.
	pub(crate) async fn list_downloads(&self) -> Result<()> {
		let mut downloads: Vec<_> = self
			.browser
			.downloads()
			.await?
			.into_iter()
			.filter(|download| download.exists)
			.collect();
		downloads.sort_by(|a, b| b.started_ms.cmp(&a.started_ms));

		let request = PickerRequest::new(
			Operation::ListDownloads,
			PickerOptions::new()
				.matching(MatchingMode::Normal)
				.case_insensitive()
				.prompt("Search")
				.keybinding("-kb-accept-custom", "Shift-Return")
				.keybinding("-kb-custom-1", "Control-Return"),
			downloads
				.into_iter()
				.map(|download| download.filename)
				.collect(),
		);
		self.session()?.send(&request)?;
		Ok(())
	}

	pub(crate) async fn open_history(&self) -> Result<()> {
		let history = self.recent_history().await?;
		let request = PickerRequest::new(
			Operation::OpenHistory,
			PickerOptions::new()
				.matching(MatchingMode::Normal)
				.case_insensitive()
				.prompt("history"),
			history
				.iter()
				.map(|entry| row(&entry.title, &entry.url))
				.collect(),
		);
		self.session()?.send(&request)?;
		Ok(())
	}

	/// No picker round trip: jump straight to the previous recent slot.
	pub(crate) async fn go_to_previous_tab(&self) -> Result<()> {
		self.go_to_tab(self.recent().previous()).await
	}

	/// History entries sharing the active tab's origin, offered for
	/// in-place navigation.
	pub(crate) async fn find_on_page(&self) -> Result<()> {
		let Some(tab) = self.browser.active_tab().await? else {
			tracing::debug!("no active tab; nothing to offer");
			return Ok(());
		};
		let origin = Url::parse(&tab.url)?.origin().ascii_serialization();
		let history = self.recent_history().await?;

		let request = PickerRequest::new(
			Operation::ChangeToPage,
			PickerOptions::new()
				.matching(MatchingMode::Normal)
				.case_insensitive()
				.prompt("page"),
			history
				.iter()
				.filter(|entry| entry.url.starts_with(&origin))
				.map(|entry| row(&entry.title, &entry.url))
				.collect(),
		);
		self.session()?.send(&request)?;
		Ok(())
	}

	/// The activation sequence: look the tab up, raise its window, then
	/// make the tab active and highlighted.
	pub(crate) async fn go_to_tab(&self, id: TabId) -> Result<()> {
		let tab = self.browser.tab(id).await?;
		self.browser.focus_window(tab.window_id).await?;
		self.browser.activate_tab(id).await?;
		Ok(())
	}

	pub(crate) async fn announce_download(&self, id: i64) -> Result<()> {
		let Some(download) = self.browser.download(id).await? else {
			return Ok(());
		};
		if !download.exists {
			return Ok(());
		}
		self.session()?
			.send(&Notification::copy_download(download.filename))?;
		Ok(())
	}

	async fn recent_history(&self) -> Result<Vec<HistoryEntry>> {
		let window_ms = self.config.history_window.as_millis() as i64;
		let query = HistoryQuery {
			text: String::new(),
			start_time_ms: now_ms().saturating_sub(window_ms),
			max_results: self.config.history_max_results,
		};
		Ok(self.browser.history(query).await?)
	}
}
