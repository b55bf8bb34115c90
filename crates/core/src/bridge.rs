//! The bridge context object.
//!
//! One [`Bridge`] per process: it owns the browser handle, the config, the
//! recent-tab pair, and the nullable session slot. Every event entry point
//! logs and swallows handler failures so that one broken round trip never
//! takes the event listeners down with it.

use std::sync::Arc;

use rb_protocol::PickerResponse;
use rb_runtime::{Session, SessionSlot};
use tokio::sync::mpsc;

use crate::browser::{Browser, DownloadDelta, DownloadState, TabId};
use crate::command::Command;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::RecentTabs;

pub struct Bridge {
	pub(crate) browser: Arc<dyn Browser>,
	pub(crate) config: Config,
	recent: RecentTabs,
	slot: SessionSlot,
}

impl Bridge {
	pub fn new(browser: Arc<dyn Browser>, config: Config) -> Self {
		Self {
			browser,
			config,
			recent: RecentTabs::new(),
			slot: SessionSlot::new(),
		}
	}

	/// Installs a live session; commands can send picker requests again.
	pub fn connect(&self, session: Arc<Session>) {
		self.slot.set(session);
	}

	/// Clears the session slot. In-flight handlers observe the empty slot
	/// and abort their send instead of crashing.
	pub fn disconnect(&self) {
		self.slot.clear();
	}

	/// The live session, or [`Error::NotConnected`] once the host is gone.
	pub(crate) fn session(&self) -> Result<Arc<Session>> {
		self.slot.get().ok_or(Error::NotConnected)
	}

	/// Whether a live session is installed.
	pub fn is_connected(&self) -> bool {
		self.slot.get().is_some()
	}

	/// The recent-tab tracker; fed by [`on_tab_activated`](Bridge::on_tab_activated).
	pub fn recent(&self) -> &RecentTabs {
		&self.recent
	}

	/// Tab-activation event: shift the recent pair.
	pub fn on_tab_activated(&self, id: TabId) {
		self.recent.on_activated(id);
	}

	/// Command trigger from a hotkey or companion process.
	///
	/// A failed collaborator query or a dead channel aborts just this
	/// handler; there is no retry and no user-facing error surface.
	pub async fn on_command(&self, command: Command) {
		let outcome = match command {
			Command::SwitchTab => self.switch_tab().await,
			Command::ListDownloads => self.list_downloads().await,
			Command::OpenHistory => self.open_history().await,
			Command::GoToPreviousTab => self.go_to_previous_tab().await,
			Command::FindOnPage => self.find_on_page().await,
		};
		if let Err(err) = outcome {
			tracing::warn!(command = command.as_str(), %err, "command handler aborted");
		}
	}

	/// Download-state-change event; completed downloads are announced to
	/// the host on the copy-download side channel.
	pub async fn on_download_changed(&self, delta: DownloadDelta) {
		if delta.state != Some(DownloadState::Complete) {
			return;
		}
		if let Err(err) = self.announce_download(delta.id).await {
			tracing::warn!(download = delta.id, %err, "copy-download aborted");
		}
	}

	/// Drives the response loop for one session: attach, route every host
	/// response, detach when the stream ends (disconnect).
	pub async fn run(
		&self,
		session: Arc<Session>,
		mut responses: mpsc::UnboundedReceiver<PickerResponse>,
	) {
		self.connect(session);
		while let Some(response) = responses.recv().await {
			self.on_response(response).await;
		}
		self.disconnect();
		tracing::info!("picker host disconnected; bridge inert until restarted");
	}
}
