//! Response routing: turn a picker selection into a browser side effect.
//!
//! The inverse of the dispatcher. Responses correlate by operation tag
//! only; empty selections (cancel) and unknown tags are no-ops, and a
//! selection that fails to parse the expected way falls back to the
//! free-text path rather than erroring.

use rb_protocol::{Operation, PickerResponse};

use crate::bridge::Bridge;
use crate::browser::TabId;
use crate::dispatch::ROW_SEPARATOR;
use crate::error::Result;
use crate::input::classify;

/// Literal marker the host prepends when the user typed free text that
/// matched no row: "go/navigate to what follows".
const GO_PREFIX: &str = "g ";

/// Pulls the URL out of a `<title> ::: <url>` composite row.
fn composite_url(selection: &str) -> &str {
	selection.rsplit(ROW_SEPARATOR).next().unwrap_or(selection)
}

impl Bridge {
	/// Routes one host response. Never fails the caller: handler errors
	/// are logged and dropped here.
	pub async fn on_response(&self, response: PickerResponse) {
		if response.result.is_empty() {
			tracing::debug!(info = %response.info, "picker cancelled");
			return;
		}

		let outcome = match response.info.parse::<Operation>() {
			Ok(Operation::SwitchTab) => self.resolve_switch_tab(&response.result).await,
			Ok(Operation::OpenHistory) => self.resolve_open_history(&response.result).await,
			Ok(Operation::ChangeToPage) => self.resolve_change_to_page(&response.result).await,
			Ok(operation) => {
				tracing::debug!(info = %operation, "operation has no response route");
				Ok(())
			}
			Err(_) => {
				tracing::debug!(info = %response.info, "unknown operation tag ignored");
				Ok(())
			}
		};
		if let Err(err) = outcome {
			tracing::warn!(info = %response.info, %err, "response handler aborted");
		}
	}

	/// An integer selection is a tab id from the correlation payload; free
	/// text is either a "g "-marked query to classify or a URL the host
	/// already extracted from a history row.
	async fn resolve_switch_tab(&self, selection: &str) -> Result<()> {
		if let Ok(id) = selection.parse::<TabId>() {
			return self.go_to_tab(id).await;
		}

		if let Some(input) = selection.strip_prefix(GO_PREFIX) {
			let url = classify(input).navigable_url(&self.config.search_url);
			self.browser.create_tab(&url).await?;
		} else {
			self.browser.create_tab(selection).await?;
		}
		Ok(())
	}

	async fn resolve_open_history(&self, selection: &str) -> Result<()> {
		let url = classify(composite_url(selection)).navigable_url(&self.config.search_url);
		self.browser.create_tab(&url).await?;
		Ok(())
	}

	/// Same resolution as open-history, but the active tab's location is
	/// replaced instead of opening a new tab.
	async fn resolve_change_to_page(&self, selection: &str) -> Result<()> {
		let Some(tab) = self.browser.active_tab().await? else {
			tracing::debug!("no active tab to navigate");
			return Ok(());
		};
		let url = classify(composite_url(selection)).navigable_url(&self.config.search_url);
		self.browser.navigate_tab(tab.id, &url).await?;
		Ok(())
	}
}
