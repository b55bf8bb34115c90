//! Request, response, and notification messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::options::PickerOptions;

/// Browser tab identifier as it appears on the wire.
pub type TabId = i64;

/// Operation tags correlating a request sent to the picker with the
/// response describing which logical operation it belongs to.
///
/// The protocol has no message ids; the tag is the only correlation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
	/// Tab/history picker; the selection switches to a tab or opens a URL.
	#[serde(rename = "switchTab")]
	SwitchTab,
	/// Completed-downloads picker; the host acts on the path itself.
	#[serde(rename = "listDownloads")]
	ListDownloads,
	/// History picker; the selection opens in a new tab.
	#[serde(rename = "openHistory")]
	OpenHistory,
	/// Same-origin history picker; the selection replaces the active tab's
	/// location.
	#[serde(rename = "changeToPage")]
	ChangeToPage,
	/// One-way notification carrying a completed download's path.
	#[serde(rename = "copyDownload")]
	CopyDownload,
}

impl Operation {
	/// Returns the wire spelling of the tag.
	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::SwitchTab => "switchTab",
			Operation::ListDownloads => "listDownloads",
			Operation::OpenHistory => "openHistory",
			Operation::ChangeToPage => "changeToPage",
			Operation::CopyDownload => "copyDownload",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parsed from inbound `info` tags; anything outside the closed set is an
/// error the router logs and ignores.
impl FromStr for Operation {
	type Err = UnknownOperation;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"switchTab" => Ok(Operation::SwitchTab),
			"listDownloads" => Ok(Operation::ListDownloads),
			"openHistory" => Ok(Operation::OpenHistory),
			"changeToPage" => Ok(Operation::ChangeToPage),
			"copyDownload" => Ok(Operation::CopyDownload),
			_ => Err(UnknownOperation),
		}
	}
}

/// Marker error for tags outside the [`Operation`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOperation;

/// A picker invocation sent to the host.
///
/// The host renders `opts` as the filterable list, configured by the
/// `rofi-opts` flags, and replies with a [`PickerResponse`] carrying the
/// same `info` tag.
#[derive(Debug, Clone, Serialize)]
pub struct PickerRequest {
	pub info: Operation,
	pub param: PickerParam,
}

impl PickerRequest {
	pub fn new(info: Operation, options: PickerOptions, opts: Vec<String>) -> Self {
		Self {
			info,
			param: PickerParam {
				rofi_opts: options.into_flags(),
				opts,
				tab_ids: None,
			},
		}
	}

	/// Attaches the correlation payload: machine-readable tab ids aligned
	/// 1:1 with the leading rows of `opts`. Rows past the payload (history
	/// entries) are resolved by parsing their display text instead.
	pub fn with_tab_ids(mut self, ids: Vec<TabId>) -> Self {
		debug_assert!(
			ids.len() <= self.param.opts.len(),
			"tab ids must align with the leading display rows"
		);
		self.param.tab_ids = Some(ids);
		self
	}
}

/// Payload of a [`PickerRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct PickerParam {
	/// Flag/value strings configuring the picker's matching mode, prompt,
	/// and extra accept key-bindings.
	#[serde(rename = "rofi-opts")]
	pub rofi_opts: Vec<String>,
	/// Display rows, in presentation order.
	pub opts: Vec<String>,
	/// Tab ids parallel to the leading rows of `opts`, when the operation
	/// resolves selections by id.
	#[serde(rename = "tabIds", skip_serializing_if = "Option::is_none")]
	pub tab_ids: Option<Vec<TabId>>,
}

/// The host's reply to a [`PickerRequest`].
///
/// `info` is kept as a raw string: the router matches it against the
/// [`Operation`] set and ignores anything unknown rather than failing the
/// decode.
#[derive(Debug, Clone, Deserialize)]
pub struct PickerResponse {
	pub info: String,
	/// The selected row, or empty when the user cancelled.
	#[serde(default, deserialize_with = "selection")]
	pub result: String,
}

/// The host replies with the selected display string, or with the bare tab
/// id as a JSON number when the selection matched a tab row. Both decode to
/// the selection string; anything else is treated as a cancel.
fn selection<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::String(s) => s,
		Value::Number(n) => n.to_string(),
		_ => String::new(),
	})
}

/// A one-way message to the host; no response is expected or routed.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
	pub info: Operation,
	pub param: String,
}

impl Notification {
	/// "Copy this path to the clipboard" - sent when a download completes.
	pub fn copy_download(path: impl Into<String>) -> Self {
		Self {
			info: Operation::CopyDownload,
			param: path.into(),
		}
	}
}
