//! Error types for the bridge.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A failed capability call into the browser.
///
/// The browser's subsystems fail independently of the bridge and report
/// whatever they report; the bridge only ever logs the message and aborts
/// the current handler, so an opaque string is the whole contract.
#[derive(Debug, Clone, Error)]
#[error("browser error: {0}")]
pub struct BrowserError(String);

impl BrowserError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// Errors that abort a single command or response handler.
#[derive(Debug, Error)]
pub enum Error {
	/// A browser query or action failed.
	#[error(transparent)]
	Browser(#[from] BrowserError),

	/// The channel to the picker host failed.
	#[error(transparent)]
	Channel(#[from] rb_runtime::Error),

	/// No live session; the host is gone until an external restart.
	#[error("picker host not connected")]
	NotConnected,

	/// The active tab's URL did not parse, so its origin is unknowable.
	#[error("invalid page url: {0}")]
	PageUrl(#[from] url::ParseError),
}
