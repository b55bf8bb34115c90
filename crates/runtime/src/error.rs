//! Error types for the picker channel.

use thiserror::Error;

/// Result type alias for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur on the channel to the picker host.
#[derive(Debug, Error)]
pub enum Error {
	/// The connection is gone; the bridge is inert until the surrounding
	/// process restarts it.
	#[error("channel closed")]
	ChannelClosed,

	/// Frame-level failure that is not a plain I/O error.
	#[error("transport error: {0}")]
	Transport(String),

	/// I/O error on the underlying pipe.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A frame body failed to serialize or deserialize.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Returns true if the channel is unusable and callers should stop
	/// sending rather than retry.
	pub fn is_disconnect(&self) -> bool {
		matches!(self, Error::ChannelClosed)
	}
}
