//! Session lifecycle over the framed transport.
//!
//! A [`Session`] is one live connection to the picker host. It owns the
//! outbound queue feeding a single writer task (which is what makes each
//! `send` atomic at the frame level) and a reader side that decodes inbound
//! frames into [`PickerResponse`]s. When the host goes away the closed flag
//! flips, the response stream ends, and every further `send` fails fast
//! with [`Error::ChannelClosed`] instead of blocking or silently dropping.
//!
//! Reconnection is not automatic: a disconnected session stays dead and the
//! embedding process has to build a new transport and session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rb_protocol::PickerResponse;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::transport::PipeTransport;

/// One live channel to the picker host.
pub struct Session {
	outbound_tx: mpsc::UnboundedSender<Value>,
	closed: Arc<AtomicBool>,
}

impl Session {
	/// Spawns the writer and reader tasks over the transport and returns
	/// the session handle plus the stream of decoded host responses.
	///
	/// The response stream ending is the disconnect notification; it ends
	/// exactly once, after which [`send`](Session::send) fails fast.
	pub fn start(
		transport: PipeTransport,
		frames: mpsc::UnboundedReceiver<Value>,
	) -> (Arc<Session>, mpsc::UnboundedReceiver<PickerResponse>) {
		let (mut sender, receiver) = transport.into_parts();
		let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Value>();
		let (response_tx, response_rx) = mpsc::unbounded_channel::<PickerResponse>();
		let closed = Arc::new(AtomicBool::new(false));

		let writer_closed = Arc::clone(&closed);
		tokio::spawn(async move {
			while let Some(message) = outbound_rx.recv().await {
				if let Err(err) = sender.send(message).await {
					tracing::error!(%err, "transport write failed");
					writer_closed.store(true, Ordering::SeqCst);
					break;
				}
			}
		});

		tokio::spawn(async move {
			match receiver.run().await {
				Ok(()) => tracing::debug!("picker host disconnected"),
				Err(err) => tracing::error!(%err, "transport read failed"),
			}
		});

		let decode_closed = Arc::clone(&closed);
		tokio::spawn(async move {
			let mut frames = frames;
			while let Some(frame) = frames.recv().await {
				match serde_json::from_value::<PickerResponse>(frame) {
					Ok(response) => {
						let _ = response_tx.send(response);
					}
					Err(err) => tracing::warn!(%err, "dropping malformed host message"),
				}
			}
			// The frame stream only ends when the reader is done, so this is
			// the disconnect point. Flip the flag before response_tx drops:
			// whoever observes the stream end must also see sends fail.
			decode_closed.store(true, Ordering::SeqCst);
		});

		let session = Arc::new(Session {
			outbound_tx,
			closed,
		});
		(session, response_rx)
	}

	/// Queues one message for the writer task.
	///
	/// Fails fast with [`Error::ChannelClosed`] once the connection is
	/// gone.
	pub fn send<T: Serialize>(&self, message: &T) -> Result<()> {
		if self.is_closed() {
			return Err(Error::ChannelClosed);
		}
		let value = serde_json::to_value(message)?;
		self.outbound_tx
			.send(value)
			.map_err(|_| Error::ChannelClosed)
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}

/// Process-wide nullable reference to the live session.
///
/// Handlers fetch the session through the slot at send time; clearing the
/// slot on disconnect is what lets in-flight handlers detect the teardown
/// and abort instead of crashing.
#[derive(Clone, Default)]
pub struct SessionSlot {
	inner: Arc<Mutex<Option<Arc<Session>>>>,
}

impl SessionSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs the live session.
	pub fn set(&self, session: Arc<Session>) {
		*self.inner.lock() = Some(session);
	}

	/// Drops the session reference; subsequent [`get`](SessionSlot::get)
	/// calls return `None` until a new session is installed.
	pub fn clear(&self) {
		*self.inner.lock() = None;
	}

	pub fn get(&self) -> Option<Arc<Session>> {
		self.inner.lock().clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

	fn start_session() -> (
		Arc<Session>,
		mpsc::UnboundedReceiver<PickerResponse>,
		tokio::io::DuplexStream,
		tokio::io::DuplexStream,
	) {
		// host_rx sees what the session writes; host_tx feeds the session.
		let (host_rx, bridge_write) = duplex(4096);
		let (bridge_read, host_tx) = duplex(4096);
		let (transport, frames) = PipeTransport::new(bridge_write, bridge_read);
		let (session, responses) = Session::start(transport, frames);
		(session, responses, host_rx, host_tx)
	}

	async fn host_write(host_tx: &mut tokio::io::DuplexStream, message: &serde_json::Value) {
		let body = serde_json::to_vec(message).unwrap();
		host_tx
			.write_all(&(body.len() as u32).to_le_bytes())
			.await
			.unwrap();
		host_tx.write_all(&body).await.unwrap();
	}

	#[tokio::test]
	async fn send_reaches_the_host() {
		let (session, _responses, mut host_rx, _host_tx) = start_session();

		session
			.send(&json!({"info": "copyDownload", "param": "/tmp/f"}))
			.unwrap();

		let mut len_buf = [0u8; 4];
		host_rx.read_exact(&mut len_buf).await.unwrap();
		let mut body = vec![0u8; u32::from_le_bytes(len_buf) as usize];
		host_rx.read_exact(&mut body).await.unwrap();
		let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(value["info"], "copyDownload");
	}

	#[tokio::test]
	async fn responses_are_decoded_in_order() {
		let (_session, mut responses, _host_rx, mut host_tx) = start_session();

		host_write(&mut host_tx, &json!({"info": "switchTab", "result": 3})).await;
		host_write(&mut host_tx, &json!({"info": "openHistory", "result": "t ::: u"})).await;

		let first = responses.recv().await.unwrap();
		assert_eq!((first.info.as_str(), first.result.as_str()), ("switchTab", "3"));
		let second = responses.recv().await.unwrap();
		assert_eq!(second.result, "t ::: u");
	}

	#[tokio::test]
	async fn malformed_message_is_dropped_not_fatal() {
		let (_session, mut responses, _host_rx, mut host_tx) = start_session();

		// An array is a valid frame but not a valid response message.
		host_write(&mut host_tx, &json!(["nope"])).await;
		host_write(&mut host_tx, &json!({"info": "switchTab", "result": "5"})).await;

		assert_eq!(responses.recv().await.unwrap().result, "5");
	}

	#[tokio::test]
	async fn disconnect_ends_stream_and_fails_sends() {
		let (session, mut responses, _host_rx, host_tx) = start_session();

		drop(host_tx);
		assert!(responses.recv().await.is_none());

		// The reader observed EOF, so the closed flag is set by now.
		assert!(session.is_closed());
		let err = session.send(&json!({"info": "openHistory"})).unwrap_err();
		assert!(err.is_disconnect());
	}

	#[tokio::test]
	async fn slot_clears_to_none() {
		let (session, _responses, _host_rx, _host_tx) = start_session();
		let slot = SessionSlot::new();

		assert!(slot.get().is_none());
		slot.set(session);
		assert!(slot.get().is_some());
		slot.clear();
		assert!(slot.get().is_none());
	}
}
