//! Framed pipe transport.
//!
//! Messages are framed the way the native-messaging pipe expects them: a
//! 4-byte little-endian byte length followed by that many bytes of UTF-8
//! JSON. One frame in, one message out; frames are never interleaved or
//! reordered because each half is driven by a single task.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Duplex framed transport over a byte pipe.
///
/// Split with [`into_parts`](PipeTransport::into_parts): the sender half
/// writes one frame per [`send`](PipeTransportSender::send), the receiver
/// half decodes inbound frames onto the channel returned by
/// [`new`](PipeTransport::new).
pub struct PipeTransport {
	sender: PipeTransportSender,
	receiver: PipeTransportReceiver,
}

impl PipeTransport {
	/// Creates a transport over a writer/reader pair (in production the
	/// native-messaging stdio pipes, in tests a `tokio::io::duplex` pair).
	/// Returns the transport and the stream of decoded inbound messages.
	pub fn new<W, R>(writer: W, reader: R) -> (Self, mpsc::UnboundedReceiver<Value>)
	where
		W: AsyncWrite + Send + Unpin + 'static,
		R: AsyncRead + Send + Unpin + 'static,
	{
		let (tx, rx) = mpsc::unbounded_channel();
		let transport = Self {
			sender: PipeTransportSender {
				writer: Box::new(writer),
			},
			receiver: PipeTransportReceiver {
				reader: Box::new(reader),
				tx,
			},
		};
		(transport, rx)
	}

	/// Splits into independently-driven halves.
	pub fn into_parts(self) -> (PipeTransportSender, PipeTransportReceiver) {
		(self.sender, self.receiver)
	}
}

/// Write half: one frame per send, flushed before returning.
pub struct PipeTransportSender {
	writer: Box<dyn AsyncWrite + Send + Unpin>,
}

impl PipeTransportSender {
	/// Serializes and writes one message as a single frame.
	pub async fn send(&mut self, message: Value) -> Result<()> {
		let body = serde_json::to_vec(&message)?;
		let len = u32::try_from(body.len())
			.map_err(|_| Error::Transport(format!("frame too large: {} bytes", body.len())))?;
		self.writer.write_all(&len.to_le_bytes()).await?;
		self.writer.write_all(&body).await?;
		self.writer.flush().await?;
		Ok(())
	}
}

/// Read half: drives the inbound frame loop.
pub struct PipeTransportReceiver {
	reader: Box<dyn AsyncRead + Send + Unpin>,
	tx: mpsc::UnboundedSender<Value>,
}

impl PipeTransportReceiver {
	/// Reads frames until the peer closes the pipe (clean end, `Ok`) or an
	/// I/O error occurs. A frame whose body is not valid JSON is logged and
	/// skipped; the length prefix keeps the stream in sync.
	pub async fn run(mut self) -> Result<()> {
		loop {
			let mut len_buf = [0u8; 4];
			match self.reader.read_exact(&mut len_buf).await {
				Ok(_) => {}
				Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
					tracing::debug!("pipe closed by peer");
					return Ok(());
				}
				Err(err) => return Err(err.into()),
			}

			let len = u32::from_le_bytes(len_buf) as usize;
			let mut body = vec![0u8; len];
			self.reader.read_exact(&mut body).await?;

			match serde_json::from_slice::<Value>(&body) {
				Ok(message) => {
					if self.tx.send(message).is_err() {
						// Consumer is gone; nothing left to deliver to.
						return Ok(());
					}
				}
				Err(err) => tracing::warn!(%err, "dropping undecodable frame"),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

	async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Value {
		let mut len_buf = [0u8; 4];
		reader.read_exact(&mut len_buf).await.unwrap();
		let mut body = vec![0u8; u32::from_le_bytes(len_buf) as usize];
		reader.read_exact(&mut body).await.unwrap();
		serde_json::from_slice(&body).unwrap()
	}

	async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, message: &Value) {
		let body = serde_json::to_vec(message).unwrap();
		writer
			.write_all(&(body.len() as u32).to_le_bytes())
			.await
			.unwrap();
		writer.write_all(&body).await.unwrap();
		writer.flush().await.unwrap();
	}

	#[test]
	fn length_prefix_is_little_endian() {
		// Must match the host's struct.pack("I", ...) framing.
		let length: u32 = 0x0102_0304;
		assert_eq!(length.to_le_bytes(), [0x04, 0x03, 0x02, 0x01]);
	}

	#[tokio::test]
	async fn send_writes_one_frame() {
		let (mut our_end, their_end) = duplex(1024);
		let (_unused_read, _unused_write) = duplex(1024);
		let (transport, _rx) = PipeTransport::new(their_end, _unused_read);
		let (mut sender, _receiver) = transport.into_parts();

		let message = json!({"info": "openHistory", "param": {"opts": ["a"]}});
		sender.send(message.clone()).await.unwrap();

		assert_eq!(read_frame(&mut our_end).await, message);
	}

	#[tokio::test]
	async fn frames_arrive_in_order() {
		let (host_end, bridge_end) = duplex(4096);
		let (_unused, sink) = duplex(64);
		let (transport, mut rx) = PipeTransport::new(sink, bridge_end);
		let (_sender, receiver) = transport.into_parts();
		let task = tokio::spawn(receiver.run());

		let messages = vec![
			json!({"info": "switchTab", "result": 1}),
			json!({"info": "switchTab", "result": "g rust"}),
			json!({"info": "openHistory", "result": ""}),
		];
		let mut host_end = host_end;
		for message in &messages {
			write_frame(&mut host_end, message).await;
		}

		for expected in &messages {
			assert_eq!(&rx.recv().await.unwrap(), expected);
		}

		drop(host_end);
		task.await.unwrap().unwrap();
	}

	#[tokio::test]
	async fn undecodable_frame_is_skipped() {
		let (mut host_end, bridge_end) = duplex(1024);
		let (_unused, sink) = duplex(64);
		let (transport, mut rx) = PipeTransport::new(sink, bridge_end);
		let (_sender, receiver) = transport.into_parts();
		let task = tokio::spawn(receiver.run());

		let garbage = b"not json";
		host_end
			.write_all(&(garbage.len() as u32).to_le_bytes())
			.await
			.unwrap();
		host_end.write_all(garbage).await.unwrap();
		write_frame(&mut host_end, &json!({"info": "openHistory", "result": "x"})).await;

		// The garbage frame is dropped; the next frame still arrives.
		assert_eq!(rx.recv().await.unwrap()["result"], "x");

		drop(host_end);
		task.await.unwrap().unwrap();
	}

	#[tokio::test]
	async fn large_frame_roundtrips() {
		let (host_end, bridge_end) = duplex(1024 * 1024);
		let (_unused, sink) = duplex(64);
		let (transport, mut rx) = PipeTransport::new(sink, bridge_end);
		let (_sender, receiver) = transport.into_parts();
		let task = tokio::spawn(receiver.run());

		let rows: Vec<String> = (0..5000)
			.map(|i| format!("History entry number {i} ::: https://example.com/page/{i}"))
			.collect();
		let message = json!({"info": "switchTab", "param": {"opts": rows}});
		let mut host_end = host_end;
		write_frame(&mut host_end, &message).await;

		assert_eq!(rx.recv().await.unwrap(), message);

		drop(host_end);
		task.await.unwrap().unwrap();
	}

	#[tokio::test]
	async fn peer_close_ends_run_cleanly() {
		let (host_end, bridge_end) = duplex(256);
		let (_unused, sink) = duplex(64);
		let (transport, mut rx) = PipeTransport::new(sink, bridge_end);
		let (_sender, receiver) = transport.into_parts();

		drop(host_end);
		receiver.run().await.unwrap();
		assert!(rx.recv().await.is_none());
	}
}
