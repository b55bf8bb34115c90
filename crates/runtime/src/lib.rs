//! Runtime infrastructure for talking to the picker host.
//!
//! This crate owns the single duplex byte channel to the host process:
//!
//! - **Transport**: length-prefixed JSON frames over a pipe
//! - **Session**: writer/reader tasks, fail-fast sends after disconnect
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  rb-bridge  │  Dispatcher / response router
//! └──────┬──────┘
//!        │ send() / response stream
//! ┌──────▼──────┐
//! │ rb-runtime  │  This crate
//! │  ┌────────┐ │
//! │  │Session │ │  Outbound queue, closed flag, decode
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Trans  │ │  Frame codec over stdio pipes
//! │  └────────┘ │
//! └─────────────┘
//! ```
//!
//! There is no request-id correlation: the picker protocol tags messages
//! with an operation name and the host presents one picker at a time, so
//! the session just forwards decoded responses in arrival order.

pub mod error;
pub mod session;
pub mod transport;

pub use error::{Error, Result};
pub use session::{Session, SessionSlot};
pub use transport::{PipeTransport, PipeTransportReceiver, PipeTransportSender};
