//! Browser-to-picker bridge.
//!
//! The bridge sits between a browser's runtime state (open tabs, history,
//! downloads) and an external picker process reached over a framed byte
//! channel. Browser events and hotkey commands flow in, picker requests
//! flow out, and the user's selection flows back to be acted on: switch to
//! a tab, open a URL, or navigate the current page.
//!
//! # Pieces
//!
//! - [`browser::Browser`] - the consumed capability set, implemented by the
//!   embedding process
//! - [`input::classify`] - turns freeform picker input into a navigable URL
//! - [`state::RecentTabs`] - the two most recently activated tabs
//! - [`bridge::Bridge`] - the context object wiring command dispatch and
//!   response routing to a [`rb_runtime::Session`]
//!
//! The bridge never retries and never surfaces errors to the user: a failed
//! browser query or a dead channel aborts the one handler involved, and the
//! event listeners keep running.

pub mod bridge;
pub mod browser;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod state;

mod dispatch;
mod router;

pub use bridge::Bridge;
pub use browser::{
	Browser, BrowserResult, Download, DownloadDelta, DownloadState, HistoryEntry, HistoryQuery,
	Tab, TabId,
};
pub use command::Command;
pub use config::Config;
pub use error::{BrowserError, Error, Result};
pub use input::{ClassifiedInput, classify};
pub use state::{NO_TAB, RecentTabs};
