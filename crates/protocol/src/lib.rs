//! Wire types for the picker protocol.
//!
//! This crate contains the serde-serializable types exchanged with the
//! picker host over the framed byte channel. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization and
//!   light builders
//! - **1:1 with the wire**: Field names and tag spellings match what the
//!   picker host reads and writes
//! - **Stable**: Changes only when the wire protocol changes
//!
//! The bridge logic that produces and consumes these types lives in
//! `rb-bridge`.

pub mod message;
pub mod options;

pub use message::*;
pub use options::*;
