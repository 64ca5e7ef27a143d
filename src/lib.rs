//! HCI command-processing core for a BLE link-layer controller.
//!
//! The host submits raw command buffers; the link-layer task dequeues
//! them, dispatches by opcode, runs the handler, rewrites the same block
//! in place as a command-complete event and hands it to the send path
//! before returning both blocks to their pools.
//!
//! ```text
//!  host ──▶ HciTransport::host_cmd_send ──▶ [ queue ] ──▶ LinkLayer::process
//!                                                              │
//!                 pools ◀── release ◀── HciEventSink ◀── engine::dispatch
//! ```
//!
//! No heap is used: command buffers and envelopes come from fixed-size
//! block pools sized in [`config`].

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod hci;
pub mod pool;

mod error;

pub use controller::log_sink::LogEventSink;
pub use controller::{HciTransport, LinkLayer};
pub use error::{EncodeError, Error, PoolError, Result, SubmitError};
pub use hci::status::Status;
