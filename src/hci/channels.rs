//! Link-layer event queue.
//!
//! Commands reach the link-layer task wrapped in a pool-backed envelope
//! and carried over an `embassy-sync` bounded channel. The channel is
//! guarded by a critical section, so the host submission context may
//! produce while the link-layer task consumes.
//!
//! ```text
//! ┌──────────────┐   Envelope   ┌────────────────┐
//! │ host submit  │─────────────▶│ link-layer task│
//! │ (any context)│              │ (sole consumer)│
//! └──────────────┘              └────────────────┘
//! ```
//!
//! Envelopes and command buffers are handles into pool storage, so the
//! channel moves a few words per command, never the buffer bytes.
//!
//! The channel depth equals the envelope pool size: every envelope that
//! can exist fits in the queue at once.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::EVT_COUNT;
use crate::pool::Block;

use super::buffer::CommandBuffer;

/// What an envelope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `arg` holds a command buffer from the host.
    HciCommand,
}

/// Envelope record stored in the event pool.
#[derive(Debug)]
pub struct OsEvent<'a> {
    pub kind: EventKind,
    pub arg: Option<CommandBuffer<'a>>,
    /// Set by the producer at enqueue, cleared by the consumer at dequeue.
    pub queued: bool,
}

impl OsEvent<'_> {
    pub const EMPTY: Self = Self {
        kind: EventKind::HciCommand,
        arg: None,
        queued: false,
    };
}

/// Backing storage for the envelope pool.
pub type EventStorage<'a> = [OsEvent<'a>; EVT_COUNT];

/// Empty envelope pool storage, usable in a `static` initialiser.
pub const fn event_storage<'a>() -> EventStorage<'a> {
    [OsEvent::EMPTY; EVT_COUNT]
}

/// Handle to an envelope checked out of the event pool.
pub type Envelope<'a> = Block<'a, OsEvent<'a>>;

/// Multi-producer, single-consumer FIFO into the link-layer task.
pub type EventQueue<'a> = Channel<CriticalSectionRawMutex, Envelope<'a>, EVT_COUNT>;
