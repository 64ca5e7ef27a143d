//! Controller statistics.
//!
//! Counters are written only by the link-layer task and may be read from
//! anywhere. With a single writer, increment is a plain load + store, so
//! targets without atomic read-modify-write (e.g. Cortex-M0) work too.
//!
//! [`StatsSnapshot`] is the serialisable form handed to whatever
//! diagnostics channel the embedder runs.

use core::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct Statistics {
    hci_cmds: AtomicU32,
    hci_cmd_errs: AtomicU32,
    hci_events_sent: AtomicU32,
}

fn bump(counter: &AtomicU32) {
    counter.store(counter.load(Ordering::Relaxed).wrapping_add(1), Ordering::Relaxed);
}

impl Statistics {
    pub const fn new() -> Self {
        Self {
            hci_cmds: AtomicU32::new(0),
            hci_cmd_errs: AtomicU32::new(0),
            hci_events_sent: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_command(&self) {
        bump(&self.hci_cmds);
    }

    pub(crate) fn record_command_error(&self) {
        bump(&self.hci_cmd_errs);
    }

    pub(crate) fn record_event_sent(&self) {
        bump(&self.hci_events_sent);
    }

    /// Commands that completed with status success.
    pub fn commands(&self) -> u32 {
        self.hci_cmds.load(Ordering::Relaxed)
    }

    /// Commands that completed with any non-success status.
    pub fn command_errors(&self) -> u32 {
        self.hci_cmd_errs.load(Ordering::Relaxed)
    }

    pub fn events_sent(&self) -> u32 {
        self.hci_events_sent.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hci_cmds: self.commands(),
            hci_cmd_errs: self.command_errors(),
            hci_events_sent: self.events_sent(),
        }
    }
}

/// Point-in-time copy of [`Statistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub hci_cmds: u32,
    pub hci_cmd_errs: u32,
    pub hci_events_sent: u32,
}

impl StatsSnapshot {
    /// postcard-encode into `buf`; `None` if it does not fit.
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Option<&'b mut [u8]> {
        postcard::to_slice(self, buf).ok()
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        postcard::from_bytes(bytes).ok()
    }
}
