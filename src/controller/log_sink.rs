//! Log-based event sink.
//!
//! Implements [`HciEventSink`] by decoding each outbound event and
//! writing it to the `log` facade. Useful during bring-up, before a real
//! transport to the host exists.

use log::debug;

use crate::hci::codec::CommandComplete;

use super::ports::HciEventSink;

/// Sink that logs every event and counts what it saw.
#[derive(Debug, Default)]
pub struct LogEventSink {
    sent: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events passed to [`send`](HciEventSink::send) so far.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl HciEventSink for LogEventSink {
    fn send(&mut self, event: &[u8]) {
        self.sent = self.sent.wrapping_add(1);
        match CommandComplete::parse(event) {
            Some(cc) => debug!(
                "EVT | cmd_complete | opcode=0x{:04X} (ogf=0x{:02X} ocf=0x{:03X}) | status={} | credit={} | rsp={:02X?}",
                cc.opcode.0,
                cc.opcode.ogf(),
                cc.opcode.ocf(),
                cc.status,
                cc.num_cmd_pkts,
                cc.return_params,
            ),
            None => debug!("EVT | raw | {:02X?}", event),
        }
    }
}
