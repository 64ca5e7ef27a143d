//! Mock link-layer collaborators for integration tests.
//!
//! Records every advertising / scanning call so tests can assert on the
//! full history, and captures every event the controller sends.

use llhci::controller::ports::{Advertiser, HciEventSink, Scanner};
use llhci::hci::buffer::cmd_storage;
use llhci::hci::channels::event_storage;
use llhci::hci::codec::CommandComplete;
use llhci::{HciTransport, Status};

/// Transport over leaked pool storage; each test gets its own.
pub fn transport() -> HciTransport<'static> {
    HciTransport::new(
        Box::leak(Box::new(cmd_storage())),
        Box::leak(Box::new(event_storage())),
    )
}

// ── Call records ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AdvCall {
    SetRandomAddress([u8; 6]),
    SetAdvParams(Vec<u8>),
    SetAdvData { params: Vec<u8>, len: u8 },
    SetScanRspData { params: Vec<u8>, len: u8 },
    SetAdvEnable(u8),
    ReadTxPower,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanCall {
    SetScanEnable(Vec<u8>),
    SetScanParams(Vec<u8>),
}

// ── MockAdvertiser ────────────────────────────────────────────

pub struct MockAdvertiser {
    pub calls: Vec<AdvCall>,
    /// Status every call answers with.
    pub reply: Status,
    pub tx_power: i8,
}

#[allow(dead_code)]
impl MockAdvertiser {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reply: Status::SUCCESS,
            tx_power: 0,
        }
    }

    pub fn last_call(&self) -> Option<&AdvCall> {
        self.calls.last()
    }

    fn record(&mut self, call: AdvCall) -> Status {
        self.calls.push(call);
        self.reply
    }
}

impl Advertiser for MockAdvertiser {
    fn set_random_address(&mut self, addr: [u8; 6]) -> Status {
        self.record(AdvCall::SetRandomAddress(addr))
    }

    fn set_adv_params(&mut self, params: &[u8]) -> Status {
        self.record(AdvCall::SetAdvParams(params.to_vec()))
    }

    fn set_adv_data(&mut self, params: &[u8], len: u8) -> Status {
        self.record(AdvCall::SetAdvData {
            params: params.to_vec(),
            len,
        })
    }

    fn set_scan_rsp_data(&mut self, params: &[u8], len: u8) -> Status {
        self.record(AdvCall::SetScanRspData {
            params: params.to_vec(),
            len,
        })
    }

    fn set_adv_enable(&mut self, enable: u8) -> Status {
        self.record(AdvCall::SetAdvEnable(enable))
    }

    fn read_tx_power(&mut self) -> (Status, i8) {
        (self.record(AdvCall::ReadTxPower), self.tx_power)
    }
}

// ── MockScanner ───────────────────────────────────────────────

pub struct MockScanner {
    pub calls: Vec<ScanCall>,
    pub reply: Status,
}

impl MockScanner {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reply: Status::SUCCESS,
        }
    }
}

impl Scanner for MockScanner {
    fn set_scan_enable(&mut self, params: &[u8]) -> Status {
        self.calls.push(ScanCall::SetScanEnable(params.to_vec()));
        self.reply
    }

    fn set_scan_params(&mut self, params: &[u8]) -> Status {
        self.calls.push(ScanCall::SetScanParams(params.to_vec()));
        self.reply
    }
}

// ── CaptureSink ───────────────────────────────────────────────

/// Keeps a copy of every event, in send order.
pub struct CaptureSink {
    pub events: Vec<Vec<u8>>,
}

#[allow(dead_code)]
impl CaptureSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.events.last().map(Vec::as_slice)
    }

    /// Last event decoded as a command-complete.
    pub fn last_complete(&self) -> CommandComplete<'_> {
        let event = self.last().expect("no event captured");
        CommandComplete::parse(event).expect("last event is not a command-complete")
    }
}

impl HciEventSink for CaptureSink {
    fn send(&mut self, event: &[u8]) {
        self.events.push(event.to_vec());
    }
}
