//! Fuzz target: host submit → `LinkLayer::process`
//!
//! Treats the input as one raw command buffer, pushes it through the real
//! transport and controller, and asserts that exactly one well-formed
//! command-complete comes out and both blocks go back to their pools.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use llhci::Status;
use llhci::config::{CMD_BUF_COUNT, CMD_BUF_SIZE, ControllerConfig, EVT_COUNT};
use llhci::hci::buffer::cmd_storage;
use llhci::hci::channels::event_storage;
use llhci::controller::ports::{Advertiser, HciEventSink, Scanner};
use llhci::hci::codec::CommandComplete;
use llhci::{HciTransport, LinkLayer};

struct Accept;

impl Advertiser for Accept {
    fn set_random_address(&mut self, _addr: [u8; 6]) -> Status {
        Status::SUCCESS
    }
    fn set_adv_params(&mut self, _params: &[u8]) -> Status {
        Status::SUCCESS
    }
    fn set_adv_data(&mut self, params: &[u8], len: u8) -> Status {
        assert_eq!(params.len(), len as usize + 1, "length must exclude the prefix");
        if params[0] <= len { Status::SUCCESS } else { Status::INVALID_PARAMETERS }
    }
    fn set_scan_rsp_data(&mut self, params: &[u8], len: u8) -> Status {
        self.set_adv_data(params, len)
    }
    fn set_adv_enable(&mut self, enable: u8) -> Status {
        if enable <= 1 { Status::SUCCESS } else { Status::INVALID_PARAMETERS }
    }
    fn read_tx_power(&mut self) -> (Status, i8) {
        (Status::SUCCESS, -127)
    }
}

impl Scanner for Accept {
    fn set_scan_enable(&mut self, _params: &[u8]) -> Status {
        Status::SUCCESS
    }
    fn set_scan_params(&mut self, _params: &[u8]) -> Status {
        Status::SUCCESS
    }
}

#[derive(Default)]
struct Count {
    events: usize,
}

impl HciEventSink for Count {
    fn send(&mut self, event: &[u8]) {
        let cc = CommandComplete::parse(event).expect("controller emitted a malformed event");
        assert_eq!(cc.num_cmd_pkts, 1, "credit must always be 1");
        self.events += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let (mut blocks, mut envelopes) = (cmd_storage(), event_storage());
    let t = HciTransport::new(&mut blocks, &mut envelopes);
    let mut ll = LinkLayer::new(ControllerConfig::default(), Accept, Accept, Count::default())
        .expect("default config is valid");

    let mut cmd = t.alloc_cmd().expect("fresh pool");
    let n = data.len().min(CMD_BUF_SIZE);
    cmd.as_mut_bytes()[..n].copy_from_slice(&data[..n]);
    t.host_cmd_send(cmd).expect("fresh envelope pool");

    assert!(ll.poll(&t));
    assert_eq!(ll.sink().events, 1);
    assert_eq!(t.free_cmd_buffers(), CMD_BUF_COUNT);
    assert_eq!(t.free_events(), EVT_COUNT);
});
