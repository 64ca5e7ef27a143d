//! Integration tests for host submit → queue → dispatch → command-complete.
//!
//! Every test drives commands through the real transport and controller
//! and asserts on the exact event bytes the send path received.

use crate::mock_ll::{AdvCall, CaptureSink, MockAdvertiser, MockScanner, ScanCall, transport};

use llhci::config::ControllerConfig;
use llhci::hci::opcode::*;
use llhci::{HciTransport, LinkLayer, Status};

type Controller = LinkLayer<MockAdvertiser, MockScanner, CaptureSink>;

fn make_ll() -> (HciTransport<'static>, Controller) {
    make_ll_with(ControllerConfig::default())
}

fn make_ll_with(config: ControllerConfig) -> (HciTransport<'static>, Controller) {
    let ll = LinkLayer::new(config, MockAdvertiser::new(), MockScanner::new(), CaptureSink::new())
        .unwrap();
    (transport(), ll)
}

/// Submit one command, process it, return the emitted event.
fn roundtrip(t: &HciTransport<'_>, ll: &mut Controller, opcode: Opcode, params: &[u8]) -> Vec<u8> {
    t.submit(opcode, params).unwrap();
    assert!(ll.poll(t), "queued command was not processed");
    ll.sink().last().unwrap().to_vec()
}

// ── Event mask ───────────────────────────────────────────────

#[test]
fn set_event_mask_all_ones() {
    let (t, mut ll) = make_ll();
    assert_eq!(ll.event_mask().as_bytes(), &[0; 8], "mask starts zeroed");

    let ev = roundtrip(&t, &mut ll, LE_SET_EVENT_MASK, &[0xFF; 8]);

    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x01, 0x20, 0x00]);
    assert_eq!(ll.event_mask().as_bytes(), &[0xFF; 8]);
}

#[test]
fn set_event_mask_short_leaves_mask_alone() {
    let (t, mut ll) = make_ll();
    roundtrip(&t, &mut ll, LE_SET_EVENT_MASK, &[0x1F, 0, 0, 0, 0, 0, 0, 0]);

    let ev = roundtrip(&t, &mut ll, LE_SET_EVENT_MASK, &[0xFF; 7]);

    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x01, 0x20, 0x12]);
    assert_eq!(ll.event_mask().as_bytes(), &[0x1F, 0, 0, 0, 0, 0, 0, 0]);
}

// ── Read buffer size ─────────────────────────────────────────

#[test]
fn read_buffer_size_reports_defaults() {
    let (t, mut ll) = make_ll();

    let ev = roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);

    assert_eq!(ev, [0x0E, 0x07, 0x01, 0x02, 0x20, 0x00, 27, 0, 4]);
}

#[test]
fn read_buffer_size_is_idempotent() {
    let (t, mut ll) = make_ll();
    let first = roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);
    let second = roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);
    assert_eq!(first, second);
}

#[test]
fn read_buffer_size_follows_config() {
    let (t, mut ll) = make_ll_with(ControllerConfig {
        acl_data_pkt_len: 251,
        num_acl_data_pkts: 8,
    });

    let ev = roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);

    assert_eq!(&ev[6..], &[251, 0, 8]);
}

#[test]
fn read_buffer_size_with_params_is_invalid() {
    let (t, mut ll) = make_ll();
    let ev = roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[0]);
    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x02, 0x20, 0x12]);
}

// ── Advertising ──────────────────────────────────────────────

#[test]
fn adv_enable_wrong_length_is_rejected_without_side_effects() {
    let (t, mut ll) = make_ll();

    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_ENABLE, &[0x01, 0x00]);

    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x0A, 0x20, 0x12]);
    assert!(ll.advertiser().calls.is_empty());
}

#[test]
fn adv_enable_reaches_advertiser() {
    let (t, mut ll) = make_ll();
    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_ENABLE, &[0x01]);
    assert_eq!(ev[5], 0x00);
    assert_eq!(ll.advertiser().last_call(), Some(&AdvCall::SetAdvEnable(1)));
}

#[test]
fn advertiser_failure_status_passes_through() {
    let (t, mut ll) = make_ll();
    ll.advertiser_mut().reply = Status::COMMAND_DISALLOWED;

    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_ENABLE, &[0x01]);

    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x0A, 0x20, 0x0C]);
    assert_eq!(ll.stats().command_errors(), 1);
}

#[test]
fn random_address_is_passed_verbatim() {
    let (t, mut ll) = make_ll();
    let addr = [0x11, 0x22, 0x33, 0x44, 0x55, 0xC6];
    roundtrip(&t, &mut ll, LE_SET_RANDOM_ADDRESS, &addr);
    assert_eq!(ll.advertiser().last_call(), Some(&AdvCall::SetRandomAddress(addr)));
}

#[test]
fn adv_params_need_exactly_fifteen_bytes() {
    let (t, mut ll) = make_ll();
    let params: Vec<u8> = (0..15).collect();

    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_PARAMETERS, &params);
    assert_eq!(ev[5], 0x00);
    assert_eq!(ll.advertiser().last_call(), Some(&AdvCall::SetAdvParams(params.clone())));

    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_PARAMETERS, &params[..14]);
    assert_eq!(ev[5], 0x12);
    assert_eq!(ll.advertiser().calls.len(), 1);
}

#[test]
fn adv_data_length_excludes_prefix() {
    let (t, mut ll) = make_ll();
    // Flags AD structure padded to the full 31-byte payload.
    let mut params = vec![3, 0x02, 0x01, 0x06];
    params.resize(32, 0);

    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_DATA, &params);

    assert_eq!(ev[5], 0x00);
    assert_eq!(
        ll.advertiser().last_call(),
        Some(&AdvCall::SetAdvData {
            params: params.clone(),
            len: 31,
        })
    );
}

#[test]
fn scan_rsp_data_length_excludes_prefix() {
    let (t, mut ll) = make_ll();
    roundtrip(&t, &mut ll, LE_SET_SCAN_RESPONSE_DATA, &[2, 0x01, 0x09]);
    assert_eq!(
        ll.advertiser().last_call(),
        Some(&AdvCall::SetScanRspData {
            params: vec![2, 0x01, 0x09],
            len: 2,
        })
    );
}

#[test]
fn adv_data_prefix_only_gives_zero_length() {
    let (t, mut ll) = make_ll();
    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_DATA, &[0]);
    assert_eq!(ev[5], 0x00);
    assert_eq!(
        ll.advertiser().last_call(),
        Some(&AdvCall::SetAdvData {
            params: vec![0],
            len: 0,
        })
    );
}

#[test]
fn adv_data_without_prefix_is_invalid() {
    let (t, mut ll) = make_ll();
    let ev = roundtrip(&t, &mut ll, LE_SET_ADVERTISING_DATA, &[]);
    assert_eq!(ev[5], 0x12);
    assert!(ll.advertiser().calls.is_empty());
}

#[test]
fn tx_power_is_reported_as_signed_byte() {
    let (t, mut ll) = make_ll();
    ll.advertiser_mut().tx_power = -20;

    let ev = roundtrip(&t, &mut ll, LE_READ_ADVERTISING_CHANNEL_TX_POWER, &[]);

    assert_eq!(ev, [0x0E, 0x05, 0x01, 0x07, 0x20, 0x00, 0xEC]);
}

#[test]
fn tx_power_failure_carries_no_response_bytes() {
    let (t, mut ll) = make_ll();
    ll.advertiser_mut().reply = Status::HARDWARE_FAILURE;

    let ev = roundtrip(&t, &mut ll, LE_READ_ADVERTISING_CHANNEL_TX_POWER, &[]);

    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x07, 0x20, 0x03]);
}

// ── Scanning ─────────────────────────────────────────────────

#[test]
fn scan_commands_reach_scanner() {
    let (t, mut ll) = make_ll();
    let params = [0x01, 0x10, 0x00, 0x10, 0x00, 0x00, 0x00];

    roundtrip(&t, &mut ll, LE_SET_SCAN_PARAMETERS, &params);
    roundtrip(&t, &mut ll, LE_SET_SCAN_ENABLE, &[0x01, 0x00]);

    assert_eq!(
        ll.scanner().calls,
        vec![
            ScanCall::SetScanParams(params.to_vec()),
            ScanCall::SetScanEnable(vec![0x01, 0x00]),
        ]
    );
}

#[test]
fn scan_enable_wrong_length_is_invalid() {
    let (t, mut ll) = make_ll();
    let ev = roundtrip(&t, &mut ll, LE_SET_SCAN_ENABLE, &[0x01]);
    assert_eq!(ev[5], 0x12);
    assert!(ll.scanner().calls.is_empty());
}

// ── Unknown commands ─────────────────────────────────────────

#[test]
fn non_le_group_is_unknown_command() {
    let (t, mut ll) = make_ll();
    // HCI_Reset (OGF 0x03, OCF 0x003)
    let ev = roundtrip(&t, &mut ll, Opcode::new(0x03, 0x003), &[]);
    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x03, 0x0C, 0x01]);
}

#[test]
fn unsupported_le_command_is_unknown_command() {
    let (t, mut ll) = make_ll();
    // LE Read Local Supported Features is not served.
    let ev = roundtrip(&t, &mut ll, Opcode::new(0x08, 0x003), &[]);
    assert_eq!(ev, [0x0E, 0x04, 0x01, 0x03, 0x20, 0x01]);
}

// ── Flow control, ordering, statistics ───────────────────────

#[test]
fn commands_are_answered_in_fifo_order() {
    let (t, mut ll) = make_ll();
    t.submit(LE_SET_ADVERTISING_ENABLE, &[0]).unwrap();
    t.submit(LE_READ_BUFFER_SIZE, &[]).unwrap();
    t.submit(LE_SET_SCAN_ENABLE, &[0, 0]).unwrap();
    assert_eq!(t.pending(), 3);

    while ll.poll(&t) {}

    let opcodes: Vec<u16> = ll
        .sink()
        .events
        .iter()
        .map(|ev| u16::from_le_bytes([ev[3], ev[4]]))
        .collect();
    assert_eq!(opcodes, vec![0x200A, 0x2002, 0x200C]);
}

#[test]
fn every_event_grants_one_credit() {
    let (t, mut ll) = make_ll();
    roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);
    roundtrip(&t, &mut ll, LE_SET_EVENT_MASK, &[0; 3]);
    roundtrip(&t, &mut ll, Opcode::new(0x3F, 0x001), &[]);

    assert!(ll.sink().events.iter().all(|ev| ev[2] == 1));
}

#[test]
fn statistics_count_successes_errors_and_events() {
    let (t, mut ll) = make_ll();
    roundtrip(&t, &mut ll, LE_READ_BUFFER_SIZE, &[]);
    roundtrip(&t, &mut ll, LE_SET_ADVERTISING_ENABLE, &[1]);
    roundtrip(&t, &mut ll, LE_SET_ADVERTISING_ENABLE, &[1, 2]);

    let snap = ll.stats().snapshot();
    assert_eq!(snap.hci_cmds, 2);
    assert_eq!(snap.hci_cmd_errs, 1);
    assert_eq!(snap.hci_events_sent, 3);

    let mut buf = [0u8; 16];
    let bytes = snap.encode(&mut buf).unwrap();
    assert_eq!(llhci::diagnostics::StatsSnapshot::decode(bytes), Some(snap));
}

#[test]
fn process_next_drives_one_command() {
    let (t, mut ll) = make_ll();
    t.submit(LE_READ_BUFFER_SIZE, &[]).unwrap();

    futures_lite::future::block_on(ll.process_next(&t));

    let cc = ll.sink().last_complete();
    assert_eq!(cc.opcode, LE_READ_BUFFER_SIZE);
    assert_eq!(cc.status, Status::SUCCESS);
    assert_eq!(t.pending(), 0);
}
