//! Port traits: the boundary between the HCI core and the rest of the
//! link layer.
//!
//! ```text
//!   engine::dispatch ──▶ Advertiser / Scanner   (state mutation)
//!   LinkLayer        ──▶ HciEventSink           (event delivery)
//! ```
//!
//! The advertising and scanning state machines own every rule beyond
//! parameter *length*: they decide whether a request is acceptable and
//! answer with a controller [`Status`], which is reported to the host
//! unchanged.

use crate::hci::status::Status;

// ───────────────────────────────────────────────────────────────
// Advertising state machine
// ───────────────────────────────────────────────────────────────

pub trait Advertiser {
    /// Set the device's random address.
    fn set_random_address(&mut self, addr: [u8; 6]) -> Status;

    /// Raw 15-byte LE Set Advertising Parameters block.
    fn set_adv_params(&mut self, params: &[u8]) -> Status;

    /// `params` is the whole parameter block: `params[0]` is the host's
    /// Advertising_Data_Length and `params[1..]` the data. `len` is
    /// `params.len() - 1`, the number of bytes after that prefix.
    fn set_adv_data(&mut self, params: &[u8], len: u8) -> Status;

    /// Same layout as [`set_adv_data`](Self::set_adv_data).
    fn set_scan_rsp_data(&mut self, params: &[u8], len: u8) -> Status;

    /// Advertising_Enable byte as sent by the host.
    fn set_adv_enable(&mut self, enable: u8) -> Status;

    /// Advertising channel TX power in dBm.
    fn read_tx_power(&mut self) -> (Status, i8);
}

// ───────────────────────────────────────────────────────────────
// Scanning state machine
// ───────────────────────────────────────────────────────────────

pub trait Scanner {
    /// Raw 2-byte block: LE_Scan_Enable, Filter_Duplicates.
    fn set_scan_enable(&mut self, params: &[u8]) -> Status;

    /// Raw 7-byte LE Set Scan Parameters block.
    fn set_scan_params(&mut self, params: &[u8]) -> Status;
}

// ───────────────────────────────────────────────────────────────
// Event delivery
// ───────────────────────────────────────────────────────────────

/// Send path for events going back to the host.
///
/// `event` starts at the event code and is only valid for the duration
/// of the call: the underlying block returns to its pool right after.
pub trait HciEventSink {
    fn send(&mut self, event: &[u8]);
}
