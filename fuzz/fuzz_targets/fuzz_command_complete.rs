//! Fuzz target: `CommandComplete::parse`
//!
//! Host-side decoding of arbitrary event bytes must never panic, and any
//! event it accepts must have a consistent length.
//!
//! cargo fuzz run fuzz_command_complete

#![no_main]

use libfuzzer_sys::fuzz_target;
use llhci::hci::codec::{CommandComplete, RSP_OFFSET};

fuzz_target!(|data: &[u8]| {
    if let Some(cc) = CommandComplete::parse(data) {
        assert!(RSP_OFFSET + cc.return_params.len() <= data.len());
        assert_eq!(data[1] as usize, 4 + cc.return_params.len());
    }
});
