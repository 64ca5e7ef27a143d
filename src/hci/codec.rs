//! HCI command / command-complete wire layout.
//!
//! One buffer carries the command in and the response out:
//!
//! ```text
//! inbound   ┌─────────┬───────────┬───────────────────────────┐
//!           │ opcode  │ param_len │ params ...                │
//!           │ LE u16  │ u8        │                           │
//!           └─────────┴───────────┴───────────────────────────┘
//!             0    1     2          3
//!
//! outbound  ┌──────┬─────┬──────────┬─────────┬────────┬────────────┐
//!           │ 0x0E │ len │ num_pkts │ opcode  │ status │ response   │
//!           └──────┴─────┴──────────┴─────────┴────────┴────────────┘
//!             0      1     2          3    4    5        6 (RSP_OFFSET)
//! ```
//!
//! Response bytes are written from [`RSP_OFFSET`] onward; the header
//! bytes 0..6 are only overwritten after the handler has finished with
//! the parameters.

use crate::error::EncodeError;

use super::opcode::Opcode;
use super::status::Status;

/// Command header: opcode + parameter length.
pub const CMD_HDR_LEN: usize = 3;

/// Command-complete header up to, not including, the status byte:
/// event code, parameter length, num_cmd_pkts, opcode.
pub const CMD_COMPLETE_HDR_LEN: usize = 5;

/// Offset at which handlers write opcode-specific response bytes.
pub const RSP_OFFSET: usize = CMD_COMPLETE_HDR_LEN + 1;

/// Event code of the command-complete event.
pub const EVCODE_COMMAND_COMPLETE: u8 = 0x0E;

/// num_cmd_pkts + opcode + status.
const CMD_COMPLETE_FIXED_PARAMS: u8 = 4;

/// Largest response that still fits the 1-byte event parameter length.
pub const MAX_RSP_LEN: u8 = u8::MAX - CMD_COMPLETE_FIXED_PARAMS;

/// Decoded command header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHeader {
    pub opcode: Opcode,
    pub param_len: u8,
}

impl CommandHeader {
    /// Read the header at the start of `buf`. `None` if fewer than three
    /// bytes are available.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        match buf {
            [lo, hi, len, ..] => Some(Self {
                opcode: Opcode::from_le_bytes([*lo, *hi]),
                param_len: *len,
            }),
            _ => None,
        }
    }

    /// Offset one past the last parameter byte.
    pub fn params_end(&self) -> usize {
        CMD_HDR_LEN + self.param_len as usize
    }
}

/// Write `[opcode][len][params]` into `out`; returns bytes written.
pub fn encode_command(opcode: Opcode, params: &[u8], out: &mut [u8]) -> Result<usize, EncodeError> {
    let param_len = u8::try_from(params.len()).map_err(|_| EncodeError::ParamsTooLong)?;
    let total = CMD_HDR_LEN + params.len();
    if total > out.len() {
        return Err(EncodeError::BufferTooSmall);
    }

    out[..2].copy_from_slice(&opcode.to_le_bytes());
    out[2] = param_len;
    out[CMD_HDR_LEN..total].copy_from_slice(params);
    Ok(total)
}

/// Overwrite the first [`RSP_OFFSET`] bytes of `buf` with a command-complete
/// header, leaving `rsp_len` response bytes already at [`RSP_OFFSET`] in
/// place. Returns the total event length.
///
/// # Panics
///
/// If `rsp_len` exceeds [`MAX_RSP_LEN`] or `buf` cannot hold the event.
/// Callers size responses from the command table, so either is a bug.
pub fn write_command_complete(
    buf: &mut [u8],
    num_cmd_pkts: u8,
    opcode: Opcode,
    status: Status,
    rsp_len: u8,
) -> usize {
    assert!(rsp_len <= MAX_RSP_LEN, "response too long for command-complete");
    let total = RSP_OFFSET + rsp_len as usize;
    assert!(buf.len() >= total, "buffer too small for command-complete");

    buf[0] = EVCODE_COMMAND_COMPLETE;
    buf[1] = CMD_COMPLETE_FIXED_PARAMS + rsp_len;
    buf[2] = num_cmd_pkts;
    buf[3..5].copy_from_slice(&opcode.to_le_bytes());
    buf[5] = status.as_u8();
    total
}

/// Host-side view of an emitted command-complete event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandComplete<'a> {
    pub num_cmd_pkts: u8,
    pub opcode: Opcode,
    pub status: Status,
    pub return_params: &'a [u8],
}

impl<'a> CommandComplete<'a> {
    /// Parse a full event (starting at the event code). `None` if it is not
    /// a well-formed command-complete.
    pub fn parse(event: &'a [u8]) -> Option<Self> {
        let [code, len, rest @ ..] = event else {
            return None;
        };
        if *code != EVCODE_COMMAND_COMPLETE || *len < CMD_COMPLETE_FIXED_PARAMS {
            return None;
        }
        let params = rest.get(..*len as usize)?;
        Some(Self {
            num_cmd_pkts: params[0],
            opcode: Opcode::from_le_bytes([params[1], params[2]]),
            status: Status(params[3]),
            return_params: &params[4..],
        })
    }
}
