//! Opcode dispatcher. Decodes the command header and routes to handlers.
//!
//! Every supported opcode has exactly one [`CommandSpec`] in
//! [`LE_COMMANDS`], which is the single place its length contract is
//! written down. Dispatch runs three gates before a handler sees a byte:
//!
//! 1. **Group**: only the LE controller group (OGF 0x08) is served.
//! 2. **Opcode**: the OCF must appear in the table.
//! 3. **Length**: `param_len` must equal the opcode's fixed length, or
//!    for variable-length payloads be at least its mandatory prefix.
//!
//! A command that fails a gate never reaches its handler and leaves no
//! controller state changed.

use log::{debug, warn};

use crate::config::ControllerConfig;
use crate::controller::event_mask::{LE_EVENT_MASK_LEN, LeEventMask};
use crate::controller::ports::{Advertiser, Scanner};

use super::codec::{CMD_HDR_LEN, CommandHeader, RSP_OFFSET};
use super::handlers;
use super::opcode::{Opcode, ocf, ogf};
use super::status::Status;

/// Controller state and collaborators a handler may touch.
pub struct HciContext<'a> {
    pub event_mask: &'a mut LeEventMask,
    pub config: &'a ControllerConfig,
    pub adv: &'a mut dyn Advertiser,
    pub scan: &'a mut dyn Scanner,
}

/// How a handler consumes the command.
#[derive(Clone, Copy)]
pub enum Handler {
    /// Reads the parameter block; produces no response bytes.
    Params(fn(&mut HciContext<'_>, &[u8]) -> Status),
    /// Parameter block starts with its own length prefix. The dispatcher
    /// subtracts it and passes `(whole parameter block, param_len - 1)`;
    /// the prefix byte stays at offset 0.
    Prefixed(fn(&mut HciContext<'_>, &[u8], u8) -> Status),
    /// Takes no parameter bytes and fills the opcode's response region.
    Reply(fn(&mut HciContext<'_>, &mut [u8]) -> Status),
}

/// Length contract and handler for one opcode.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub ocf: u16,
    pub name: &'static str,
    /// Exact parameter length, or the minimum when `variable` is set.
    pub param_len: u8,
    pub variable: bool,
    /// Response bytes written on success.
    pub rsp_len: u8,
    pub handler: Handler,
}

impl CommandSpec {
    pub fn accepts(&self, param_len: u8) -> bool {
        if self.variable {
            param_len >= self.param_len
        } else {
            param_len == self.param_len
        }
    }
}

/// Result of dispatching one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handler succeeded; `rsp_len` response bytes sit at `RSP_OFFSET`.
    Complete { rsp_len: u8 },
    /// Parameter length did not satisfy the opcode's contract.
    InvalidParameters,
    /// Group or opcode is not implemented.
    UnknownCommand,
    /// Handler ran and its collaborator reported a failure.
    Rejected(Status),
}

impl Outcome {
    pub fn status(self) -> Status {
        match self {
            Self::Complete { .. } => Status::SUCCESS,
            Self::InvalidParameters => Status::INVALID_PARAMETERS,
            Self::UnknownCommand => Status::UNKNOWN_COMMAND,
            Self::Rejected(status) => status,
        }
    }

    pub fn rsp_len(self) -> u8 {
        match self {
            Self::Complete { rsp_len } => rsp_len,
            _ => 0,
        }
    }
}

const BD_ADDR_LEN: u8 = 6;
const SET_ADV_PARAM_LEN: u8 = 15;
const SET_ADV_ENABLE_LEN: u8 = 1;
const SET_SCAN_PARAM_LEN: u8 = 7;
const SET_SCAN_ENABLE_LEN: u8 = 2;

/// Supported LE controller commands.
pub const LE_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        ocf: ocf::LE_SET_EVENT_MASK,
        name: "LE Set Event Mask",
        param_len: LE_EVENT_MASK_LEN as u8,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_event_mask),
    },
    CommandSpec {
        ocf: ocf::LE_RD_BUF_SIZE,
        name: "LE Read Buffer Size",
        param_len: 0,
        variable: false,
        rsp_len: 3,
        handler: Handler::Reply(handlers::read_buf_size),
    },
    CommandSpec {
        ocf: ocf::LE_SET_RAND_ADDR,
        name: "LE Set Random Address",
        param_len: BD_ADDR_LEN,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_random_address),
    },
    CommandSpec {
        ocf: ocf::LE_SET_ADV_PARAMS,
        name: "LE Set Advertising Parameters",
        param_len: SET_ADV_PARAM_LEN,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_adv_params),
    },
    CommandSpec {
        ocf: ocf::LE_RD_ADV_CHAN_TXPWR,
        name: "LE Read Advertising Channel TX Power",
        param_len: 0,
        variable: false,
        rsp_len: 1,
        handler: Handler::Reply(handlers::read_adv_tx_power),
    },
    CommandSpec {
        ocf: ocf::LE_SET_ADV_DATA,
        name: "LE Set Advertising Data",
        param_len: 1,
        variable: true,
        rsp_len: 0,
        handler: Handler::Prefixed(handlers::set_adv_data),
    },
    CommandSpec {
        ocf: ocf::LE_SET_SCAN_RSP_DATA,
        name: "LE Set Scan Response Data",
        param_len: 1,
        variable: true,
        rsp_len: 0,
        handler: Handler::Prefixed(handlers::set_scan_rsp_data),
    },
    CommandSpec {
        ocf: ocf::LE_SET_ADV_ENABLE,
        name: "LE Set Advertising Enable",
        param_len: SET_ADV_ENABLE_LEN,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_adv_enable),
    },
    CommandSpec {
        ocf: ocf::LE_SET_SCAN_PARAMS,
        name: "LE Set Scan Parameters",
        param_len: SET_SCAN_PARAM_LEN,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_scan_params),
    },
    CommandSpec {
        ocf: ocf::LE_SET_SCAN_ENABLE,
        name: "LE Set Scan Enable",
        param_len: SET_SCAN_ENABLE_LEN,
        variable: false,
        rsp_len: 0,
        handler: Handler::Params(handlers::set_scan_enable),
    },
];

/// Table well-formedness, checked at compile time:
/// - a `Reply` handler's parameters end at or before `RSP_OFFSET`, so its
///   response writes can never land on an unread parameter byte;
/// - only `Reply` handlers declare response bytes;
/// - `Prefixed` handlers are variable-length with room for the prefix;
/// - no OCF appears twice.
const fn table_is_well_formed(table: &[CommandSpec]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let spec = &table[i];
        match spec.handler {
            Handler::Reply(_) => {
                if spec.variable || CMD_HDR_LEN + spec.param_len as usize > RSP_OFFSET {
                    return false;
                }
            }
            Handler::Prefixed(_) => {
                if !spec.variable || spec.param_len < 1 || spec.rsp_len != 0 {
                    return false;
                }
            }
            Handler::Params(_) => {
                if spec.rsp_len != 0 {
                    return false;
                }
            }
        }
        let mut j = i + 1;
        while j < table.len() {
            if table[j].ocf == spec.ocf {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_well_formed(LE_COMMANDS), "LE command table is malformed");

/// Find the table entry for `opcode`. `None` for any other group.
pub fn lookup(opcode: Opcode) -> Option<&'static CommandSpec> {
    if opcode.ogf() != ogf::LE {
        return None;
    }
    LE_COMMANDS.iter().find(|spec| spec.ocf == opcode.ocf())
}

/// Dispatch the command at the start of `buf`.
///
/// `buf` is the whole command buffer: response bytes, if any, are written
/// at [`RSP_OFFSET`]. Nothing before `RSP_OFFSET` is modified.
pub fn dispatch(buf: &mut [u8], ctx: &mut HciContext<'_>) -> Outcome {
    let Some(hdr) = CommandHeader::parse(buf) else {
        warn!("HCI: truncated command header ({} bytes)", buf.len());
        return Outcome::InvalidParameters;
    };

    if hdr.opcode.ogf() != ogf::LE {
        warn!(
            "HCI: unsupported group ogf=0x{:02X} (opcode 0x{:04X})",
            hdr.opcode.ogf(),
            hdr.opcode.0
        );
        return Outcome::UnknownCommand;
    }

    let Some(spec) = lookup(hdr.opcode) else {
        warn!("HCI: unsupported LE command ocf=0x{:03X}", hdr.opcode.ocf());
        return Outcome::UnknownCommand;
    };

    if !spec.accepts(hdr.param_len) {
        warn!(
            "HCI: {} bad length {} (expected {}{})",
            spec.name,
            hdr.param_len,
            if spec.variable { ">=" } else { "" },
            spec.param_len
        );
        return Outcome::InvalidParameters;
    }

    let params_end = hdr.params_end();
    if buf.len() < params_end {
        warn!("HCI: {} parameters truncated", spec.name);
        return Outcome::InvalidParameters;
    }

    debug!("HCI: {} (len={})", spec.name, hdr.param_len);

    let status = match spec.handler {
        Handler::Params(handler) => handler(ctx, &buf[CMD_HDR_LEN..params_end]),
        Handler::Prefixed(handler) => match hdr.param_len.checked_sub(1) {
            Some(len) => handler(ctx, &buf[CMD_HDR_LEN..params_end], len),
            None => return Outcome::InvalidParameters,
        },
        Handler::Reply(handler) => {
            let rsp_end = RSP_OFFSET + spec.rsp_len as usize;
            let Some(rsp) = buf.get_mut(RSP_OFFSET..rsp_end) else {
                warn!("HCI: {} no room for {}-byte response", spec.name, spec.rsp_len);
                return Outcome::Rejected(Status::MEMORY_CAPACITY_EXCEEDED);
            };
            handler(ctx, rsp)
        }
    };

    if status.is_success() {
        Outcome::Complete {
            rsp_len: spec.rsp_len,
        }
    } else {
        debug!("HCI: {} rejected with {}", spec.name, status);
        Outcome::Rejected(status)
    }
}
