//! One handler per supported LE command.
//!
//! Parameter slices arrive already length-checked by the dispatcher, so
//! handlers index them directly. Anything beyond length (address types,
//! interval ranges, enable values) is the collaborator's call.

use super::engine::HciContext;
use super::status::Status;

pub(super) fn set_event_mask(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    ctx.event_mask.copy_from(params);
    Status::SUCCESS
}

/// Response: `[acl_data_pkt_len: LE u16][num_acl_data_pkts: u8]`.
pub(super) fn read_buf_size(ctx: &mut HciContext<'_>, rsp: &mut [u8]) -> Status {
    rsp[..2].copy_from_slice(&ctx.config.acl_data_pkt_len.to_le_bytes());
    rsp[2] = ctx.config.num_acl_data_pkts;
    Status::SUCCESS
}

pub(super) fn set_random_address(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    let mut addr = [0u8; 6];
    addr.copy_from_slice(params);
    ctx.adv.set_random_address(addr)
}

pub(super) fn set_adv_params(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    ctx.adv.set_adv_params(params)
}

/// Response: `[tx_power: i8]`.
pub(super) fn read_adv_tx_power(ctx: &mut HciContext<'_>, rsp: &mut [u8]) -> Status {
    let (status, power) = ctx.adv.read_tx_power();
    rsp[0] = power as u8;
    status
}

/// `params` keeps its length prefix; `len` excludes it.
pub(super) fn set_adv_data(ctx: &mut HciContext<'_>, params: &[u8], len: u8) -> Status {
    ctx.adv.set_adv_data(params, len)
}

pub(super) fn set_scan_rsp_data(ctx: &mut HciContext<'_>, params: &[u8], len: u8) -> Status {
    ctx.adv.set_scan_rsp_data(params, len)
}

pub(super) fn set_adv_enable(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    ctx.adv.set_adv_enable(params[0])
}

pub(super) fn set_scan_params(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    ctx.scan.set_scan_params(params)
}

pub(super) fn set_scan_enable(ctx: &mut HciContext<'_>, params: &[u8]) -> Status {
    ctx.scan.set_scan_enable(params)
}
