//! Controller configuration.
//!
//! Pool geometry is fixed at compile time (static memory budget); the
//! values the host can read back through HCI live in [`ControllerConfig`]
//! and may be overridden by the embedder at init.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Size of one command buffer block: 3-byte header + 255 parameter bytes,
/// rounded up so the largest command-complete response also fits.
pub const CMD_BUF_SIZE: usize = 260;

/// Number of command buffer blocks.
pub const CMD_BUF_COUNT: usize = 4;

/// Number of event envelopes; also the depth of the link-layer queue.
pub const EVT_COUNT: usize = 4;

/// Smallest ACL data packet the LE controller may advertise (27-byte LL payload).
pub const MIN_ACL_DATA_PKT_LEN: u16 = 27;

/// Runtime controller parameters reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// LE ACL data packet length returned by Read LE Buffer Size.
    pub acl_data_pkt_len: u16,
    /// Number of LE ACL data packets the controller can buffer.
    pub num_acl_data_pkts: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            acl_data_pkt_len: MIN_ACL_DATA_PKT_LEN,
            num_acl_data_pkts: 4,
        }
    }
}

impl ControllerConfig {
    /// Reject values the host would be unable to use.
    pub fn validate(&self) -> Result<(), Error> {
        if self.acl_data_pkt_len < MIN_ACL_DATA_PKT_LEN {
            return Err(Error::Config("acl_data_pkt_len below 27"));
        }
        if self.num_acl_data_pkts == 0 {
            return Err(Error::Config("num_acl_data_pkts must be non-zero"));
        }
        Ok(())
    }
}
