//! Pool-backed command buffer.
//!
//! The same fixed-size block is filled by the host as a command, read by
//! the dispatcher, and rewritten in place as the command-complete event.
//! The bytes stay in pool storage; `CommandBuffer` is only the handle.

use crate::config::{CMD_BUF_COUNT, CMD_BUF_SIZE};
use crate::error::EncodeError;
use crate::pool::Block;

use super::codec::{self, CommandHeader};
use super::opcode::Opcode;

/// Raw storage of one command buffer block.
pub type CmdBlock = [u8; CMD_BUF_SIZE];

/// Backing storage for the command buffer pool.
pub type CmdStorage = [CmdBlock; CMD_BUF_COUNT];

/// Zeroed command pool storage, usable in a `static` initialiser.
pub const fn cmd_storage() -> CmdStorage {
    [[0; CMD_BUF_SIZE]; CMD_BUF_COUNT]
}

/// Exclusively-owned command buffer checked out of the command pool.
#[derive(Debug)]
#[must_use = "command buffers must be submitted or released"]
pub struct CommandBuffer<'a>(Block<'a, CmdBlock>);

impl<'a> CommandBuffer<'a> {
    pub(crate) fn from_block(block: Block<'a, CmdBlock>) -> Self {
        Self(block)
    }

    pub(crate) fn into_block(self) -> Block<'a, CmdBlock> {
        self.0
    }

    /// Fill the buffer with `[opcode][len][params]`.
    pub fn encode(&mut self, opcode: Opcode, params: &[u8]) -> Result<usize, EncodeError> {
        codec::encode_command(opcode, params, &mut self.0[..])
    }

    /// Inbound header. Always readable: the block is larger than a header.
    pub fn header(&self) -> CommandHeader {
        CommandHeader {
            opcode: Opcode::from_le_bytes([self.0[0], self.0[1]]),
            param_len: self.0[2],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0[..]
    }
}
