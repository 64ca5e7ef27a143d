//! Link-layer controller: command transport and the controller task.
//!
//! ```text
//! ┌───────────────────────────── HciTransport (shared, Sync) ───┐
//! │  cmd_pool ──▶ CommandBuffer ─┐                               │
//! │  evt_pool ──▶ Envelope ──────┴─▶ queue ──┐                   │
//! └──────────────────────────────────────────┼───────────────────┘
//!                                            ▼
//! ┌───────────────────────────── LinkLayer (owned by LL task) ──┐
//! │  dispatch ─▶ handler ─▶ command-complete ─▶ HciEventSink     │
//! │  mask / statistics / config / Advertiser / Scanner           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`HciTransport`] is the only state the host submission context and
//! the link-layer task share. Everything the handlers mutate lives in
//! [`LinkLayer`], which the link-layer task owns outright.

pub mod event_mask;
pub mod log_sink;
pub mod ports;

use embassy_sync::channel::TrySendError;
use log::{debug, error, info, warn};

use crate::config::{CMD_BUF_COUNT, ControllerConfig, EVT_COUNT};
use crate::diagnostics::Statistics;
use crate::error::{Error, PoolError, SubmitError};
use crate::hci::buffer::{CmdBlock, CmdStorage, CommandBuffer};
use crate::hci::channels::{Envelope, EventKind, EventQueue, EventStorage, OsEvent};
use crate::hci::codec::write_command_complete;
use crate::hci::engine::{self, HciContext};
use crate::hci::opcode::Opcode;
use crate::pool::BlockPool;

use event_mask::LeEventMask;
use ports::{Advertiser, HciEventSink, Scanner};

/// Command credit granted back to the host in every command-complete.
pub const NUM_CMD_PKTS: u8 = 1;

// ───────────────────────────────────────────────────────────────
// Transport: pools + queue
// ───────────────────────────────────────────────────────────────

/// Command buffer pool, envelope pool and the link-layer queue.
///
/// Both pools borrow their storage for `'a`; in firmware that storage is
/// a `static` initialised with [`cmd_storage`](crate::hci::buffer::cmd_storage)
/// and [`event_storage`](crate::hci::channels::event_storage).
pub struct HciTransport<'a> {
    cmd_pool: BlockPool<'a, CmdBlock, CMD_BUF_COUNT>,
    evt_pool: BlockPool<'a, OsEvent<'a>, EVT_COUNT>,
    queue: EventQueue<'a>,
}

impl<'a> HciTransport<'a> {
    pub fn new(cmds: &'a mut CmdStorage, events: &'a mut EventStorage<'a>) -> Self {
        Self {
            cmd_pool: BlockPool::new("hci_cmd", cmds),
            evt_pool: BlockPool::new("os_event", events),
            queue: EventQueue::new(),
        }
    }

    /// Check out a command buffer for the host to fill.
    pub fn alloc_cmd(&self) -> Result<CommandBuffer<'a>, PoolError> {
        self.cmd_pool.acquire().map(CommandBuffer::from_block)
    }

    pub fn acquire_event(&self) -> Result<Envelope<'a>, PoolError> {
        self.evt_pool.acquire()
    }

    pub fn release_buffer(&self, cmd: CommandBuffer<'a>) {
        self.cmd_pool.release(cmd.into_block());
    }

    /// Return an envelope to its pool.
    ///
    /// # Panics
    ///
    /// If the envelope still carries a command buffer.
    pub fn release_event(&self, mut ev: Envelope<'a>) {
        if ev.arg.is_some() {
            error!("LL: envelope (slot {}) released with payload attached", ev.slot());
            panic!("envelope released while still carrying a command buffer");
        }
        ev.kind = EventKind::HciCommand;
        ev.queued = false;
        self.evt_pool.release(ev);
    }

    /// Hand a filled command buffer to the link-layer task.
    ///
    /// On [`SubmitError::CapacityExceeded`] the buffer has already been
    /// returned to its pool and the command is dropped.
    pub fn host_cmd_send(&self, cmd: CommandBuffer<'a>) -> Result<(), SubmitError> {
        let mut ev = match self.acquire_event() {
            Ok(ev) => ev,
            Err(PoolError::Exhausted) => {
                warn!(
                    "LL: no free envelope, dropping command 0x{:04X}",
                    cmd.header().opcode.0
                );
                self.release_buffer(cmd);
                return Err(SubmitError::CapacityExceeded);
            }
        };

        ev.kind = EventKind::HciCommand;
        ev.arg = Some(cmd);
        ev.queued = false;
        self.enqueue(ev);
        Ok(())
    }

    /// Push a populated envelope, marking it queued.
    ///
    /// # Panics
    ///
    /// If the queue is full. Its depth equals the envelope pool size.
    fn enqueue(&self, mut ev: Envelope<'a>) {
        ev.queued = true;
        if let Err(TrySendError::Full(ev)) = self.queue.try_send(ev) {
            error!("LL: queue full with envelope slot {} in hand", ev.slot());
            panic!("link-layer queue overflow");
        }
    }

    /// Allocate, encode and submit in one step.
    pub fn submit(&self, opcode: Opcode, params: &[u8]) -> Result<(), Error> {
        let mut cmd = self.alloc_cmd()?;
        if let Err(e) = cmd.encode(opcode, params) {
            self.release_buffer(cmd);
            return Err(e.into());
        }
        self.host_cmd_send(cmd)?;
        Ok(())
    }

    pub fn try_receive(&self) -> Option<Envelope<'a>> {
        self.queue.try_receive().ok()
    }

    pub async fn receive(&self) -> Envelope<'a> {
        self.queue.receive().await
    }

    /// Envelopes waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn free_cmd_buffers(&self) -> usize {
        self.cmd_pool.available()
    }

    pub fn free_events(&self) -> usize {
        self.evt_pool.available()
    }
}

// ───────────────────────────────────────────────────────────────
// Controller task
// ───────────────────────────────────────────────────────────────

/// Controller state owned by the link-layer task.
pub struct LinkLayer<A: Advertiser, S: Scanner, E: HciEventSink> {
    event_mask: LeEventMask,
    config: ControllerConfig,
    stats: Statistics,
    adv: A,
    scan: S,
    sink: E,
}

impl<A: Advertiser, S: Scanner, E: HciEventSink> LinkLayer<A, S, E> {
    /// Build the controller with a zeroed LE event mask.
    pub fn new(config: ControllerConfig, adv: A, scan: S, sink: E) -> Result<Self, Error> {
        config.validate()?;
        info!(
            "LL: controller up (acl_data_pkt_len={}, num_acl_data_pkts={})",
            config.acl_data_pkt_len, config.num_acl_data_pkts
        );
        Ok(Self {
            event_mask: LeEventMask::new(),
            config,
            stats: Statistics::new(),
            adv,
            scan,
            sink,
        })
    }

    pub fn event_mask(&self) -> &LeEventMask {
        &self.event_mask
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn advertiser(&self) -> &A {
        &self.adv
    }

    pub fn advertiser_mut(&mut self) -> &mut A {
        &mut self.adv
    }

    pub fn scanner(&self) -> &S {
        &self.scan
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scan
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Process one dequeued envelope: dispatch, answer with a
    /// command-complete, then release both blocks.
    ///
    /// # Panics
    ///
    /// If the envelope carries no command buffer.
    pub fn process<'t>(&mut self, transport: &HciTransport<'t>, mut ev: Envelope<'t>) {
        ev.queued = false;
        let Some(mut cmd) = ev.arg.take() else {
            error!("LL: {:?} envelope (slot {}) without payload", ev.kind, ev.slot());
            panic!("HCI command envelope carries no buffer");
        };

        let opcode = cmd.header().opcode;
        let outcome = {
            let mut ctx = HciContext {
                event_mask: &mut self.event_mask,
                config: &self.config,
                adv: &mut self.adv,
                scan: &mut self.scan,
            };
            engine::dispatch(cmd.as_mut_bytes(), &mut ctx)
        };

        let status = outcome.status();
        if status.is_success() {
            self.stats.record_command();
        } else {
            self.stats.record_command_error();
        }

        let len = write_command_complete(
            cmd.as_mut_bytes(),
            NUM_CMD_PKTS,
            opcode,
            status,
            outcome.rsp_len(),
        );
        debug!("LL: command-complete 0x{:04X} status {}", opcode.0, status);
        self.sink.send(&cmd.as_bytes()[..len]);
        self.stats.record_event_sent();

        transport.release_buffer(cmd);
        transport.release_event(ev);
    }

    /// Process at most one queued command without waiting. Returns
    /// whether one was processed.
    pub fn poll(&mut self, transport: &HciTransport<'_>) -> bool {
        match transport.try_receive() {
            Some(ev) => {
                self.process(transport, ev);
                true
            }
            None => false,
        }
    }

    /// Wait for the next command and process it.
    pub async fn process_next(&mut self, transport: &HciTransport<'_>) {
        let ev = transport.receive().await;
        self.process(transport, ev);
    }

    /// Link-layer task body.
    pub async fn run(&mut self, transport: &HciTransport<'_>) -> ! {
        info!("LL: entering command loop");
        loop {
            self.process_next(transport).await;
        }
    }
}
