//! Fixed-size block pools over caller-provided storage.
//!
//! A [`BlockPool`] borrows `N` blocks for its lifetime `'a`. [`acquire`]
//! hands out a [`Block`]: a unique `&'a mut T` into that storage plus the
//! pool id and slot index. Block bytes never move; only the handle
//! travels through envelopes and the queue. [`release`] consumes the
//! handle and puts the borrow back on the free stack. Because the handle
//! is neither `Clone` nor `Copy`, releasing the same block twice does not
//! compile.
//!
//! Releasing into the wrong pool, or overflowing a pool's free stack,
//! means the ownership bookkeeping is corrupt; that is fatal.
//!
//! Acquire and release never block: both run inside a short critical
//! section so the host submission context and the link-layer task can
//! share a pool.
//!
//! [`acquire`]: BlockPool::acquire
//! [`release`]: BlockPool::release

use core::cell::RefCell;
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU16, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Vec;
use log::error;

use crate::error::PoolError;

static NEXT_POOL_ID: AtomicU16 = AtomicU16::new(1);

/// Owning handle to one block checked out of a [`BlockPool`].
#[must_use = "blocks must be released back to the pool they came from"]
pub struct Block<'a, T> {
    pool_id: u16,
    slot: u8,
    data: &'a mut T,
}

impl<T> Block<'_, T> {
    /// Index of the slot this block occupies in its pool.
    pub fn slot(&self) -> u8 {
        self.slot
    }
}

impl<T> Deref for Block<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.data
    }
}

impl<T> DerefMut for Block<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.data
    }
}

impl<T> fmt::Debug for Block<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("pool_id", &self.pool_id)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Bounded-capacity block allocator with non-blocking acquire/release.
pub struct BlockPool<'a, T, const N: usize> {
    id: u16,
    name: &'static str,
    /// Stack of free blocks, tagged with their slot index.
    free: Mutex<CriticalSectionRawMutex, RefCell<Vec<(u8, &'a mut T), N>>>,
}

impl<'a, T, const N: usize> BlockPool<'a, T, N> {
    /// Build a pool over `storage`. Slot 0 is handed out first.
    pub fn new(name: &'static str, storage: &'a mut [T; N]) -> Self {
        Self::with_id(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed), name, storage)
    }

    fn with_id(id: u16, name: &'static str, storage: &'a mut [T; N]) -> Self {
        const { assert!(N > 0 && N <= 256, "pool slot index must fit in u8") };

        // Highest index at the bottom so pops start from slot 0.
        let free: Vec<(u8, &'a mut T), N> = storage
            .iter_mut()
            .enumerate()
            .rev()
            .map(|(i, block)| (i as u8, block))
            .collect();

        Self {
            id,
            name,
            free: Mutex::new(RefCell::new(free)),
        }
    }

    /// Take a free block. Never blocks; fails when every block is out.
    pub fn acquire(&self) -> Result<Block<'a, T>, PoolError> {
        let (slot, data) = self
            .free
            .lock(|cell| cell.borrow_mut().pop())
            .ok_or(PoolError::Exhausted)?;
        Ok(Block {
            pool_id: self.id,
            slot,
            data,
        })
    }

    /// Return a block to this pool.
    ///
    /// # Panics
    ///
    /// If `block` was not acquired from this pool, or the free stack is
    /// already full.
    pub fn release(&self, block: Block<'a, T>) {
        if block.pool_id != self.id {
            error!(
                "POOL[{}]: release of block from foreign pool {} (slot {})",
                self.name, block.pool_id, block.slot
            );
            panic!("block released into the wrong pool");
        }

        let Block { slot, data, .. } = block;
        let overflow = self
            .free
            .lock(|cell| cell.borrow_mut().push((slot, data)).is_err());

        if overflow {
            error!("POOL[{}]: free stack overflow releasing slot {}", self.name, slot);
            panic!("block pool free stack overflow");
        }
    }

    /// Number of blocks currently free.
    pub fn available(&self) -> usize {
        self.free.lock(|cell| cell.borrow().len())
    }

    /// Total number of blocks managed by this pool.
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
