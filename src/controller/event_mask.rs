//! LE event mask: which LE meta-event sub-events the host wants.

/// Length of the LE event mask parameter.
pub const LE_EVENT_MASK_LEN: usize = 8;

/// Zeroed at controller init; written only by LE Set Event Mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeEventMask([u8; LE_EVENT_MASK_LEN]);

impl LeEventMask {
    pub const fn new() -> Self {
        Self([0; LE_EVENT_MASK_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; LE_EVENT_MASK_LEN] {
        &self.0
    }

    /// Copy a mask verbatim. `mask` must be exactly [`LE_EVENT_MASK_LEN`] bytes.
    pub(crate) fn copy_from(&mut self, mask: &[u8]) {
        self.0.copy_from_slice(mask);
    }

    /// Whether LE meta sub-event `subevent` (1-based) may be reported.
    pub fn is_enabled(&self, subevent: u8) -> bool {
        let Some(bit) = (subevent as usize).checked_sub(1) else {
            return false;
        };
        self.0
            .get(bit / 8)
            .is_some_and(|byte| byte & (1 << (bit % 8)) != 0)
    }
}
