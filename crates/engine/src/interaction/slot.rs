//! Temporary hotbar slot swaps with guaranteed resync.

use std::fmt;

use anyhow::Result;

use crate::host::Inventory;

/// Index into the nine-slot hotbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct HotbarSlot(u8);

impl HotbarSlot {
    pub const COUNT: u8 = 9;

    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = HotbarSlot> {
        (0..Self::COUNT).map(HotbarSlot)
    }
}

impl fmt::Display for HotbarSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// Resyncs the inventory when dropped, unless [`ResyncGuard::finish`] already
/// did. Covers panics unwinding out of the body.
struct ResyncGuard<'a> {
    inventory: &'a mut dyn Inventory,
    armed: bool,
}

impl ResyncGuard<'_> {
    fn finish(mut self) -> Result<()> {
        self.armed = false;
        self.inventory.sync_to_client()
    }
}

impl Drop for ResyncGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = self.inventory.sync_to_client() {
                tracing::warn!("Hotbar resync failed while unwinding: {:#}", err);
            }
        }
    }
}

/// Run `body` with `slot` presented to the server as the held slot.
///
/// When `slot` is already the server slot nothing is sent. Otherwise the slot
/// is switched before `body` and resynced after it on every exit path. An
/// error from `body` wins over a resync error.
pub fn with_slot<T>(
    inventory: &mut dyn Inventory,
    slot: HotbarSlot,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if inventory.server_slot() == slot {
        return body();
    }

    inventory.set_slot(slot)?;
    tracing::debug!("Spoofed held item to {}", slot);

    let guard = ResyncGuard {
        inventory,
        armed: true,
    };
    let result = body();
    let synced = guard.finish();

    match (result, synced) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err.context("resync hotbar after spoofed slot")),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(sync_err)) => {
            tracing::warn!("Hotbar resync failed after interaction error: {:#}", sync_err);
            Err(err)
        }
    }
}
