//! Hotbar state and the inventory manager the engine spoofs slots through.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;
use azalea_registry::builtin::ItemKind;
use hookline_engine::host::{Inventory, PacketSink};
use hookline_engine::interaction::HotbarSlot;
use hookline_engine::packet::ServerboundPacket;

use crate::net::ChannelSink;

/// Hotbar contents plus the two notions of "held slot": what the user picked
/// and what the server was last told. Shared between the inventory manager
/// and the player, which needs the server-held item to predict placements.
#[derive(Default)]
pub struct HotbarState {
    selected: AtomicU8,
    server: AtomicU8,
    items: RwLock<[Option<ItemKind>; HotbarSlot::COUNT as usize]>,
}

impl HotbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> HotbarSlot {
        HotbarSlot::new(self.selected.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn server(&self) -> HotbarSlot {
        HotbarSlot::new(self.server.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn item(&self, slot: HotbarSlot) -> Option<ItemKind> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items[usize::from(slot.index())]
    }

    /// The item the server thinks is in hand.
    pub fn server_item(&self) -> Option<ItemKind> {
        self.item(self.server())
    }

    pub fn set_item(&self, slot: HotbarSlot, item: Option<ItemKind>) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items[usize::from(slot.index())] = item;
    }

    /// First slot holding `item`.
    pub fn find(&self, item: ItemKind) -> Option<HotbarSlot> {
        HotbarSlot::all().find(|slot| self.item(*slot) == Some(item))
    }

    fn set_server(&self, slot: HotbarSlot) {
        self.server.store(slot.index(), Ordering::Relaxed);
    }
}

/// Inventory manager: every server-slot change goes out as a
/// set-carried-item packet.
pub struct Hotbar {
    state: Arc<HotbarState>,
    network: ChannelSink,
}

impl Hotbar {
    pub fn new(state: Arc<HotbarState>, network: ChannelSink) -> Self {
        Self { state, network }
    }

    pub fn state(&self) -> &Arc<HotbarState> {
        &self.state
    }

    /// The user scrolls to `slot`.
    pub fn select(&mut self, slot: HotbarSlot) -> Result<()> {
        self.state.selected.store(slot.index(), Ordering::Relaxed);
        self.sync_to_client()
    }

    fn send_slot(&mut self, slot: HotbarSlot) -> Result<()> {
        self.network.send(ServerboundPacket::SetCarriedItem { slot })?;
        self.state.set_server(slot);
        Ok(())
    }
}

impl Inventory for Hotbar {
    fn server_slot(&self) -> HotbarSlot {
        self.state.server()
    }

    fn set_slot(&mut self, slot: HotbarSlot) -> Result<()> {
        if slot != self.state.server() {
            self.send_slot(slot)?;
        }
        Ok(())
    }

    fn sync_to_client(&mut self) -> Result<()> {
        let selected = self.state.selected();
        if selected != self.state.server() {
            tracing::trace!("Resyncing held item to {}", selected);
            self.send_slot(selected)?;
        }
        Ok(())
    }
}
