//! Host engine surface
//!
//! The embedding game implements these traits for its world and entities.
//! Powers only ever see them as trait objects.

use gemforge_core::{EntityId, Hand, Identifier, ItemStack, StatusEffectInstance};

/// The world an item callback runs in
pub trait World {
    /// True on the rendering client, false on the authoritative server
    fn is_client(&self) -> bool;
}

/// Any entity with health that powers can affect
pub trait LivingEntity {
    fn id(&self) -> EntityId;

    fn health(&self) -> f32;

    fn max_health(&self) -> f32;

    fn heal(&mut self, amount: f32);

    /// Returns whether the damage was applied
    fn damage(&mut self, amount: f32) -> bool;

    fn add_status_effect(&mut self, effect: StatusEffectInstance);

    fn set_on_fire_for(&mut self, seconds: u32);
}

/// A player, the only entity that can actively use items
pub trait Player: LivingEntity {
    fn stack_in_hand(&self, hand: Hand) -> ItemStack;

    /// Begin continuous use of the item in `hand`
    fn set_current_hand(&mut self, hand: Hand);

    /// Remaining cooldown ticks for an item
    fn cooldown_ticks(&self, item: &Identifier) -> u32;

    fn set_cooldown(&mut self, item: &Identifier, ticks: u32);
}
