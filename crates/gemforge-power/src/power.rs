//! The `GemPower` trait and the empty sentinel power

use std::fmt;

use gemforge_core::{
    Hand, Identifier, ItemStack, Text, TooltipContext, TooltipType, TypedActionResult,
};

use crate::host::{LivingEntity, Player, World};

/// Registry key of the empty sentinel power
pub fn empty_power_id() -> Identifier {
    Identifier::from_static("gemforge", "empty")
}

/// Behavior a socketed gem adds to a weapon.
///
/// Every callback has a neutral default so a power only overrides what it
/// reacts to.
pub trait GemPower: Send + Sync + fmt::Debug {
    /// Whether this is the no-op sentinel
    fn is_empty(&self) -> bool {
        false
    }

    /// Whether this is the upgraded variant of a power
    fn is_greater(&self) -> bool {
        false
    }

    /// Called after the weapon hits `target`
    fn post_hit(
        &self,
        _stack: &ItemStack,
        _target: &mut dyn LivingEntity,
        _attacker: &mut dyn LivingEntity,
    ) {
    }

    /// Right-click with the weapon
    fn use_item(
        &self,
        _world: &mut dyn World,
        _user: &mut dyn Player,
        _hand: Hand,
        stack: &ItemStack,
    ) -> TypedActionResult<ItemStack> {
        TypedActionResult::pass(stack.clone())
    }

    /// Every tick while the weapon is being used
    fn usage_tick(
        &self,
        _world: &mut dyn World,
        _user: &mut dyn LivingEntity,
        _stack: &ItemStack,
        _remaining_use_ticks: u32,
    ) {
    }

    /// When the user releases the weapon before `max_use_time` runs out
    fn on_stopped_using(
        &self,
        _stack: &ItemStack,
        _world: &mut dyn World,
        _user: &mut dyn LivingEntity,
        _remaining_use_ticks: u32,
    ) {
    }

    /// How many ticks the weapon can be used continuously
    fn max_use_time(&self, _stack: &ItemStack) -> u32 {
        0
    }

    /// Every tick while the weapon sits in an inventory
    fn inventory_tick(
        &self,
        _stack: &ItemStack,
        _world: &mut dyn World,
        _entity: &mut dyn LivingEntity,
        _slot: usize,
        _selected: bool,
    ) {
    }

    /// Lines describing this power
    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        _context: &TooltipContext,
        _tooltip: &mut Vec<Text>,
        _tooltip_type: TooltipType,
        _is_runic: bool,
    ) {
    }
}

/// The sentinel for an unfilled or unsupported socket
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPower;

impl GemPower for EmptyPower {
    fn is_empty(&self) -> bool {
        true
    }
}
