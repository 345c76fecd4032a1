//! Per-stack gem power component
//!
//! Records which sockets a weapon has and which power sits in each, and
//! forwards the host's item callbacks to both powers, runic first.

use gemforge_core::{
    Formatting, Hand, ItemStack, Text, TooltipContext, TooltipType, TypedActionResult,
};
use tracing::{trace, warn};

use crate::host::{LivingEntity, Player, World};
use crate::registry::PowerEntry;
use crate::styles;

/// Socket layout and socketed powers of one item stack.
///
/// Immutable: every transform returns a new component. A cleared socket
/// flag pairs with the empty sentinel power.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GemPowerComponent {
    has_runic_power: bool,
    has_nether_power: bool,
    runic_power: PowerEntry,
    nether_power: PowerEntry,
}

impl GemPowerComponent {
    /// Raw constructor; does not check flags against powers
    pub fn new(
        has_runic_power: bool,
        has_nether_power: bool,
        runic_power: PowerEntry,
        nether_power: PowerEntry,
    ) -> Self {
        Self {
            has_runic_power,
            has_nether_power,
            runic_power,
            nether_power,
        }
    }

    /// Runic socket holding `power`, no nether socket
    pub fn runic(power: PowerEntry) -> Self {
        Self::new(true, false, power, PowerEntry::empty())
    }

    /// Nether socket holding `power`, no runic socket
    pub fn nether(power: PowerEntry) -> Self {
        Self::new(false, true, PowerEntry::empty(), power)
    }

    /// A socket exists for each power given
    pub fn create(runic: Option<PowerEntry>, nether: Option<PowerEntry>) -> Self {
        Self::new(
            runic.is_some(),
            nether.is_some(),
            runic.unwrap_or_else(PowerEntry::empty),
            nether.unwrap_or_else(PowerEntry::empty),
        )
    }

    /// Sockets without powers, to be filled later
    pub fn create_empty(has_runic: bool, has_nether: bool) -> Self {
        Self::new(has_runic, has_nether, PowerEntry::empty(), PowerEntry::empty())
    }

    pub fn has_runic_power(&self) -> bool {
        self.has_runic_power
    }

    pub fn has_nether_power(&self) -> bool {
        self.has_nether_power
    }

    pub fn runic_power(&self) -> &PowerEntry {
        &self.runic_power
    }

    pub fn nether_power(&self) -> &PowerEntry {
        &self.nether_power
    }

    /// New component with each slot's power replaced by its filler's output.
    ///
    /// Fillers receive the slot flag and the current power. Flags are kept.
    pub fn fill<R, N>(&self, runic_filler: R, nether_filler: N) -> Self
    where
        R: FnOnce(bool, &PowerEntry) -> PowerEntry,
        N: FnOnce(bool, &PowerEntry) -> PowerEntry,
    {
        let runic = runic_filler(self.has_runic_power, &self.runic_power);
        let nether = nether_filler(self.has_nether_power, &self.nether_power);
        if !self.has_runic_power && !runic.is_empty() {
            warn!("Filled runic power {} into an item without a runic socket", runic.key());
        }
        if !self.has_nether_power && !nether.is_empty() {
            warn!("Filled nether power {} into an item without a nether socket", nether.key());
        }
        Self::new(self.has_runic_power, self.has_nether_power, runic, nether)
    }

    /// Whether the item has any socket, filled or not
    pub fn can_be_filled(&self) -> bool {
        self.has_runic_power || self.has_nether_power
    }

    /// Whether both slots hold the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.runic_power.is_empty() && self.nether_power.is_empty()
    }

    pub fn post_hit(
        &self,
        stack: &ItemStack,
        target: &mut dyn LivingEntity,
        attacker: &mut dyn LivingEntity,
    ) {
        self.runic_power.value().post_hit(stack, target, attacker);
        self.nether_power.value().post_hit(stack, target, attacker);
    }

    /// Use the item held in `hand`.
    ///
    /// Both powers run. The runic result wins only if its action result
    /// orders strictly before the nether one.
    pub fn use_item(
        &self,
        world: &mut dyn World,
        user: &mut dyn Player,
        hand: Hand,
    ) -> TypedActionResult<ItemStack> {
        let stack = user.stack_in_hand(hand);
        let runic = self.runic_power.value().use_item(world, user, hand, &stack);
        let nether = self.nether_power.value().use_item(world, user, hand, &stack);
        trace!(
            "use: runic {:?} ({}), nether {:?} ({})",
            runic.result,
            self.runic_power.key(),
            nether.result,
            self.nether_power.key()
        );
        if runic.result < nether.result {
            runic
        } else {
            nether
        }
    }

    pub fn usage_tick(
        &self,
        world: &mut dyn World,
        user: &mut dyn LivingEntity,
        stack: &ItemStack,
        remaining_use_ticks: u32,
    ) {
        self.runic_power
            .value()
            .usage_tick(world, user, stack, remaining_use_ticks);
        self.nether_power
            .value()
            .usage_tick(world, user, stack, remaining_use_ticks);
    }

    pub fn on_stopped_using(
        &self,
        stack: &ItemStack,
        world: &mut dyn World,
        user: &mut dyn LivingEntity,
        remaining_use_ticks: u32,
    ) {
        self.runic_power
            .value()
            .on_stopped_using(stack, world, user, remaining_use_ticks);
        self.nether_power
            .value()
            .on_stopped_using(stack, world, user, remaining_use_ticks);
    }

    /// The longer of the two powers' use durations
    pub fn max_use_time(&self, stack: &ItemStack) -> u32 {
        self.runic_power
            .value()
            .max_use_time(stack)
            .max(self.nether_power.value().max_use_time(stack))
    }

    pub fn inventory_tick(
        &self,
        stack: &ItemStack,
        world: &mut dyn World,
        entity: &mut dyn LivingEntity,
        slot: usize,
        selected: bool,
    ) {
        self.runic_power
            .value()
            .inventory_tick(stack, world, entity, slot, selected);
        self.nether_power
            .value()
            .inventory_tick(stack, world, entity, slot, selected);
    }

    /// Tooltip for the item itself, including empty-socket hints
    pub fn append_tooltip(
        &self,
        stack: &ItemStack,
        context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        tooltip_type: TooltipType,
    ) {
        self.append_tooltip_for(stack, context, tooltip, tooltip_type, false);
    }

    /// Tooltip with an explicit `is_runic` flag.
    ///
    /// `is_runic` is set when describing a loose gem rather than a weapon;
    /// empty-socket hints are then left out.
    pub fn append_tooltip_for(
        &self,
        stack: &ItemStack,
        context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        tooltip_type: TooltipType,
        is_runic: bool,
    ) {
        let runic = self.runic_power.value();
        let nether = self.nether_power.value();

        if runic.is_greater() {
            tooltip.push(Text::translatable(styles::GREATER_RUNIC_POWER_KEY).with_style(styles::runic()));
        }
        if !runic.is_empty() {
            runic.append_tooltip(stack, context, tooltip, tooltip_type, is_runic);
            if !nether.is_empty() {
                tooltip.push(Text::blank());
            }
        } else if !is_runic && self.has_runic_power {
            tooltip.push(Text::translatable(styles::EMPTY_RUNIC_SLOT_KEY).formatted(Formatting::Gray));
        }

        if nether.is_greater() {
            tooltip.push(
                Text::translatable(styles::GREATER_NETHER_POWER_KEY).with_style(styles::netherfused()),
            );
        }
        if !nether.is_empty() {
            nether.append_tooltip(stack, context, tooltip, tooltip_type, is_runic);
        } else if !is_runic && self.has_nether_power {
            tooltip.push(Text::translatable(styles::EMPTY_NETHER_SLOT_KEY).formatted(Formatting::Gray));
        }
    }
}

impl Default for GemPowerComponent {
    fn default() -> Self {
        Self::create_empty(false, false)
    }
}
