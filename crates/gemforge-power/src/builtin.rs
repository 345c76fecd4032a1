//! Builtin powers
//!
//! Runic powers live under `gemforge:runic/...`, nether powers under
//! `gemforge:nether/...`, so socket fillers can pick by path prefix.

use gemforge_core::{
    Formatting, Hand, Identifier, ItemStack, StatusEffectInstance, Style, Text, TooltipContext,
    TooltipType, TypedActionResult,
};
use tracing::debug;

use crate::error::PowerError;
use crate::host::{LivingEntity, Player, World};
use crate::power::GemPower;
use crate::registry::{PowerEntry, PowerRegistry};
use crate::styles;

pub const RUNIC_PREFIX: &str = "runic/";
pub const NETHER_PREFIX: &str = "nether/";

/// Whether `key` names a power meant for the runic socket
pub fn is_runic_key(key: &Identifier) -> bool {
    key.path().starts_with(RUNIC_PREFIX)
}

/// Whether `key` names a power meant for the nether socket
pub fn is_nether_key(key: &Identifier) -> bool {
    key.path().starts_with(NETHER_PREFIX)
}

/// Tooltip key for a power, shared by its lesser and greater variants
fn power_key(name: &'static str) -> String {
    Identifier::from_static("gemforge", name).translation_key("power")
}

fn power_name(name: &'static str, style: Style) -> Text {
    Text::translatable(power_key(name)).with_style(style)
}

fn power_description(name: &'static str, args: Vec<String>) -> Text {
    Text::translatable_with(format!("{}.description", power_key(name)), args)
        .with_style(styles::description())
}

/// Sets struck targets on fire
#[derive(Debug, Clone)]
pub struct Ignite {
    fire_seconds: u32,
    greater: bool,
}

impl Ignite {
    pub fn new() -> Self {
        Self {
            fire_seconds: 3,
            greater: false,
        }
    }

    pub fn greater() -> Self {
        Self {
            fire_seconds: 6,
            greater: true,
        }
    }
}

impl Default for Ignite {
    fn default() -> Self {
        Self::new()
    }
}

impl GemPower for Ignite {
    fn is_greater(&self) -> bool {
        self.greater
    }

    fn post_hit(
        &self,
        _stack: &ItemStack,
        target: &mut dyn LivingEntity,
        _attacker: &mut dyn LivingEntity,
    ) {
        target.set_on_fire_for(self.fire_seconds);
    }

    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        _context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        _tooltip_type: TooltipType,
        _is_runic: bool,
    ) {
        tooltip.push(power_name("ignite", styles::runic()));
        tooltip.push(power_description("ignite", vec![self.fire_seconds.to_string()]));
    }
}

/// Heals the attacker by a share of its max health on every hit
#[derive(Debug, Clone)]
pub struct SoulSiphon {
    heal_fraction: f32,
}

impl SoulSiphon {
    pub fn new() -> Self {
        Self { heal_fraction: 0.05 }
    }
}

impl Default for SoulSiphon {
    fn default() -> Self {
        Self::new()
    }
}

impl GemPower for SoulSiphon {
    fn post_hit(
        &self,
        _stack: &ItemStack,
        _target: &mut dyn LivingEntity,
        attacker: &mut dyn LivingEntity,
    ) {
        let amount = attacker.max_health() * self.heal_fraction;
        attacker.heal(amount);
    }

    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        _context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        tooltip_type: TooltipType,
        _is_runic: bool,
    ) {
        tooltip.push(power_name("soul_siphon", styles::netherfused()));
        let percent = (self.heal_fraction * 100.0).round() as u32;
        tooltip.push(power_description("soul_siphon", vec![percent.to_string()]));
        if tooltip_type.is_advanced() {
            tooltip.push(Text::translatable(format!("{}.note", power_key("soul_siphon"))).formatted(Formatting::DarkGray));
        }
    }
}

/// Slows struck targets
#[derive(Debug, Clone)]
pub struct FrostBite {
    duration_ticks: u32,
    amplifier: u8,
    greater: bool,
}

impl FrostBite {
    pub fn new() -> Self {
        Self {
            duration_ticks: 60,
            amplifier: 0,
            greater: false,
        }
    }

    pub fn greater() -> Self {
        Self {
            duration_ticks: 100,
            amplifier: 1,
            greater: true,
        }
    }
}

impl Default for FrostBite {
    fn default() -> Self {
        Self::new()
    }
}

impl GemPower for FrostBite {
    fn is_greater(&self) -> bool {
        self.greater
    }

    fn post_hit(
        &self,
        _stack: &ItemStack,
        target: &mut dyn LivingEntity,
        _attacker: &mut dyn LivingEntity,
    ) {
        target.add_status_effect(StatusEffectInstance::new(
            Identifier::from_static("gemforge", "slowness"),
            self.duration_ticks,
            self.amplifier,
        ));
    }

    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        _tooltip_type: TooltipType,
        _is_runic: bool,
    ) {
        tooltip.push(power_name("frost_bite", styles::netherfused()));
        let seconds = context.ticks_to_seconds(self.duration_ticks);
        tooltip.push(power_description(
            "frost_bite",
            vec![format!("{}", self.amplifier + 1), format!("{:.1}", seconds)],
        ));
    }
}

/// Raise the weapon as a ward: resistance while held, a small heal on release
#[derive(Debug, Clone)]
pub struct Ward {
    cooldown_ticks: u32,
    pulse_interval: u32,
    release_heal: f32,
}

impl Ward {
    pub const MAX_USE_TIME: u32 = 72000;

    pub fn new() -> Self {
        Self {
            cooldown_ticks: 100,
            pulse_interval: 20,
            release_heal: 2.0,
        }
    }
}

impl Default for Ward {
    fn default() -> Self {
        Self::new()
    }
}

impl GemPower for Ward {
    fn use_item(
        &self,
        _world: &mut dyn World,
        user: &mut dyn Player,
        hand: Hand,
        stack: &ItemStack,
    ) -> TypedActionResult<ItemStack> {
        if user.cooldown_ticks(&stack.item) > 0 {
            return TypedActionResult::fail(stack.clone());
        }
        user.set_current_hand(hand);
        user.set_cooldown(&stack.item, self.cooldown_ticks);
        TypedActionResult::consume(stack.clone())
    }

    fn usage_tick(
        &self,
        world: &mut dyn World,
        user: &mut dyn LivingEntity,
        _stack: &ItemStack,
        remaining_use_ticks: u32,
    ) {
        if world.is_client() || remaining_use_ticks % self.pulse_interval != 0 {
            return;
        }
        user.add_status_effect(StatusEffectInstance::new(
            Identifier::from_static("gemforge", "resistance"),
            self.pulse_interval + 10,
            0,
        ));
    }

    fn on_stopped_using(
        &self,
        _stack: &ItemStack,
        world: &mut dyn World,
        user: &mut dyn LivingEntity,
        remaining_use_ticks: u32,
    ) {
        let held = Self::MAX_USE_TIME.saturating_sub(remaining_use_ticks);
        if world.is_client() || held < self.pulse_interval {
            return;
        }
        user.heal(self.release_heal);
    }

    fn max_use_time(&self, _stack: &ItemStack) -> u32 {
        Self::MAX_USE_TIME
    }

    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        _tooltip_type: TooltipType,
        _is_runic: bool,
    ) {
        tooltip.push(power_name("ward", styles::runic()));
        tooltip.push(power_description(
            "ward",
            vec![format!("{:.0}", context.ticks_to_seconds(self.cooldown_ticks))],
        ));
    }
}

/// Register every builtin power, returning the new entries in order
pub fn register_builtin(registry: &PowerRegistry) -> Result<Vec<PowerEntry>, PowerError> {
    let entries = vec![
        registry.register(Identifier::from_static("gemforge", "runic/ignite"), Ignite::new())?,
        registry.register(Identifier::from_static("gemforge", "runic/greater_ignite"), Ignite::greater())?,
        registry.register(Identifier::from_static("gemforge", "runic/ward"), Ward::new())?,
        registry.register(Identifier::from_static("gemforge", "nether/soul_siphon"), SoulSiphon::new())?,
        registry.register(Identifier::from_static("gemforge", "nether/frost_bite"), FrostBite::new())?,
        registry.register(Identifier::from_static("gemforge", "nether/greater_frost_bite"), FrostBite::greater())?,
    ];
    debug!("Registered {} builtin powers", entries.len());
    Ok(entries)
}
