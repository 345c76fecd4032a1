//! Mock host and power used by unit tests

use std::collections::HashMap;
use std::sync::Arc;

use gemforge_core::{
    ActionResult, EntityId, Hand, Identifier, ItemStack, StatusEffectInstance, Text,
    TooltipContext, TooltipType, TypedActionResult,
};
use parking_lot::Mutex;

use crate::host::{LivingEntity, Player, World};
use crate::power::GemPower;

pub fn id(path: &str) -> Identifier {
    Identifier::gemforge(path).unwrap()
}

pub fn sword() -> ItemStack {
    ItemStack::new(id("iron_sword"), 1)
}

#[derive(Debug, Default)]
pub struct TestWorld {
    pub client: bool,
}

impl World for TestWorld {
    fn is_client(&self) -> bool {
        self.client
    }
}

#[derive(Debug)]
pub struct TestEntity {
    pub id: EntityId,
    pub health: f32,
    pub max_health: f32,
    pub effects: Vec<StatusEffectInstance>,
    pub fire_seconds: u32,
}

impl TestEntity {
    pub fn with_health(health: f32, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            health,
            max_health,
            effects: Vec::new(),
            fire_seconds: 0,
        }
    }
}

impl Default for TestEntity {
    fn default() -> Self {
        Self::with_health(20.0, 20.0)
    }
}

impl LivingEntity for TestEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    fn damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        true
    }

    fn add_status_effect(&mut self, effect: StatusEffectInstance) {
        self.effects.push(effect);
    }

    fn set_on_fire_for(&mut self, seconds: u32) {
        self.fire_seconds = seconds;
    }
}

#[derive(Debug, Default)]
pub struct TestPlayer {
    pub entity: TestEntity,
    pub main_hand: Option<ItemStack>,
    pub current_hand: Option<Hand>,
    pub cooldowns: HashMap<Identifier, u32>,
}

impl TestPlayer {
    pub fn holding(stack: ItemStack) -> Self {
        Self {
            main_hand: Some(stack),
            ..Default::default()
        }
    }
}

impl LivingEntity for TestPlayer {
    fn id(&self) -> EntityId {
        self.entity.id()
    }

    fn health(&self) -> f32 {
        self.entity.health()
    }

    fn max_health(&self) -> f32 {
        self.entity.max_health()
    }

    fn heal(&mut self, amount: f32) {
        self.entity.heal(amount)
    }

    fn damage(&mut self, amount: f32) -> bool {
        self.entity.damage(amount)
    }

    fn add_status_effect(&mut self, effect: StatusEffectInstance) {
        self.entity.add_status_effect(effect)
    }

    fn set_on_fire_for(&mut self, seconds: u32) {
        self.entity.set_on_fire_for(seconds)
    }
}

impl Player for TestPlayer {
    fn stack_in_hand(&self, hand: Hand) -> ItemStack {
        match (hand, &self.main_hand) {
            (Hand::MainHand, Some(stack)) => stack.clone(),
            _ => ItemStack::empty(),
        }
    }

    fn set_current_hand(&mut self, hand: Hand) {
        self.current_hand = Some(hand);
    }

    fn cooldown_ticks(&self, item: &Identifier) -> u32 {
        self.cooldowns.get(item).copied().unwrap_or(0)
    }

    fn set_cooldown(&mut self, item: &Identifier, ticks: u32) {
        self.cooldowns.insert(item.clone(), ticks);
    }
}

/// Shared record of which power saw which callback
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Power that records every callback and returns scripted values
#[derive(Debug)]
pub struct MarkerPower {
    pub name: String,
    pub greater: bool,
    pub use_result: ActionResult,
    pub max_use_time: u32,
    pub log: CallLog,
}

impl MarkerPower {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            greater: false,
            use_result: ActionResult::Pass,
            max_use_time: 0,
            log: CallLog::default(),
        }
    }

    pub fn greater(mut self) -> Self {
        self.greater = true;
        self
    }

    pub fn using(mut self, result: ActionResult) -> Self {
        self.use_result = result;
        self
    }

    pub fn lasting(mut self, ticks: u32) -> Self {
        self.max_use_time = ticks;
        self
    }

    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = Arc::clone(log);
        self
    }

    fn record(&self, call: &str) {
        self.log.lock().push(format!("{}:{}", self.name, call));
    }
}

impl GemPower for MarkerPower {
    fn is_greater(&self) -> bool {
        self.greater
    }

    fn post_hit(
        &self,
        _stack: &ItemStack,
        _target: &mut dyn LivingEntity,
        _attacker: &mut dyn LivingEntity,
    ) {
        self.record("post_hit");
    }

    fn use_item(
        &self,
        _world: &mut dyn World,
        _user: &mut dyn Player,
        _hand: Hand,
        stack: &ItemStack,
    ) -> TypedActionResult<ItemStack> {
        self.record("use");
        // Tag the returned stack so tests can tell which result won
        let tagged = ItemStack::new(id(&self.name), stack.count);
        TypedActionResult::new(self.use_result, tagged)
    }

    fn usage_tick(
        &self,
        _world: &mut dyn World,
        _user: &mut dyn LivingEntity,
        _stack: &ItemStack,
        remaining_use_ticks: u32,
    ) {
        self.record(&format!("usage_tick({})", remaining_use_ticks));
    }

    fn on_stopped_using(
        &self,
        _stack: &ItemStack,
        _world: &mut dyn World,
        _user: &mut dyn LivingEntity,
        remaining_use_ticks: u32,
    ) {
        self.record(&format!("stopped({})", remaining_use_ticks));
    }

    fn max_use_time(&self, _stack: &ItemStack) -> u32 {
        self.max_use_time
    }

    fn inventory_tick(
        &self,
        _stack: &ItemStack,
        _world: &mut dyn World,
        _entity: &mut dyn LivingEntity,
        slot: usize,
        selected: bool,
    ) {
        self.record(&format!("inventory_tick({}, {})", slot, selected));
    }

    fn append_tooltip(
        &self,
        _stack: &ItemStack,
        _context: &TooltipContext,
        tooltip: &mut Vec<Text>,
        _tooltip_type: TooltipType,
        is_runic: bool,
    ) {
        tooltip.push(Text::literal(format!("{} (runic={})", self.name, is_runic)));
    }
}
