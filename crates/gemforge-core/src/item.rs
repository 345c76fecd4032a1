//! Item stacks, hands, and use-action results

use serde::{Deserialize, Serialize};

use super::identifier::Identifier;

/// Which hand an item is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    MainHand,
    OffHand,
}

/// Outcome of an item use.
///
/// Variants are ordered: a lower variant takes precedence when two
/// outcomes are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionResult {
    Success,
    SuccessNoItemUsed,
    Consume,
    ConsumePartial,
    Pass,
    Fail,
}

/// An action result carrying a value, usually the resulting item stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedActionResult<T> {
    pub result: ActionResult,
    pub value: T,
}

impl<T> TypedActionResult<T> {
    pub fn new(result: ActionResult, value: T) -> Self {
        Self { result, value }
    }

    pub fn success(value: T) -> Self {
        Self::new(ActionResult::Success, value)
    }

    pub fn consume(value: T) -> Self {
        Self::new(ActionResult::Consume, value)
    }

    pub fn pass(value: T) -> Self {
        Self::new(ActionResult::Pass, value)
    }

    pub fn fail(value: T) -> Self {
        Self::new(ActionResult::Fail, value)
    }
}

/// A stack of items as seen by powers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Identifier,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: Identifier, count: u32) -> Self {
        Self { item, count }
    }

    /// The empty stack (`gemforge:air`, count 0)
    pub fn empty() -> Self {
        Self {
            item: Identifier::from_static("gemforge", "air"),
            count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A status effect to apply to a living entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub effect: Identifier,
    pub duration_ticks: u32,
    pub amplifier: u8,
}

impl StatusEffectInstance {
    pub fn new(effect: Identifier, duration_ticks: u32, amplifier: u8) -> Self {
        Self {
            effect,
            duration_ticks,
            amplifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_result_ordering() {
        assert!(ActionResult::Success < ActionResult::SuccessNoItemUsed);
        assert!(ActionResult::SuccessNoItemUsed < ActionResult::Consume);
        assert!(ActionResult::Consume < ActionResult::ConsumePartial);
        assert!(ActionResult::ConsumePartial < ActionResult::Pass);
        assert!(ActionResult::Pass < ActionResult::Fail);
    }

    #[test]
    fn test_empty_stack() {
        let stack = ItemStack::empty();
        assert!(stack.is_empty());
        let sword = ItemStack::new(Identifier::gemforge("iron_sword").unwrap(), 1);
        assert!(!sword.is_empty());
    }
}
