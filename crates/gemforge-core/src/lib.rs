//! Gemforge Core - Engine-facing types shared by the power system
//!
//! This crate provides the small vocabulary the host game and the powers
//! agree on:
//! - Namespaced identifiers used as registry keys
//! - Item stacks, hands, and use-action results
//! - Styled tooltip text
//! - Entity ids and colors

pub mod identifier;
pub mod item;
pub mod text;
pub mod types;

pub use identifier::{Identifier, IdentifierError, DEFAULT_NAMESPACE};
pub use item::{ActionResult, Hand, ItemStack, StatusEffectInstance, TypedActionResult};
pub use text::{Formatting, Style, Text, TextContent, TooltipContext, TooltipType};
pub use types::{Color, EntityId};
