//! Gemforge Power - Socketed gem powers for weapons
//!
//! A weapon may expose a runic and a nether socket. Each socket holds a
//! [`GemPower`] looked up through a [`PowerRegistry`]; absence is the empty
//! sentinel power, never `None`. [`GemPowerComponent`] is the immutable
//! per-stack record that routes host item callbacks to both powers.

pub mod builtin;
pub mod codec;
pub mod component;
pub mod error;
pub mod host;
pub mod power;
pub mod registry;
pub mod styles;

#[cfg(test)]
pub(crate) mod test_support;

pub use builtin::register_builtin;
pub use codec::GemPowerRecord;
pub use component::GemPowerComponent;
pub use error::{CodecError, PowerError};
pub use host::{LivingEntity, Player, World};
pub use power::{empty_power_id, EmptyPower, GemPower};
pub use registry::{PowerEntry, PowerRegistry};
