//! Tooltip styles and translation keys shared by the component and powers

use gemforge_core::{Color, Formatting, Style};

pub const GREATER_RUNIC_POWER_KEY: &str = "item.gemforge.greater_runic_power";
pub const GREATER_NETHER_POWER_KEY: &str = "item.gemforge.greater_nether_power";
pub const EMPTY_RUNIC_SLOT_KEY: &str = "item.gemforge.empty_runic_slot";
pub const EMPTY_NETHER_SLOT_KEY: &str = "item.gemforge.empty_nether_slot";

/// Banner style for runic powers
pub fn runic() -> Style {
    Style::EMPTY.with_color(Color::from_hex(0x7B5CD6))
}

/// Banner style for nether powers
pub fn netherfused() -> Style {
    Style::EMPTY.with_color(Color::from_hex(0xD9541E))
}

/// Body text of a power description
pub fn description() -> Style {
    Style::EMPTY.with_formatting(Formatting::Gray)
}
