//! Styled text for tooltips
//!
//! Text is either a literal string or a translation key resolved by the
//! host's language tables. Styling is limited to what tooltips need.

use serde::{Deserialize, Serialize};

use super::types::Color;

/// Named formatting codes with a fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formatting {
    Gray,
    DarkGray,
    Red,
    DarkRed,
    Gold,
    Aqua,
    LightPurple,
    DarkPurple,
    Bold,
    Italic,
}

impl Formatting {
    /// Palette color, `None` for pure modifiers
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Gray => Some(Color::from_hex(0xAAAAAA)),
            Self::DarkGray => Some(Color::from_hex(0x555555)),
            Self::Red => Some(Color::from_hex(0xFF5555)),
            Self::DarkRed => Some(Color::from_hex(0xAA0000)),
            Self::Gold => Some(Color::from_hex(0xFFAA00)),
            Self::Aqua => Some(Color::from_hex(0x55FFFF)),
            Self::LightPurple => Some(Color::from_hex(0xFF55FF)),
            Self::DarkPurple => Some(Color::from_hex(0xAA00AA)),
            Self::Bold | Self::Italic => None,
        }
    }
}

/// Text style
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub const EMPTY: Style = Style {
        color: None,
        bold: false,
        italic: false,
    };

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Apply a formatting code on top of this style
    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        match formatting {
            Formatting::Bold => self.bold = true,
            Formatting::Italic => self.italic = true,
            other => self.color = other.color(),
        }
        self
    }
}

/// What a line of text says
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextContent {
    Literal(String),
    Translatable { key: String, args: Vec<String> },
}

/// A single styled line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: TextContent,
    pub style: Style,
}

impl Text {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            content: TextContent::Literal(text.into()),
            style: Style::EMPTY,
        }
    }

    pub fn translatable(key: impl Into<String>) -> Self {
        Self::translatable_with(key, Vec::new())
    }

    pub fn translatable_with(key: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            content: TextContent::Translatable {
                key: key.into(),
                args,
            },
            style: Style::EMPTY,
        }
    }

    /// An empty literal, used to separate tooltip sections
    pub fn blank() -> Self {
        Self::literal("")
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn formatted(mut self, formatting: Formatting) -> Self {
        self.style = self.style.with_formatting(formatting);
        self
    }

    /// Whether this is an empty literal
    pub fn is_blank(&self) -> bool {
        matches!(&self.content, TextContent::Literal(s) if s.is_empty())
    }

    /// Translation key, if this is translatable text
    pub fn key(&self) -> Option<&str> {
        match &self.content {
            TextContent::Translatable { key, .. } => Some(key),
            TextContent::Literal(_) => None,
        }
    }

    /// Untranslated rendering: literals as-is, keys with their arguments
    pub fn plain(&self) -> String {
        match &self.content {
            TextContent::Literal(s) => s.clone(),
            TextContent::Translatable { key, args } if args.is_empty() => key.clone(),
            TextContent::Translatable { key, args } => format!("{} [{}]", key, args.join(", ")),
        }
    }
}

/// Whether the player asked for advanced tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TooltipType {
    #[default]
    Basic,
    Advanced,
}

impl TooltipType {
    pub fn is_advanced(self) -> bool {
        self == Self::Advanced
    }
}

/// Host-provided context while building a tooltip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipContext {
    /// Simulation ticks per second, for converting tick counts to seconds
    pub tick_rate: f32,
}

impl TooltipContext {
    pub fn ticks_to_seconds(&self, ticks: u32) -> f32 {
        ticks as f32 / self.tick_rate
    }
}

impl Default for TooltipContext {
    fn default() -> Self {
        Self { tick_rate: 20.0 }
    }
}
