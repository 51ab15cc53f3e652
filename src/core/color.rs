//! Display palette for state glyphs.
//!
//! Each [`Color`] maps to an ANSI SGR foreground escape. `Color::Default` is
//! the neutral reset marker that closes every rendered glyph.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Terminal foreground color.
///
/// Note that `Color::Default` is the *neutral* palette member (SGR reset),
/// not the color a state gets when none is given. That one is
/// [`Color::FALLBACK`] (`White`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Every palette member, in declaration order.
    pub const ALL: [Color; 17] = [
        Color::Default,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    /// Color used when a state is created without one.
    pub const FALLBACK: Color = Color::White;

    /// The escape sequence that switches the terminal to this color.
    #[must_use]
    pub const fn escape(self) -> &'static str {
        match self {
            Color::Default => "\x1b[0m",
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::BrightBlack => "\x1b[90m",
            Color::BrightRed => "\x1b[91m",
            Color::BrightGreen => "\x1b[92m",
            Color::BrightYellow => "\x1b[93m",
            Color::BrightBlue => "\x1b[94m",
            Color::BrightMagenta => "\x1b[95m",
            Color::BrightCyan => "\x1b[96m",
            Color::BrightWhite => "\x1b[97m",
        }
    }

    /// Canonical name, as accepted by `FromStr` and written by serde.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Default => "Default",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
            Color::Magenta => "Magenta",
            Color::Cyan => "Cyan",
            Color::White => "White",
            Color::BrightBlack => "BrightBlack",
            Color::BrightRed => "BrightRed",
            Color::BrightGreen => "BrightGreen",
            Color::BrightYellow => "BrightYellow",
            Color::BrightBlue => "BrightBlue",
            Color::BrightMagenta => "BrightMagenta",
            Color::BrightCyan => "BrightCyan",
            Color::BrightWhite => "BrightWhite",
        }
    }

    /// Look up a palette member by its raw escape sequence.
    ///
    /// ```
    /// use ca_cell::Color;
    ///
    /// assert_eq!(Color::from_escape("\x1b[31m"), Ok(Color::Red));
    /// assert!(Color::from_escape("\x1b[38;5;208m").is_err());
    /// ```
    pub fn from_escape(escape: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|c| c.escape() == escape)
            .ok_or_else(|| ValidationError::UnknownColor(escape.to_string()))
    }
}

/// Parses a color name. Case-insensitive; `_` and `-` separators are ignored,
/// so `"BrightRed"`, `"bright_red"` and `"bright-red"` are the same color.
impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|c| c.name().to_ascii_lowercase() == folded)
            .ok_or_else(|| ValidationError::UnknownColor(s.to_string()))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
