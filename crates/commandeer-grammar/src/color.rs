//! Chat color and display attribute palette.
//!
//! The palette is fixed: sixteen colors plus six display attributes, each
//! with a single-character code. Lookup is by case-insensitive name or, as
//! a fallback, by code character.

use std::fmt;

/// A chat color or display attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[allow(missing_docs)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

/// Every palette entry, colors first, then display attributes.
pub const PALETTE: [ChatColor; 22] = [
    ChatColor::Black,
    ChatColor::DarkBlue,
    ChatColor::DarkGreen,
    ChatColor::DarkAqua,
    ChatColor::DarkRed,
    ChatColor::DarkPurple,
    ChatColor::Gold,
    ChatColor::Gray,
    ChatColor::DarkGray,
    ChatColor::Blue,
    ChatColor::Green,
    ChatColor::Aqua,
    ChatColor::Red,
    ChatColor::LightPurple,
    ChatColor::Yellow,
    ChatColor::White,
    ChatColor::Obfuscated,
    ChatColor::Bold,
    ChatColor::Strikethrough,
    ChatColor::Underline,
    ChatColor::Italic,
    ChatColor::Reset,
];

impl ChatColor {
    /// The single-character code, `0`-`9`/`a`-`f` for colors and
    /// `k`-`o`/`r` for display attributes.
    pub const fn code(&self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
            Self::Reset => 'r',
        }
    }

    /// The canonical lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Obfuscated => "obfuscated",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underline",
            Self::Italic => "italic",
            Self::Reset => "reset",
        }
    }

    /// Whether this entry is a display attribute rather than a color.
    pub const fn is_format(&self) -> bool {
        matches!(
            self,
            Self::Obfuscated
                | Self::Bold
                | Self::Strikethrough
                | Self::Underline
                | Self::Italic
                | Self::Reset
        )
    }

    /// Look up by case-insensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .copied()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }

    /// Look up by single-character code, case-insensitive.
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        PALETTE.iter().copied().find(|color| color.code() == code)
    }

    /// Name lookup first, single-character code as a fallback.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(color) = Self::from_name(token) {
            return Some(color);
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => None,
        }
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
