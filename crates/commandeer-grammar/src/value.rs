//! Typed argument values.

use std::fmt;

use chrono::Duration;
use smallvec::SmallVec;

use crate::color::ChatColor;

/// Converted argument array. Most commands take a handful of arguments, so
/// the storage is inline up to eight values.
pub type ValueList = SmallVec<[ArgValue; 8]>;

/// One converted argument.
///
/// Exactly one variant per [`ArgType`](crate::ArgType); fixed literals and
/// unconverted text both land in `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Raw token text.
    Text(String),
    /// A base-10 signed integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A parsed duration.
    Duration(Duration),
    /// A chat color or display attribute.
    Color(ChatColor),
}

impl ArgValue {
    /// The text, if this value is `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer, if this value is `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this value is `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The duration, if this value is `Duration`.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// The color, if this value is `Color`.
    pub fn as_color(&self) -> Option<ChatColor> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Short lowercase label for log fields.
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Duration(_) => "duration",
            Self::Color(_) => "color",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Duration(d) => write!(f, "{}m", d.num_minutes()),
            Self::Color(c) => f.write_str(c.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(ArgValue::Text("x".into()).as_str(), Some("x"));
        assert_eq!(ArgValue::Int(7).as_int(), Some(7));
        assert_eq!(ArgValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ArgValue::Int(7).as_str(), None);
        assert_eq!(
            ArgValue::Color(ChatColor::Red).as_color(),
            Some(ChatColor::Red)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ArgValue::Text("price".into()).to_string(), "price");
        assert_eq!(ArgValue::Int(-3).to_string(), "-3");
        assert_eq!(ArgValue::Bool(false).to_string(), "false");
        assert_eq!(ArgValue::Color(ChatColor::Gold).to_string(), "gold");
    }
}
