//! Hex color representation

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An opaque RGB color, parsed from and formatted as `#RRGGBB`.
///
/// Colors arriving from workbooks and preference documents are hex strings;
/// they are validated once at the boundary and carried as this value type from
/// then on. Formatting is canonical: uppercase hex with a leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse from a hex string (e.g., "#FF0000" or "ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Fallback used wherever a lookup misses: axis ticks for out-of-domain
    /// scores, unset embedded cells, non-numeric values.
    pub const NEUTRAL: Color = Color::rgb(0, 0, 0);

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#1f77b4"), Some(Color::rgb(31, 119, 180)));
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!(Color::from_hex("#1f77b4").unwrap().to_string(), "#1F77B4");
        assert_eq!(Color::NEUTRAL.to_string(), "#000000");
    }

    #[test]
    fn test_from_str_error() {
        assert!("not-a-color".parse::<Color>().is_err());
        assert_eq!("#4B0082".parse::<Color>().unwrap(), Color::rgb(75, 0, 130));
    }
}
