//! Theme system for the reader.
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Built-in presets (dusk, parchment, nord)
//! - Hex color parsing for config overrides

use ratatui::style::Color;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Narrative text color
    pub foreground: Color,
    /// Dimmed text (unresolved paragraphs, hints)
    pub dimmed: Color,
    /// Accent color (borders, title)
    pub accent: Color,
    /// Horizontal rule drawn for hard paragraph breaks
    pub rule: Color,
    /// Choice text color
    pub choice: Color,
    /// Background of the highlighted choice
    pub choice_selected_bg: Color,
    /// Text color of the highlighted choice
    pub choice_selected_fg: Color,
    /// Status bar text color
    pub status: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dusk()
    }
}

impl Theme {
    /// Dusk theme - default dark palette
    pub fn dusk() -> Self {
        Self {
            background: Color::Rgb(16, 18, 26),            // #10121a
            foreground: Color::Rgb(214, 219, 230),         // #d6dbe6
            dimmed: Color::Rgb(122, 130, 148),             // #7a8294
            accent: Color::Rgb(196, 130, 61),              // #c4823d
            rule: Color::Rgb(74, 80, 96),                  // #4a5060
            choice: Color::Rgb(167, 192, 222),             // #a7c0de
            choice_selected_bg: Color::Rgb(34, 42, 60),    // #222a3c
            choice_selected_fg: Color::Rgb(229, 234, 241), // #e5eaf1
            status: Color::Rgb(122, 130, 148),             // #7a8294
        }
    }

    /// Parchment theme - light, book-like
    pub fn parchment() -> Self {
        Self {
            background: Color::Rgb(243, 237, 221),         // #f3eddd
            foreground: Color::Rgb(56, 48, 38),            // #383026
            dimmed: Color::Rgb(139, 128, 110),             // #8b806e
            accent: Color::Rgb(146, 64, 14),               // #92400e
            rule: Color::Rgb(184, 172, 148),               // #b8ac94
            choice: Color::Rgb(82, 96, 130),               // #526082
            choice_selected_bg: Color::Rgb(224, 214, 190), // #e0d6be
            choice_selected_fg: Color::Rgb(40, 34, 26),    // #28221a
            status: Color::Rgb(139, 128, 110),             // #8b806e
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),            // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),         // #eceff4 (nord6)
            dimmed: Color::Rgb(76, 86, 106),               // #4c566a (nord3)
            accent: Color::Rgb(136, 192, 208),             // #88c0d0 (nord8)
            rule: Color::Rgb(67, 76, 94),                  // #434c5e (nord2)
            choice: Color::Rgb(129, 161, 193),             // #81a1c1 (nord9)
            choice_selected_bg: Color::Rgb(67, 76, 94),    // #434c5e (nord2)
            choice_selected_fg: Color::Rgb(236, 239, 244), // #eceff4 (nord6)
            status: Color::Rgb(216, 222, 233),             // #d8dee9 (nord4)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dusk" | "default" => Some(Self::dusk()),
            "parchment" | "light" => Some(Self::parchment()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb, #rrggbbaa (alpha ignored)
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    // Byte-indexed slicing below; multi-byte input can never be valid hex
    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    match s.len() {
        // #rgb -> #rrggbb
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[1..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[2..3], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r * 17, g * 17, b * 17))
        }
        // #rrggbb and #rrggbbaa (alpha ignored for TUI)
        6 | 8 => {
            let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r, g, b))
        }
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    InvalidLength,
    InvalidHex,
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidLength => {
                write!(f, "invalid color length (expected 3, 6, or 8 hex chars)")
            }
            ColorError::InvalidHex => write!(f, "invalid hex character"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Serde deserializer for hex colors in config files
pub mod serde_color {
    use super::*;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            Some(s) => parse_hex_color(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#10121a"), Ok(Color::Rgb(16, 18, 26)));
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Ok(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_8_ignores_alpha() {
        assert_eq!(parse_hex_color("#ff0000ff"), Ok(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(parse_hex_color("invalid").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ff00").is_err());
    }

    #[test]
    fn test_parse_hex_non_ascii() {
        // 6 bytes but 2 chars; must error rather than panic on a
        // non-char-boundary slice
        assert_eq!(parse_hex_color("ａｂ"), Err(ColorError::InvalidHex));
        assert_eq!(parse_hex_color("#ａｂ"), Err(ColorError::InvalidHex));
    }

    #[test]
    fn test_presets() {
        assert!(Theme::from_preset("dusk").is_some());
        assert!(Theme::from_preset("parchment").is_some());
        assert!(Theme::from_preset("nord").is_some());
        assert!(Theme::from_preset("nonexistent").is_none());
    }
}
