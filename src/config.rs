use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ui::theme::{serde_color, Theme};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Glyph prefixed to each choice
    pub choice_bullet: String,
    /// Glyph prefixed to the highlighted choice
    pub selected_bullet: String,
    /// Left indent of paragraph text, in columns
    pub paragraph_indent: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preset name: "dusk", "parchment", "nord"
    pub preset: String,
    /// Individual color overrides applied on top of the preset
    #[serde(deserialize_with = "serde_color::deserialize_option", skip_serializing)]
    pub background: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option", skip_serializing)]
    pub foreground: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option", skip_serializing)]
    pub accent: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option", skip_serializing)]
    pub dimmed: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appearance: AppearanceConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            choice_bullet: "• ".to_string(),
            selected_bullet: "❯ ".to_string(),
            paragraph_indent: 2,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "dusk".to_string(),
            background: None,
            foreground: None,
            accent: None,
            dimmed: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Build the active theme: preset plus any color overrides
    pub fn resolve_theme(&self) -> Theme {
        let mut theme = Theme::from_preset(&self.theme.preset).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset '{}', using default", self.theme.preset);
            Theme::default()
        });

        if let Some(c) = self.theme.background {
            theme.background = c;
        }
        if let Some(c) = self.theme.foreground {
            theme.foreground = c;
        }
        if let Some(c) = self.theme.accent {
            theme.accent = c;
        }
        if let Some(c) = self.theme.dimmed {
            theme.dimmed = c;
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme.preset, "dusk");
        assert_eq!(config.appearance.paragraph_indent, 2);
        assert_eq!(config.appearance.choice_bullet, "• ");
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [appearance]
            paragraph_indent = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.appearance.paragraph_indent, 4);
        // Unspecified sections fall back to defaults
        assert_eq!(config.theme.preset, "dusk");
    }

    #[test]
    fn test_theme_override() {
        let config: Config = toml::from_str(
            r##"
            [theme]
            preset = "nord"
            accent = "#ff0000"
            "##,
        )
        .unwrap();

        let theme = config.resolve_theme();
        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
        // The rest of the preset is untouched
        assert_eq!(theme.background, Theme::nord().background);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let config: Config = toml::from_str(
            r#"
            [theme]
            preset = "no-such-theme"
            "#,
        )
        .unwrap();
        let theme = config.resolve_theme();
        assert_eq!(theme.background, Theme::dusk().background);
    }

    #[test]
    fn test_bad_color_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r##"
            [theme]
            accent = "#zzz"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_ascii_color_rejected() {
        // Two fullwidth chars are 6 bytes; must produce a parse error, not
        // a slicing panic
        let result: Result<Config, _> = toml::from_str(
            r##"
            [theme]
            accent = "ａｂ"
            "##,
        );
        assert!(result.is_err());
    }
}
