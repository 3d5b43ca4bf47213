//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two Catppuccin variants are compiled in; custom
//! themes are read from a file named by the `theme_file` plugin option.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#b4befe"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! category_fg = "#cba6f7"
//! risk_high = "#f38ba8"
//! risk_medium = "#f9e2af"
//! risk_low = "#a6e3a1"
//! badge_fg = "#1e1e2e"
//! admin_badge_bg = "#fab387"
//! action_destructive = "#f38ba8"
//! action_default = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use trustboard::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! # let _ = theme;
//! ```

use crate::domain::error::{DashboardError, Result};
use crate::domain::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, source lines, unselected options.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Failure notices and rejected input.
    pub error_fg: String,

    /// Category headings.
    pub category_fg: String,

    /// Risk badge backgrounds.
    pub risk_high: String,
    pub risk_medium: String,
    pub risk_low: String,
    /// Text drawn on badges.
    pub badge_fg: String,

    pub admin_badge_bg: String,

    /// "Acknowledge & Assign" on high-risk cards.
    pub action_destructive: String,
    /// "Acknowledge & Assign" on other cards.
    pub action_default: String,
}

impl ThemeColors {
    /// Badge color for a risk level. Unrated items share the low-risk color.
    #[must_use]
    pub fn risk(&self, risk: RiskLevel) -> &str {
        match risk {
            RiskLevel::High => &self.risk_high,
            RiskLevel::Medium => &self.risk_medium,
            RiskLevel::Low | RiskLevel::Unrated => &self.risk_low,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Theme`] if the file cannot be read or is not
    /// a complete theme document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DashboardError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            DashboardError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Parses `#rrggbb`, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in default theme.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn unrated_risk_uses_low_color() {
        let colors = Theme::default().colors;
        assert_eq!(colors.risk(RiskLevel::Unrated), colors.risk_low);
        assert_ne!(colors.risk(RiskLevel::High), colors.risk_low);
    }

    #[test]
    fn custom_theme_files_load() {
        let builtin = include_str!("../../themes/catppuccin-mocha.toml");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(builtin.replace("catppuccin-mocha", "ops-night").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "ops-night");
    }

    #[test]
    fn broken_theme_files_are_theme_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(DashboardError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(DashboardError::Theme(_))
        ));
    }

    #[test]
    fn escapes_fall_back_to_white() {
        assert_eq!(Theme::fg("#a6e3a1"), "\u{1b}[38;2;166;227;161m");
        assert_eq!(Theme::bg("nope"), "\u{1b}[48;2;255;255;255m");
    }
}
