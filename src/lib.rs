//! Trustboard: a Zellij plugin dashboard for Trust & Safety operations.
//!
//! Trustboard fetches the latest updates from an HTTP endpoint once per plugin
//! load and presents them as cards:
//! - Free-text title search plus six multi-valued facets and a date range
//! - Results grouped by category in first-seen order
//! - Risk badges and an admin-only "Acknowledge & Assign" control
//! - Feed decoding on a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and actions                       │
//! │  - Filter state, memoized derived view              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Domain Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (domain/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - Feed decode │   │ - Decoding    │
//! │ - Theming     │   │ - Filtering   │   │ - IPC bridge  │
//! │ - Components  │   │ - Grouping    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure (infrastructure/)                   │
//! │  - Sandbox paths, feed request construction         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Updates, filters, grouping, errors
//! - [`infrastructure`]: Sandbox paths and the feed request
//! - [`worker`]: Background feed decoding
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:trustboard.wasm" {
//!     endpoint "http://localhost:3000/api/get-latest-updates"
//!     theme "catppuccin-latte"
//!     trace_level "debug"
//! }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{DashboardError, Result};
pub use ui::Theme;

use infrastructure::{expand_tilde, DEFAULT_ENDPOINT};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's KDL options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL serving the JSON update list.
    pub endpoint: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    pub theme_name: Option<String>,

    /// Path to a custom theme TOML file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive, e.g. `debug` or `trustboard=trace`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses plugin options, falling back to defaults for missing or blank
    /// values.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            endpoint: get("endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Resolves the configured theme, falling back to the default on error.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(
                    theme_file = %theme_file,
                    error = %e,
                    "failed to load theme file, using default"
                );
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state for a plugin load.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing trustboard plugin");
    AppState::new(config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_options_use_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, "http://localhost:3000/api/get-latest-updates");
    }

    #[test]
    fn options_are_trimmed_and_blank_ones_ignored() {
        let mut options = BTreeMap::new();
        options.insert("endpoint".to_string(), " https://ops.example/api/updates ".to_string());
        options.insert("theme".to_string(), "catppuccin-latte".to_string());
        options.insert("trace_level".to_string(), "   ".to_string());

        let config = Config::from_zellij(&options);
        assert_eq!(config.endpoint, "https://ops.example/api/updates");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn theme_resolution_prefers_file_then_name() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.load_theme().name, "catppuccin-mocha");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            include_str!("../themes/catppuccin-latte.toml")
                .replace("catppuccin-latte", "day-shift")
                .as_bytes(),
        )
        .unwrap();
        let from_file = Config {
            theme_file: Some(file.path().display().to_string()),
            ..config
        };
        assert_eq!(from_file.load_theme().name, "day-shift");
    }

    #[test]
    fn initialize_starts_loading() {
        let state = initialize(&Config::default());
        assert_eq!(state.load_state, app::LoadState::Loading);
        assert!(state.updates.is_empty());
    }
}
