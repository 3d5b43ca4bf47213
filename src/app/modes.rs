//! Input mode state types for the application.
//!
//! These enums decide how keys are interpreted and which layout the renderer
//! uses. The dashboard has three modes:
//!
//! - **Normal**: navigate cards, toggle admin mode, open search or filters
//! - **Search**: typing edits the title search term
//! - **Filters**: the filter panel is open, either browsing facet rows or
//!   editing a date bound
//!
//! # Example
//!
//! ```rust
//! use trustboard::app::modes::{InputMode, PanelFocus, PanelRow};
//! use trustboard::domain::Facet;
//!
//! let mode = InputMode::Filters(PanelFocus::Browsing);
//! assert_eq!(PanelRow::ALL[0], PanelRow::Facet(Facet::Country));
//! # let _ = mode;
//! ```

use crate::domain::filter::BoundSide;
use crate::domain::Facet;

/// Focus state within the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Moving between rows and toggling facet options.
    Browsing,

    /// Typing into the focused date row.
    ///
    /// Characters go to the draft, `Enter` commits, `Esc` cancels.
    EditingDate,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default card navigation and command mode.
    ///
    /// Keybindings: j/k (navigate), / (search), f (filters), a (admin),
    /// Enter (acknowledge, admin only), c (clear filters), q (quit).
    Normal,

    /// Typing into the search bar. Results update on every keystroke.
    Search,

    /// Filter panel is open.
    Filters(PanelFocus),
}

/// One row of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    /// Multi-valued facet with toggleable options.
    Facet(Facet),
    /// Editable date bound.
    Date(BoundSide),
}

impl PanelRow {
    /// Rows in display order: the six facets, then the two date bounds.
    pub const ALL: [Self; 8] = [
        Self::Facet(Facet::Country),
        Self::Facet(Facet::RiskLevel),
        Self::Facet(Facet::Gender),
        Self::Facet(Facet::Impact),
        Self::Facet(Facet::MediaAttention),
        Self::Facet(Facet::Sentiment),
        Self::Date(BoundSide::Start),
        Self::Date(BoundSide::End),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Facet(facet) => facet.label(),
            Self::Date(side) => side.label(),
        }
    }
}
