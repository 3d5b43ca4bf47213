//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `AppState::compute_viewmodel`
//! and consumed by the renderer. They hold display-ready data only: strings,
//! highlight ranges, selection flags. Nothing here reaches back into the
//! update collection.
//!
//! # Example
//!
//! ```rust
//! use trustboard::ui::viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: "Trust & Safety Operations Dashboard".to_string(),
//!         visible: 0,
//!         total: 0,
//!         is_admin: false,
//!     },
//!     filter_summary: "Filters: none".to_string(),
//!     search_bar: None,
//!     body: Body::Empty(EmptyState {
//!         message: "Loading updates...".to_string(),
//!         subtitle: String::new(),
//!         is_error: false,
//!     }),
//!     notice: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! # let _ = vm;
//! ```

use crate::domain::RiskLevel;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// One-line summary of the active filter conditions.
    pub filter_summary: String,

    /// Present while searching or while a search term is set.
    pub search_bar: Option<SearchBarInfo>,

    pub body: Body,

    pub notice: Option<NoticeInfo>,

    pub footer: FooterInfo,
}

/// Title line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Updates passing the current filters.
    pub visible: usize,
    /// Updates in the loaded collection.
    pub total: usize,
    pub is_admin: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Centered message shown in place of the card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Renders with the error palette (failed loads).
    pub is_error: bool,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the search bar.
    pub is_focused: bool,
}

/// Transient one-line message above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub message: String,
    pub is_error: bool,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Category headings and cards, already windowed to fit.
    Cards(Vec<BodyRow>),
    /// The filter panel.
    Panel(FilterPanelInfo),
    /// Loading, failure or no-results message.
    Empty(EmptyState),
}

/// One entry of the windowed card list.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyRow {
    /// Category heading with the number of visible cards in it.
    Heading { name: String, count: usize },
    Card(CardInfo),
}

impl BodyRow {
    /// Terminal lines occupied by a category heading.
    pub const HEADING_HEIGHT: usize = 1;

    /// Terminal lines occupied by a card.
    pub const CARD_HEIGHT: usize = 4;

    #[must_use]
    pub const fn height(&self) -> usize {
        match self {
            Self::Heading { .. } => Self::HEADING_HEIGHT,
            Self::Card(_) => Self::CARD_HEIGHT,
        }
    }
}

/// Display information for a single update card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardInfo {
    pub title: String,

    /// Character ranges of `title` matching the search term.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,

    pub source: String,

    /// `Media Attention: X | Sentiment: Y (Z%)`.
    pub details: String,

    pub risk: RiskLevel,

    pub is_selected: bool,

    /// The admin control, present only in admin mode.
    pub action: Option<ActionVariant>,
}

/// Visual variant of the "Acknowledge & Assign" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVariant {
    /// High-risk items.
    Destructive,
    Default,
}

impl ActionVariant {
    pub const LABEL: &'static str = "Acknowledge & Assign";

    #[must_use]
    pub const fn for_risk(risk: RiskLevel) -> Self {
        match risk {
            RiskLevel::High => Self::Destructive,
            _ => Self::Default,
        }
    }
}

/// Filter panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelInfo {
    pub rows: Vec<PanelRowInfo>,
}

/// One facet or date row of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRowInfo {
    pub label: String,
    pub is_focused: bool,
    pub kind: PanelRowKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRowKind {
    /// Toggleable facet options.
    Options(Vec<OptionChip>),
    /// Date bound text; `editing` while the draft is being typed.
    Date { text: String, editing: bool },
}

/// One toggleable facet option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionChip {
    pub label: String,
    /// Part of the facet's selection.
    pub is_selected: bool,
    /// Under the option cursor of the focused row.
    pub is_focused: bool,
}
