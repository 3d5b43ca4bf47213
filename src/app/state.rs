//! Application state management.
//!
//! [`AppState`] is the single source of truth for the dashboard: the loaded
//! update collection, the filter state, the admin flag, the load lifecycle and
//! all cursor positions. Derived data (categories, facet options, the
//! filtered index list and its grouping) is recomputed explicitly whenever the
//! collection or the filters change.
//!
//! # Derived State
//!
//! - **Categories**: recomputed when a feed is loaded
//! - **Facet options**: default catalogue plus values seen in the feed
//! - **Visible / groups / cards**: recomputed by [`AppState::refresh_view`],
//!   memoized on (collection version, filter snapshot)
//!
//! # Example
//!
//! ```rust
//! use trustboard::app::AppState;
//! use trustboard::domain::{DecodedFeed, Update};
//! use trustboard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let request_id = state.begin_fetch().unwrap();
//! state.load_feed(request_id, DecodedFeed {
//!     updates: vec![Update::new("Fraud Alert", "Fraud")],
//!     skipped: 0,
//! });
//! assert_eq!(state.cards.len(), 1);
//! ```

use super::modes::{InputMode, PanelFocus, PanelRow};
use crate::domain::filter::{BoundSide, DateBound};
use crate::domain::{
    derive_categories, filter_indices, group_by_category, CategoryGroup, DecodedFeed, Facet,
    FilterState, Update,
};
use crate::ui::theme::Theme;

/// Lifecycle of the one feed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for permissions, the response, or the worker.
    Loading,
    /// The collection holds the decoded feed.
    Loaded,
    /// The fetch or decode failed; the collection stays empty.
    Failed(String),
}

/// Severity of a transient notice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown above the footer until the next keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded updates in feed order. Replaced wholesale, never edited.
    pub updates: Vec<Update>,

    /// Distinct categories in first-seen order.
    pub categories: Vec<String>,

    /// Selectable options per facet, in [`Facet::ALL`] order.
    pub facet_options: Vec<Vec<String>>,

    /// Current filter conditions.
    pub filters: FilterState,

    /// Positions of updates passing the filters, in feed order.
    pub visible: Vec<usize>,

    /// Visible updates partitioned by category.
    pub groups: Vec<CategoryGroup>,

    /// Visible updates in display order (category order, then feed order).
    pub cards: Vec<usize>,

    /// Cursor into `cards`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Display-only admin flag. Shows the acknowledge control on cards.
    pub is_admin: bool,

    pub load_state: LoadState,

    /// Number of feed elements dropped during decoding.
    pub skipped_records: usize,

    /// Focused row of the filter panel, index into [`PanelRow::ALL`].
    pub panel_row: usize,

    /// Focused option within the focused facet row.
    pub panel_option: usize,

    /// Text being typed into a date row.
    pub date_draft: String,

    pub notice: Option<Notice>,

    pub theme: Theme,

    pending_request: Option<u64>,
    fetch_issued: bool,
    next_request_id: u64,
    collection_version: u64,
    view_key: Option<(u64, FilterState)>,
}

impl AppState {
    /// Creates an empty state waiting for its feed.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        let mut state = Self {
            updates: Vec::new(),
            categories: Vec::new(),
            facet_options: Vec::new(),
            filters: FilterState::default(),
            visible: Vec::new(),
            groups: Vec::new(),
            cards: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            is_admin: false,
            load_state: LoadState::Loading,
            skipped_records: 0,
            panel_row: 0,
            panel_option: 0,
            date_draft: String::new(),
            notice: None,
            theme,
            pending_request: None,
            fetch_issued: false,
            next_request_id: 1,
            collection_version: 0,
            view_key: None,
        };
        state.rebuild_facet_options();
        state
    }

    /// Allocates the id for the feed fetch.
    ///
    /// Returns `None` if a fetch was already issued: the feed is read exactly
    /// once per plugin load.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.fetch_issued {
            return None;
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.fetch_issued = true;
        self.pending_request = Some(request_id);
        self.load_state = LoadState::Loading;
        tracing::debug!(request_id = request_id, "feed fetch started");
        Some(request_id)
    }

    /// Whether a response for `request_id` is still wanted.
    #[must_use]
    pub fn is_pending(&self, request_id: u64) -> bool {
        self.pending_request == Some(request_id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Replaces the collection with a decoded feed.
    ///
    /// Ignored unless `request_id` is the pending fetch.
    pub fn load_feed(&mut self, request_id: u64, feed: DecodedFeed) -> bool {
        if !self.is_pending(request_id) {
            tracing::debug!(request_id = request_id, "ignoring feed for stale request");
            return false;
        }

        self.pending_request = None;
        self.updates = feed.updates;
        self.skipped_records = feed.skipped;
        self.categories = derive_categories(&self.updates);
        self.collection_version += 1;
        self.load_state = LoadState::Loaded;
        self.selected_index = 0;
        self.rebuild_facet_options();
        self.refresh_view();

        if self.skipped_records > 0 {
            self.notice = Some(Notice::info(format!(
                "{} malformed record(s) skipped",
                self.skipped_records
            )));
        }

        tracing::info!(
            updates = self.updates.len(),
            categories = self.categories.len(),
            skipped = self.skipped_records,
            "feed loaded"
        );
        true
    }

    /// Marks the fetch as failed. The collection and categories stay empty.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "feed load failed");
        self.pending_request = None;
        self.load_state = LoadState::Failed(message);
    }

    /// Recomputes visible updates, groups and card order.
    ///
    /// Skips the work when neither the collection nor the filters changed
    /// since the last call. Returns whether anything was recomputed.
    pub fn refresh_view(&mut self) -> bool {
        if self
            .view_key
            .as_ref()
            .is_some_and(|(version, filters)| {
                *version == self.collection_version && *filters == self.filters
            })
        {
            return false;
        }

        self.visible = filter_indices(&self.updates, &self.filters);
        self.groups = group_by_category(&self.updates, &self.visible, &self.categories);
        self.cards = self.groups.iter().flat_map(|g| g.items.iter().copied()).collect();

        if self.cards.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.cards.len() - 1);
        }

        self.view_key = Some((self.collection_version, self.filters.clone()));
        true
    }

    /// Moves the card cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.cards.len();
    }

    /// Moves the card cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.cards.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The update under the card cursor.
    #[must_use]
    pub fn selected_update(&self) -> Option<&Update> {
        self.cards
            .get(self.selected_index)
            .and_then(|index| self.updates.get(*index))
    }

    pub fn toggle_admin(&mut self) {
        self.is_admin = !self.is_admin;
        tracing::debug!(is_admin = self.is_admin, "admin mode toggled");
    }

    /// Options offered for `facet`.
    #[must_use]
    pub fn options(&self, facet: Facet) -> &[String] {
        Facet::ALL
            .iter()
            .position(|f| *f == facet)
            .and_then(|i| self.facet_options.get(i))
            .map_or(&[], Vec::as_slice)
    }

    fn rebuild_facet_options(&mut self) {
        self.facet_options = Facet::ALL
            .iter()
            .map(|facet| facet.options_for(&self.updates))
            .collect();
    }

    /// The focused filter panel row.
    #[must_use]
    pub fn focused_row(&self) -> PanelRow {
        PanelRow::ALL[self.panel_row.min(PanelRow::ALL.len() - 1)]
    }

    /// Moves the panel cursor between rows, wrapping at both ends.
    pub fn move_panel_row(&mut self, down: bool) {
        let len = PanelRow::ALL.len();
        self.panel_row = if down {
            (self.panel_row + 1) % len
        } else {
            (self.panel_row + len - 1) % len
        };
        self.panel_option = 0;
    }

    /// Moves the option cursor within the focused facet row.
    pub fn move_panel_option(&mut self, right: bool) {
        let PanelRow::Facet(facet) = self.focused_row() else {
            return;
        };
        let len = self.options(facet).len();
        if len == 0 {
            return;
        }
        self.panel_option = if right {
            (self.panel_option + 1) % len
        } else {
            (self.panel_option + len - 1) % len
        };
    }

    /// Toggles the focused option of the focused facet row.
    pub fn toggle_focused_option(&mut self) -> bool {
        let PanelRow::Facet(facet) = self.focused_row() else {
            return false;
        };
        let Some(value) = self.options(facet).get(self.panel_option).cloned() else {
            return false;
        };
        self.filters.facet_mut(facet).toggle(&value);
        tracing::debug!(facet = facet.label(), value = %value, "facet option toggled");
        self.refresh_view();
        true
    }

    /// Clears whatever the focused panel row constrains.
    pub fn clear_focused_row(&mut self) {
        match self.focused_row() {
            PanelRow::Facet(facet) => *self.filters.facet_mut(facet) = Default::default(),
            PanelRow::Date(side) => self.filters.set_bound(side, None),
        }
        self.refresh_view();
    }

    /// Starts editing the focused date row, seeding the draft with its bound.
    pub fn begin_date_edit(&mut self) -> bool {
        let PanelRow::Date(side) = self.focused_row() else {
            return false;
        };
        self.date_draft = self
            .filters
            .bound(side)
            .map(|b| b.input.clone())
            .unwrap_or_default();
        self.input_mode = InputMode::Filters(PanelFocus::EditingDate);
        true
    }

    /// Commits the date draft to the focused bound.
    ///
    /// An empty draft clears the bound. An unparseable draft leaves the
    /// previous bound in place and raises an error notice.
    pub fn commit_date_edit(&mut self) {
        let PanelRow::Date(side) = self.focused_row() else {
            self.input_mode = InputMode::Filters(PanelFocus::Browsing);
            return;
        };

        let draft = std::mem::take(&mut self.date_draft);
        if draft.trim().is_empty() {
            self.filters.set_bound(side, None);
        } else {
            match DateBound::parse(&draft, side) {
                Ok(bound) => self.filters.set_bound(side, Some(bound)),
                Err(e) => {
                    tracing::debug!(error = %e, "rejected date bound");
                    self.notice = Some(Notice::error(e.to_string()));
                }
            }
        }

        self.input_mode = InputMode::Filters(PanelFocus::Browsing);
        self.refresh_view();
    }

    pub fn cancel_date_edit(&mut self) {
        self.date_draft.clear();
        self.input_mode = InputMode::Filters(PanelFocus::Browsing);
    }

    /// Resets every filter to neutral.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh_view();
    }

    /// Current bound text for a date row, for display.
    #[must_use]
    pub fn bound_text(&self, side: BoundSide) -> Option<&str> {
        self.filters.bound(side).map(|b| b.input.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_feed;

    fn loaded_state() -> AppState {
        let feed = decode_feed(
            br#"[
                {"title": "Fraud Alert", "category": "Fraud", "risk_level": "High Risk",
                 "country": "US", "published": "2024-01-10"},
                {"title": "Spam Wave", "category": "Spam", "risk_level": "Low Risk",
                 "country": "UK", "published": "2024-02-05"},
                {"title": "Refund Fraud", "category": "Fraud", "risk_level": "Medium Risk",
                 "country": "France", "published": "2024-03-01"}
            ]"#,
        )
        .unwrap();
        let mut state = AppState::new(Theme::default());
        let id = state.begin_fetch().unwrap();
        assert!(state.load_feed(id, feed));
        state
    }

    #[test]
    fn fetch_is_issued_once() {
        let mut state = AppState::new(Theme::default());
        assert_eq!(state.begin_fetch(), Some(1));
        assert_eq!(state.begin_fetch(), None);
        assert_eq!(state.load_state, LoadState::Loading);
    }

    #[test]
    fn stale_feeds_are_ignored() {
        let mut state = AppState::new(Theme::default());
        let id = state.begin_fetch().unwrap();
        assert!(!state.load_feed(id + 1, DecodedFeed::default()));
        assert_eq!(state.load_state, LoadState::Loading);

        state.fail_load("endpoint returned HTTP 500");
        assert!(!state.load_feed(id, DecodedFeed::default()));
        assert!(matches!(state.load_state, LoadState::Failed(_)));
        assert!(state.updates.is_empty());
        assert!(state.categories.is_empty());
    }

    #[test]
    fn cards_follow_category_order() {
        let state = loaded_state();
        assert_eq!(state.categories, vec!["Fraud", "Spam"]);
        assert_eq!(state.visible, vec![0, 1, 2]);
        assert_eq!(state.cards, vec![0, 2, 1]);
    }

    #[test]
    fn refresh_is_memoized_until_something_changes() {
        let mut state = loaded_state();
        assert!(!state.refresh_view());

        state.filters.search = "fraud".to_string();
        assert!(state.refresh_view());
        assert_eq!(state.cards, vec![0, 2]);
        assert!(!state.refresh_view());
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = loaded_state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        assert_eq!(state.selected_update().unwrap().display_title(), "Spam Wave");

        state.filters.search = "refund".to_string();
        state.refresh_view();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_update().unwrap().display_title(), "Refund Fraud");
    }

    #[test]
    fn facet_options_include_loaded_values() {
        let state = loaded_state();
        assert!(state.options(Facet::Country).iter().any(|c| c == "France"));
        assert_eq!(state.options(Facet::RiskLevel).len(), 3);
    }

    #[test]
    fn panel_toggles_and_clears_facets() {
        let mut state = loaded_state();
        state.input_mode = InputMode::Filters(PanelFocus::Browsing);
        state.move_panel_option(true);
        assert!(state.toggle_focused_option());
        assert_eq!(state.filters.country.values(), vec!["UK"]);
        assert_eq!(state.cards, vec![1]);

        state.clear_focused_row();
        assert!(state.filters.is_neutral());
        assert_eq!(state.cards.len(), 3);
    }

    #[test]
    fn date_rows_commit_clear_and_reject() {
        let mut state = loaded_state();
        state.panel_row = PanelRow::ALL
            .iter()
            .position(|r| *r == PanelRow::Date(BoundSide::Start))
            .unwrap();

        assert!(state.begin_date_edit());
        state.date_draft = "2024-02-01".to_string();
        state.commit_date_edit();
        assert_eq!(state.bound_text(BoundSide::Start), Some("2024-02-01"));
        assert_eq!(state.cards, vec![2, 1]);

        state.begin_date_edit();
        state.date_draft = "soon".to_string();
        state.commit_date_edit();
        assert_eq!(state.bound_text(BoundSide::Start), Some("2024-02-01"));
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));

        state.begin_date_edit();
        state.date_draft.clear();
        state.commit_date_edit();
        assert_eq!(state.bound_text(BoundSide::Start), None);
        assert_eq!(state.input_mode, InputMode::Filters(PanelFocus::Browsing));
    }

    #[test]
    fn skipped_records_raise_a_notice() {
        let mut state = AppState::new(Theme::default());
        let id = state.begin_fetch().unwrap();
        state.load_feed(id, decode_feed(b"[1, {\"title\": \"ok\"}]").unwrap());
        assert_eq!(state.skipped_records, 1);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
    }
}
