//! View model computation.
//!
//! Turns [`AppState`] into a [`UIViewModel`] for a given terminal height. The
//! card list is windowed so the selected card is always fully visible.

use super::modes::{InputMode, PanelFocus, PanelRow};
use super::state::{AppState, LoadState, NoticeKind};
use crate::domain::filter::BoundSide;
use crate::domain::{Facet, Update};
use crate::ui::helpers::find_match_ranges;
use crate::ui::viewmodel::{
    ActionVariant, Body, BodyRow, CardInfo, EmptyState, FilterPanelInfo, FooterInfo, HeaderInfo,
    NoticeInfo, OptionChip, PanelRowInfo, PanelRowKind, SearchBarInfo, UIViewModel,
};

/// Dashboard title shown in the header.
pub const TITLE: &str = "Trust & Safety Operations Dashboard";

/// Lines above the body: blank, header, filter summary, border.
const TOP_CHROME: usize = 4;

/// Lines below the body: notice, border, footer, trailing blank.
const BOTTOM_CHROME: usize = 4;

/// Height of the boxed search bar.
pub const SEARCH_BAR_HEIGHT: usize = 3;

impl AppState {
    /// Computes the view model for a terminal of `rows` lines.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize) -> UIViewModel {
        let search_bar = self.search_bar_info();
        let search_height = if search_bar.is_some() { SEARCH_BAR_HEIGHT } else { 0 };
        let body_height = rows.saturating_sub(TOP_CHROME + BOTTOM_CHROME + search_height);

        UIViewModel {
            header: HeaderInfo {
                title: TITLE.to_string(),
                visible: self.visible.len(),
                total: self.updates.len(),
                is_admin: self.is_admin,
            },
            filter_summary: self.filter_summary(),
            search_bar,
            body: self.body(body_height),
            notice: self.notice.as_ref().map(|n| NoticeInfo {
                message: n.message.clone(),
                is_error: n.kind == NoticeKind::Error,
            }),
            footer: FooterInfo {
                keybindings: self.footer_hints().to_string(),
            },
        }
    }

    fn search_bar_info(&self) -> Option<SearchBarInfo> {
        let is_focused = self.input_mode == InputMode::Search;
        (is_focused || !self.filters.search.is_empty()).then(|| SearchBarInfo {
            query: self.filters.search.clone(),
            is_focused,
        })
    }

    fn body(&self, height: usize) -> Body {
        if let InputMode::Filters(focus) = self.input_mode {
            return Body::Panel(self.filter_panel(focus));
        }

        match &self.load_state {
            LoadState::Loading => Body::Empty(EmptyState {
                message: "Loading updates...".to_string(),
                subtitle: "Waiting for the feed endpoint".to_string(),
                is_error: false,
            }),
            LoadState::Failed(message) => Body::Empty(EmptyState {
                message: "Failed to load updates".to_string(),
                subtitle: message.clone(),
                is_error: true,
            }),
            LoadState::Loaded if self.updates.is_empty() => Body::Empty(EmptyState {
                message: "No updates available".to_string(),
                subtitle: "The feed returned an empty list".to_string(),
                is_error: false,
            }),
            LoadState::Loaded if self.cards.is_empty() => Body::Empty(EmptyState {
                message: "No updates match the current filters".to_string(),
                subtitle: "Press 'c' to clear all filters".to_string(),
                is_error: false,
            }),
            LoadState::Loaded => Body::Cards(self.windowed_rows(height)),
        }
    }

    /// Builds headings and cards, then keeps the slice that fits `height`
    /// lines with the selected card fully visible.
    fn windowed_rows(&self, height: usize) -> Vec<BodyRow> {
        let mut rows = Vec::new();
        let mut selected_span = (0, 0);
        let mut offset = 0;
        let mut card_position = 0;

        for group in self.groups.iter().filter(|g| !g.items.is_empty()) {
            let heading = BodyRow::Heading {
                name: group.name.clone(),
                count: group.items.len(),
            };
            offset += heading.height();
            rows.push(heading);

            for &index in &group.items {
                let Some(update) = self.updates.get(index) else {
                    continue;
                };
                let is_selected = card_position == self.selected_index;
                if is_selected {
                    // Pull the heading into view when selecting a group's first card.
                    let top = if group.items.first() == Some(&index) {
                        offset - BodyRow::HEADING_HEIGHT
                    } else {
                        offset
                    };
                    selected_span = (top, offset + BodyRow::CARD_HEIGHT);
                }
                let card = BodyRow::Card(self.card_info(update, is_selected));
                offset += card.height();
                rows.push(card);
                card_position += 1;
            }
        }

        let scroll = selected_span.1.saturating_sub(height).min(selected_span.0);

        let mut top = 0;
        rows.into_iter()
            .filter(|row| {
                let row_top = top;
                top += row.height();
                row_top >= scroll && top <= scroll + height
            })
            .collect()
    }

    fn card_info(&self, update: &Update, is_selected: bool) -> CardInfo {
        let title = update.display_title().to_string();
        let highlight_ranges = if update.title.is_some() {
            find_match_ranges(&title, &self.filters.search)
        } else {
            Vec::new()
        };

        CardInfo {
            highlight_ranges,
            title,
            source: update.source.clone().unwrap_or_else(|| "Unknown source".to_string()),
            details: format!(
                "Media Attention: {} | Sentiment: {} ({})",
                update.media_attention.as_deref().unwrap_or("n/a"),
                update.sentiment.as_deref().unwrap_or("n/a"),
                update.sentiment_share(),
            ),
            risk: update.risk_level,
            is_selected,
            action: self.is_admin.then(|| ActionVariant::for_risk(update.risk_level)),
        }
    }

    fn filter_panel(&self, focus: PanelFocus) -> FilterPanelInfo {
        let focused_row = self.focused_row();

        let rows = PanelRow::ALL
            .iter()
            .map(|&row| {
                let is_focused = row == focused_row;
                let kind = match row {
                    PanelRow::Facet(facet) => {
                        PanelRowKind::Options(self.option_chips(facet, is_focused))
                    }
                    PanelRow::Date(side) => {
                        let editing = is_focused && focus == PanelFocus::EditingDate;
                        let text = if editing {
                            self.date_draft.clone()
                        } else {
                            self.bound_text(side).unwrap_or_default().to_string()
                        };
                        PanelRowKind::Date { text, editing }
                    }
                };
                PanelRowInfo {
                    label: row.label().to_string(),
                    is_focused,
                    kind,
                }
            })
            .collect();

        FilterPanelInfo { rows }
    }

    fn option_chips(&self, facet: Facet, row_focused: bool) -> Vec<OptionChip> {
        let selection = self.filters.facet(facet);
        self.options(facet)
            .iter()
            .enumerate()
            .map(|(i, option)| OptionChip {
                label: option.clone(),
                is_selected: selection.contains(option),
                is_focused: row_focused && i == self.panel_option,
            })
            .collect()
    }

    /// `Filters: none` or a `|`-separated list of the active conditions.
    fn filter_summary(&self) -> String {
        let filters = &self.filters;
        let mut parts = Vec::new();

        if !filters.search.is_empty() {
            parts.push(format!("Search: \"{}\"", filters.search));
        }
        for facet in Facet::ALL {
            let selection = filters.facet(facet);
            if !selection.is_any() {
                parts.push(format!("{}: {}", facet.label(), selection.values().join(", ")));
            }
        }
        for side in [BoundSide::Start, BoundSide::End] {
            if let Some(text) = self.bound_text(side) {
                parts.push(format!("{}: {text}", side.label()));
            }
        }

        if parts.is_empty() {
            "Filters: none".to_string()
        } else {
            format!("Filters ({}): {}", filters.active_count(), parts.join(" | "))
        }
    }

    fn footer_hints(&self) -> &'static str {
        match self.input_mode {
            InputMode::Normal if self.is_admin => {
                "j/k: move | Enter: acknowledge | /: search | f: filters | a: admin | c: clear | q: quit"
            }
            InputMode::Normal => {
                "j/k: move | /: search | f: filters | a: admin | c: clear | q: quit"
            }
            InputMode::Search => "type to search | Enter: results | Esc: clear search",
            InputMode::Filters(PanelFocus::Browsing) => {
                "j/k: row | h/l: option | Space: toggle | x: clear row | Enter: edit date | Esc: close"
            }
            InputMode::Filters(PanelFocus::EditingDate) => {
                "YYYY-MM-DD or RFC 3339 | Enter: apply (empty clears) | Esc: cancel"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{decode_feed, DecodedFeed};
    use crate::ui::theme::Theme;

    fn state_with(body: &[u8]) -> AppState {
        let mut state = AppState::new(Theme::default());
        let id = state.begin_fetch().unwrap();
        state.load_feed(id, decode_feed(body).unwrap());
        state
    }

    fn sample() -> AppState {
        state_with(
            br#"[
                {"title": "Fraud Alert", "source": "Reuters", "category": "Fraud",
                 "risk_level": "High Risk", "media_attention": "High",
                 "sentiment": "Negative", "sentiment_percentage": 72},
                {"title": "Spam Wave", "category": "Spam", "risk_level": "Low Risk"}
            ]"#,
        )
    }

    fn cards(vm: &UIViewModel) -> Vec<&CardInfo> {
        match &vm.body {
            Body::Cards(rows) => rows
                .iter()
                .filter_map(|row| match row {
                    BodyRow::Card(card) => Some(card),
                    BodyRow::Heading { .. } => None,
                })
                .collect(),
            other => panic!("expected cards, got {other:?}"),
        }
    }

    #[test]
    fn loading_and_failure_show_distinct_messages() {
        let mut state = AppState::new(Theme::default());
        state.begin_fetch();
        let Body::Empty(loading) = state.compute_viewmodel(30).body else {
            panic!("expected empty body");
        };
        assert!(!loading.is_error);

        state.fail_load("HTTP 503");
        let Body::Empty(failed) = state.compute_viewmodel(30).body else {
            panic!("expected empty body");
        };
        assert!(failed.is_error);
        assert_eq!(failed.subtitle, "HTTP 503");
        assert_ne!(loading.message, failed.message);
    }

    #[test]
    fn cards_carry_details_and_badges() {
        let state = sample();
        let vm = state.compute_viewmodel(40);
        let cards = cards(&vm);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].details, "Media Attention: High | Sentiment: Negative (72%)");
        assert_eq!(cards[0].risk, crate::domain::RiskLevel::High);
        assert!(cards[0].is_selected);
        assert!(cards[0].action.is_none());
        assert_eq!(vm.header.visible, 2);
        assert_eq!(vm.filter_summary, "Filters: none");
    }

    #[test]
    fn admin_mode_adds_risk_dependent_controls() {
        let mut state = sample();
        state.toggle_admin();
        let vm = state.compute_viewmodel(40);
        let cards = cards(&vm);

        assert_eq!(cards[0].action, Some(ActionVariant::Destructive));
        assert_eq!(cards[1].action, Some(ActionVariant::Default));
        assert!(vm.header.is_admin);
    }

    #[test]
    fn search_highlights_titles_and_summarizes() {
        let mut state = sample();
        state.filters.search = "wave".to_string();
        state.refresh_view();
        let vm = state.compute_viewmodel(40);

        assert_eq!(cards(&vm)[0].highlight_ranges, vec![(5, 9)]);
        assert_eq!(vm.filter_summary, "Filters (1): Search: \"wave\"");
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn window_keeps_selected_card_visible() {
        let body: String = format!(
            "[{}]",
            (0..10)
                .map(|i| format!(r#"{{"title": "Update {i}", "category": "C{}"}}"#, i % 2))
                .collect::<Vec<_>>()
                .join(",")
        );
        let mut state = state_with(body.as_bytes());
        for _ in 0..9 {
            state.move_selection_down();
        }

        let vm = state.compute_viewmodel(20);
        let Body::Cards(rows) = &vm.body else {
            panic!("expected cards");
        };
        let used: usize = rows.iter().map(BodyRow::height).sum();
        assert!(used <= 20 - TOP_CHROME - BOTTOM_CHROME);
        assert!(rows.iter().any(|row| matches!(
            row,
            BodyRow::Card(card) if card.is_selected && card.title == "Update 9"
        )));
    }

    #[test]
    fn no_match_and_empty_feed_messages() {
        let mut state = sample();
        state.filters.search = "nothing".to_string();
        state.refresh_view();
        let Body::Empty(empty) = state.compute_viewmodel(30).body else {
            panic!("expected empty body");
        };
        assert!(empty.message.contains("match"));

        let mut state = AppState::new(Theme::default());
        let id = state.begin_fetch().unwrap();
        state.load_feed(id, DecodedFeed::default());
        let Body::Empty(empty) = state.compute_viewmodel(30).body else {
            panic!("expected empty body");
        };
        assert_eq!(empty.message, "No updates available");
    }

    #[test]
    fn filter_panel_marks_focus_and_selection() {
        let mut state = sample();
        state.input_mode = InputMode::Filters(PanelFocus::Browsing);
        state.toggle_focused_option();

        let Body::Panel(panel) = state.compute_viewmodel(30).body else {
            panic!("expected filter panel");
        };
        assert_eq!(panel.rows.len(), PanelRow::ALL.len());
        assert!(panel.rows[0].is_focused);
        let PanelRowKind::Options(chips) = &panel.rows[0].kind else {
            panic!("expected options");
        };
        assert!(chips[0].is_selected && chips[0].is_focused);
        assert_eq!(chips[0].label, "US");
    }
}
