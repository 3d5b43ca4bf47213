//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow:
//! 1. Events arrive from the plugin runtime or the worker thread
//! 2. [`handle_event`] interprets them against the current input mode
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! # Example
//!
//! ```rust
//! use trustboard::app::{handle_event, Action, AppState, Event};
//! use trustboard::ui::Theme;
//! use zellij_tile::prelude::PermissionType;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::PermissionsResult { granted: vec![PermissionType::WebAccess] },
//! )?;
//! assert_eq!(actions, vec![Action::FetchFeed { request_id: 1 }]);
//! # Ok::<(), trustboard::domain::DashboardError>(())
//! ```

use super::modes::{InputMode, PanelFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use zellij_tile::prelude::PermissionType;

/// Events triggered by user input, host callbacks or worker responses.
///
/// Key events are mode-agnostic; [`handle_event`] decides what they mean in
/// the current [`InputMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Next card, or next filter panel row.
    KeyDown,
    /// Previous card, or previous filter panel row.
    KeyUp,
    /// Previous option in the focused facet row.
    KeyLeft,
    /// Next option in the focused facet row.
    KeyRight,
    /// Acknowledge (admin), leave search, edit or commit a date.
    Enter,
    /// Clear search, close the panel, or cancel a date edit.
    Escape,
    /// Deletes the last character of the search term or date draft.
    Backspace,
    /// Appends a character to the search term or date draft.
    Char(char),
    /// Focuses the search bar.
    SearchMode,
    /// Opens or closes the filter panel.
    ToggleFilters,
    ToggleAdmin,
    /// Resets every filter.
    ClearFilters,
    /// Toggles the focused option in the filter panel.
    ToggleOption,
    /// Clears the focused filter panel row.
    ClearFacet,
    /// Hides the plugin.
    CloseFocus,

    /// Permissions granted after the startup request.
    PermissionsResult {
        granted: Vec<PermissionType>,
    },

    /// The host finished the feed request.
    FeedResponse {
        /// Request id recovered from the request context, if any.
        request_id: Option<u64>,
        /// HTTP status code.
        status: u16,
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for spans and logs. Never includes payloads.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::KeyLeft => "key_left",
            Self::KeyRight => "key_right",
            Self::Enter => "enter",
            Self::Escape => "escape",
            Self::Backspace => "backspace",
            Self::Char(_) => "char",
            Self::SearchMode => "search_mode",
            Self::ToggleFilters => "toggle_filters",
            Self::ToggleAdmin => "toggle_admin",
            Self::ClearFilters => "clear_filters",
            Self::ToggleOption => "toggle_option",
            Self::ClearFacet => "clear_facet",
            Self::CloseFocus => "close_focus",
            Self::PermissionsResult { .. } => "permissions_result",
            Self::FeedResponse { .. } => "feed_response",
            Self::WorkerResponse(_) => "worker_response",
        }
    }

    /// Whether the event came from the keyboard.
    #[must_use]
    pub const fn is_keypress(&self) -> bool {
        !matches!(
            self,
            Self::PermissionsResult { .. } | Self::FeedResponse { .. } | Self::WorkerResponse(_)
        )
    }
}

/// Processes an event, mutates application state, and returns whether a
/// re-render is needed along with the actions to execute.
///
/// # Errors
///
/// Currently infallible for every event; the `Result` keeps the runtime's
/// error path uniform.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    // Notices last until the next keypress.
    let had_notice = event.is_keypress() && state.notice.take().is_some();

    let (render, actions) = match event {
        Event::KeyDown | Event::KeyUp => {
            let down = *event == Event::KeyDown;
            match state.input_mode {
                InputMode::Normal | InputMode::Search => {
                    if down {
                        state.move_selection_down();
                    } else {
                        state.move_selection_up();
                    }
                }
                InputMode::Filters(PanelFocus::Browsing) => state.move_panel_row(down),
                InputMode::Filters(PanelFocus::EditingDate) => return Ok((had_notice, vec![])),
            }
            (true, vec![])
        }
        Event::KeyLeft | Event::KeyRight => {
            if state.input_mode != InputMode::Filters(PanelFocus::Browsing) {
                return Ok((had_notice, vec![]));
            }
            state.move_panel_option(*event == Event::KeyRight);
            (true, vec![])
        }
        Event::Enter => match state.input_mode {
            InputMode::Normal => (had_notice, acknowledge_selected(state)),
            InputMode::Search => {
                tracing::debug!(query = %state.filters.search, "returning focus to results");
                state.input_mode = InputMode::Normal;
                (true, vec![])
            }
            InputMode::Filters(PanelFocus::Browsing) => {
                if !state.begin_date_edit() {
                    state.toggle_focused_option();
                }
                (true, vec![])
            }
            InputMode::Filters(PanelFocus::EditingDate) => {
                state.commit_date_edit();
                (true, vec![])
            }
        },
        Event::Escape => {
            match state.input_mode {
                InputMode::Normal | InputMode::Search => {
                    state.input_mode = InputMode::Normal;
                    state.filters.search.clear();
                    state.refresh_view();
                }
                InputMode::Filters(PanelFocus::Browsing) => state.input_mode = InputMode::Normal,
                InputMode::Filters(PanelFocus::EditingDate) => state.cancel_date_edit(),
            }
            (true, vec![])
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search => {
                state.filters.search.push(*c);
                tracing::trace!(query = %state.filters.search, "search term updated");
                state.refresh_view();
                (true, vec![])
            }
            InputMode::Filters(PanelFocus::EditingDate) => {
                state.date_draft.push(*c);
                (true, vec![])
            }
            _ => (had_notice, vec![]),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search => {
                state.filters.search.pop();
                state.refresh_view();
                (true, vec![])
            }
            InputMode::Filters(PanelFocus::EditingDate) => {
                state.date_draft.pop();
                (true, vec![])
            }
            _ => (had_notice, vec![]),
        },
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::ToggleFilters => {
            state.input_mode = match state.input_mode {
                InputMode::Filters(PanelFocus::Browsing) => InputMode::Normal,
                InputMode::Filters(PanelFocus::EditingDate) => return Ok((had_notice, vec![])),
                InputMode::Normal | InputMode::Search => InputMode::Filters(PanelFocus::Browsing),
            };
            (true, vec![])
        }
        Event::ToggleAdmin => {
            state.toggle_admin();
            (true, vec![])
        }
        Event::ClearFilters => {
            tracing::debug!(active = state.filters.active_count(), "clearing all filters");
            state.clear_filters();
            (true, vec![])
        }
        Event::ToggleOption => (state.toggle_focused_option() || had_notice, vec![]),
        Event::ClearFacet => {
            state.clear_focused_row();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::PermissionsResult { granted } => {
            if granted.contains(&PermissionType::WebAccess) {
                match state.begin_fetch() {
                    Some(request_id) => (true, vec![Action::FetchFeed { request_id }]),
                    None => (false, vec![]),
                }
            } else {
                state.fail_load("Web access permission was not granted");
                (true, vec![])
            }
        }
        Event::FeedResponse { request_id, status, body } => {
            handle_feed_response(state, *request_id, *status, body)
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::FeedDecoded { request_id, feed } => {
                (state.load_feed(*request_id, feed.clone()), vec![])
            }
            WorkerResponse::Error { request_id, message } => {
                tracing::error!(request_id = ?request_id, "worker error: {message}");
                if request_id.map_or(state.is_loading(), |id| state.is_pending(id)) {
                    state.fail_load(message.clone());
                    (true, vec![])
                } else {
                    (false, vec![])
                }
            }
        },
    };

    Ok((render, actions))
}

fn acknowledge_selected(state: &AppState) -> Vec<Action> {
    if !state.is_admin {
        return vec![];
    }
    state.selected_update().map_or_else(Vec::new, |update| {
        vec![Action::Acknowledge {
            title: update.display_title().to_string(),
            risk: update.risk_level,
        }]
    })
}

fn handle_feed_response(
    state: &mut AppState,
    request_id: Option<u64>,
    status: u16,
    body: &[u8],
) -> (bool, Vec<Action>) {
    let Some(request_id) = request_id.filter(|id| state.is_pending(*id)) else {
        tracing::debug!(
            request_id = ?request_id,
            status = status,
            "ignoring response for stale request"
        );
        return (false, vec![]);
    };

    if !(200..300).contains(&status) {
        state.fail_load(format!("Feed endpoint returned HTTP {status}"));
        return (true, vec![]);
    }

    match String::from_utf8(body.to_vec()) {
        Ok(body) => {
            tracing::debug!(
                request_id = request_id,
                body_len = body.len(),
                "handing feed body to worker"
            );
            (
                false,
                vec![Action::PostToWorker(WorkerMessage::decode_feed(request_id, body))],
            )
        }
        Err(e) => {
            state.fail_load(format!("Feed body is not valid UTF-8: {e}"));
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{LoadState, NoticeKind};
    use crate::domain::{DecodedFeed, RiskLevel, Update};
    use crate::ui::theme::Theme;

    fn granted(state: &mut AppState) -> u64 {
        let (_, actions) = handle_event(
            state,
            &Event::PermissionsResult {
                granted: vec![PermissionType::WebAccess],
            },
        )
        .unwrap();
        match actions.as_slice() {
            [Action::FetchFeed { request_id }] => *request_id,
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);
        let mut high = Update::new("Fraud Alert", "Fraud");
        high.risk_level = RiskLevel::High;
        let feed = DecodedFeed {
            updates: vec![high, Update::new("Spam Wave", "Spam")],
            skipped: 0,
        };
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FeedDecoded { request_id, feed }),
        )
        .unwrap();
        state
    }

    #[test]
    fn successful_response_is_decoded_in_worker() {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);

        let (_, actions) = handle_event(
            &mut state,
            &Event::FeedResponse {
                request_id: Some(request_id),
                status: 200,
                body: b"[]".to_vec(),
            },
        )
        .unwrap();

        match actions.as_slice() {
            [Action::PostToWorker(WorkerMessage::DecodeFeed { request_id: id, body, .. })] => {
                assert_eq!(*id, request_id);
                assert_eq!(body, "[]");
            }
            other => panic!("unexpected actions: {other:?}"),
        }
        assert_eq!(state.load_state, LoadState::Loading);
    }

    #[test]
    fn stale_responses_do_not_touch_state() {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);

        let (render, actions) = handle_event(
            &mut state,
            &Event::FeedResponse {
                request_id: Some(request_id + 1),
                status: 500,
                body: Vec::new(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.load_state, LoadState::Loading);

        let (render, _) = handle_event(
            &mut state,
            &Event::FeedResponse {
                request_id: None,
                status: 200,
                body: b"[]".to_vec(),
            },
        )
        .unwrap();
        assert!(!render);
    }

    #[test]
    fn non_utf8_body_fails_without_reaching_worker() {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);

        let (render, actions) = handle_event(
            &mut state,
            &Event::FeedResponse {
                request_id: Some(request_id),
                status: 200,
                body: vec![0xff, 0xfe],
            },
        )
        .unwrap();

        assert!(render);
        assert!(!actions.iter().any(|a| matches!(a, Action::PostToWorker(_))));
        assert!(matches!(
            &state.load_state,
            LoadState::Failed(message) if message.contains("UTF-8")
        ));
        assert!(!state.is_pending(request_id));
    }

    #[test]
    fn http_failure_marks_load_failed() {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);

        handle_event(
            &mut state,
            &Event::FeedResponse {
                request_id: Some(request_id),
                status: 503,
                body: Vec::new(),
            },
        )
        .unwrap();

        assert_eq!(
            state.load_state,
            LoadState::Failed("Feed endpoint returned HTTP 503".to_string())
        );
        assert!(state.updates.is_empty());
    }

    #[test]
    fn denied_permission_fails_without_fetch() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: vec![] }).unwrap();
        assert!(actions.is_empty());
        assert!(matches!(state.load_state, LoadState::Failed(_)));
    }

    #[test]
    fn worker_errors_fail_the_pending_load() {
        let mut state = AppState::new(Theme::default());
        let request_id = granted(&mut state);

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                request_id: Some(request_id),
                message: "feed body must be a JSON array".to_string(),
            }),
        )
        .unwrap();

        assert!(matches!(state.load_state, LoadState::Failed(ref m) if m.contains("array")));
    }

    #[test]
    fn acknowledge_requires_admin_mode() {
        let mut state = loaded();
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(actions.is_empty());

        handle_event(&mut state, &Event::ToggleAdmin).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(
            actions,
            vec![Action::Acknowledge {
                title: "Fraud Alert".to_string(),
                risk: RiskLevel::High,
            }]
        );
    }

    #[test]
    fn search_typing_filters_live_and_escape_clears() {
        let mut state = loaded();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "SPAM".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.cards, vec![1]);

        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filters.search, "SPAM");

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.filters.search.is_empty());
        assert_eq!(state.cards.len(), 2);
    }

    #[test]
    fn chars_outside_text_modes_are_ignored() {
        let mut state = loaded();
        let (render, _) = handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(!render);
        assert!(state.filters.search.is_empty());
    }

    #[test]
    fn filter_panel_edits_dates_and_closes() {
        let mut state = loaded();
        handle_event(&mut state, &Event::ToggleFilters).unwrap();
        for _ in 0..6 {
            handle_event(&mut state, &Event::KeyDown).unwrap();
        }
        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.input_mode, InputMode::Filters(PanelFocus::EditingDate));

        for c in "bogus".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
        assert!(state.filters.start.is_none());

        handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(state.notice.is_none());

        handle_event(&mut state, &Event::ToggleFilters).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn clear_filters_restores_everything() {
        let mut state = loaded();
        handle_event(&mut state, &Event::ToggleFilters).unwrap();
        handle_event(&mut state, &Event::ToggleOption).unwrap();
        assert!(state.cards.is_empty());

        handle_event(&mut state, &Event::Escape).unwrap();
        handle_event(&mut state, &Event::ClearFilters).unwrap();
        assert_eq!(state.cards.len(), 2);
    }
}
