//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the trustboard library and Zellij. It
//! implements `ZellijPlugin`, registers the decoding worker, translates host
//! events into library events and carries out the returned actions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌───────────────────┐   │
//! │  │  State (plugin)   │   │  ← UI state, event handling, web_request
//! │  └───────────────────┘   │
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │  DashboardWorker  │   │  ← Feed body decoding
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: request `WebAccess`; the fetch starts once granted
//! 3. **Fetch**: one `GET` to the endpoint via `web_request`
//! 4. **Decode**: the body goes to the worker, the decoded feed comes back
//! 5. **Update / Render**: keys drive filters and selection
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move down / up.
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move between cards
//! - `/`: search titles
//! - `f`: filter panel
//! - `a`: toggle admin mode
//! - `Enter`: acknowledge & assign (admin mode)
//! - `c`: clear all filters
//! - `Esc`: clear the search term
//! - `q`: close
//!
//! Search mode: type to filter, `Enter` back to results, `Esc` clear.
//!
//! Filter panel: `j`/`k` rows, `h`/`l` options, `Space` toggle, `x` clear
//! row, `Enter` edit a date, `Esc`/`f` close.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use trustboard::app::{AppState, PanelFocus};
use trustboard::infrastructure::{request_id_from_context, FeedRequest};
use trustboard::worker::{DashboardWorker, WorkerMessage, WorkerResponse};
use trustboard::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(DashboardWorker, trustboard_worker, TRUSTBOARD_WORKER);

/// Plugin state wrapper.
struct State {
    app: AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Feed endpoint from configuration.
    endpoint: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: trustboard::initialize(&default_config),
            worker_name: "trustboard".to_string(),
            endpoint: default_config.endpoint,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        trustboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, "parsed configuration");
        self.app = trustboard::initialize(&config);
        self.endpoint.clone_from(&config.endpoint);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status = status, body_len = body.len(), "web request result");
                Event::FeedResponse {
                    request_id: request_id_from_context(&context),
                    status,
                    body,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => vec![PermissionType::WebAccess],
                    PermissionStatus::Denied => {
                        tracing::warn!("web access denied - feed cannot be loaded");
                        Vec::new()
                    }
                };
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                let mut changed = false;
                for action in &actions {
                    changed |= self.execute_action(action);
                }
                should_render || changed
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        trustboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key),
            InputMode::Search => Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Filters(PanelFocus::Browsing) => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
                BareKey::Right | BareKey::Char('l') => Event::KeyRight,
                BareKey::Char(' ') => Event::ToggleOption,
                BareKey::Char('x') => Event::ClearFacet,
                BareKey::Char('f') => Event::ToggleFilters,
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                _ => return None,
            }),
            InputMode::Filters(PanelFocus::EditingDate) => Some(match key.bare_key {
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
        }
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::ToggleFilters,
            BareKey::Char('a') => Event::ToggleAdmin,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps worker replies to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action. Returns whether state changed and needs a render.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(&mut self, action: &Action) -> bool {
        match action {
            Action::CloseFocus => {
                hide_self();
                false
            }
            Action::FetchFeed { request_id } => {
                match FeedRequest::new(&self.endpoint, *request_id) {
                    Ok(request) => {
                        tracing::info!(
                            url = %request.url,
                            request_id = request_id,
                            "fetching feed"
                        );
                        web_request(
                            request.url,
                            HttpVerb::Get,
                            request.headers,
                            Vec::new(),
                            request.context,
                        );
                        false
                    }
                    Err(e) => {
                        self.app.fail_load(e.to_string());
                        true
                    }
                }
            }
            Action::PostToWorker(message) => {
                self.post_worker_message(message);
                false
            }
            Action::Acknowledge { title, risk } => {
                tracing::info!(
                    title = %title,
                    risk = risk.label(),
                    "acknowledge & assign requested"
                );
                false
            }
        }
    }
}
