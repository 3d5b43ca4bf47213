//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, worker and UI
//! layers:
//!
//! ```text
//! Key / host event → Event → handle_event → AppState mutations → Actions → host calls
//!                        ↑                                            ↓
//!                        └──────────── worker responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode and filter panel row types
//! - [`state`]: Central application state and derived view data
//! - [`view`]: View model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod view;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, PanelFocus, PanelRow};
pub use state::{AppState, LoadState, Notice, NoticeKind};
