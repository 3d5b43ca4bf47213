//! Top-level rendering coordinator.
//!
//! Computes the view model from application state, then hands it to the
//! component layer:
//!
//! 1. **View model computation**: `AppState` → `UIViewModel`
//! 2. **Component rendering**: `UIViewModel` → ANSI output on stdout
//!
//! The screen is not cleared here; Zellij hands the plugin a fresh frame on
//! every render.

use crate::app::AppState;
use crate::ui::components;

/// Renders the dashboard to stdout for a terminal of `rows` x `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows = rows, cols = cols).entered();
    let viewmodel = state.compute_viewmodel(rows);

    components::render_dashboard(&viewmodel, &state.theme, cols, rows);
}
