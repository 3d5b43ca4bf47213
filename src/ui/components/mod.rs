//! Composable UI component renderers.
//!
//! Each component draws one region at an explicit row and returns the next
//! free row.
//!
//! # Components
//!
//! - [`header`]: Title, visible/total count, admin badge
//! - [`notice`]: Filter summary line and the transient notice line
//! - [`search`]: Boxed search input
//! - [`cards`]: Category headings and update cards
//! - [`filters`]: Filter panel
//! - [`empty`]: Loading, failure and no-results messages
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Filter summary]
//! [Border]
//! [Search bar - 3 lines, optional]
//! [Body: cards, filter panel or empty state]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod filters;
mod footer;
mod header;
mod notice;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use cards::render_body_rows;
use empty::render_empty_state;
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;
use notice::{render_filter_summary, render_notice};
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full dashboard layout.
pub fn render_dashboard(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_filter_summary(current_row, &vm.filter_summary, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    match &vm.body {
        Body::Cards(body_rows) => {
            render_body_rows(current_row, body_rows, theme, cols);
        }
        Body::Panel(panel) => {
            render_filter_panel(current_row, panel, theme, cols);
        }
        Body::Empty(empty) => render_empty_state(current_row, empty, theme, cols),
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    render_notice(notice_row, vm.notice.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
