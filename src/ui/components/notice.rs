//! Single-line renderers: the active filter summary and the notice line.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeInfo;

/// Renders the dimmed filter summary at `row` and returns the next row.
pub fn render_filter_summary(row: usize, summary: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" ");
    print_padded(summary, cols.saturating_sub(1));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the notice line, or blanks it when there is none.
pub fn render_notice(row: usize, notice: Option<&NoticeInfo>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    let Some(notice) = notice else {
        print!("{}", " ".repeat(cols));
        return;
    };

    let color = if notice.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };
    print!("{}", Theme::fg(color));
    print!(" ");
    print_padded(&notice.message, cols.saturating_sub(1));
    print!("{}", Theme::reset());
}
