//! Filter panel component renderer.
//!
//! One line per facet or date row:
//!
//! ```text
//! > Country          [US] UK  Canada  Germany  Australia
//!   Start Date       2024-02-01
//! ```

use crate::ui::helpers::{display_width, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterPanelInfo, OptionChip, PanelRowInfo, PanelRowKind};

const LABEL_WIDTH: usize = 17;

/// Renders the panel rows starting at `row` and returns the next row.
pub fn render_filter_panel(
    row: usize,
    panel: &FilterPanelInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for panel_row in &panel.rows {
        render_panel_row(current_row, panel_row, theme, cols);
        current_row += 1;
    }
    current_row
}

fn render_panel_row(row: usize, panel_row: &PanelRowInfo, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let pointer = if panel_row.is_focused { "> " } else { "  " };
    if panel_row.is_focused {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{pointer}");
    print_padded(&panel_row.label, LABEL_WIDTH);
    print!("{}", Theme::reset());

    let mut used = 2 + LABEL_WIDTH;
    match &panel_row.kind {
        PanelRowKind::Options(chips) => {
            for chip in chips {
                let text = chip_text(chip);
                let width = display_width(&text) + 1;
                if used + width > cols {
                    break;
                }
                render_chip(chip, &text, theme);
                print!(" ");
                used += width;
            }
        }
        PanelRowKind::Date { text, editing } => {
            let shown = match (text.is_empty(), *editing) {
                (_, true) => format!("{text}█"),
                (true, false) => "any".to_string(),
                (false, false) => text.clone(),
            };
            if *editing {
                print!("{}", Theme::fg(&theme.colors.search_bar_border));
            } else if text.is_empty() {
                print!("{}", Theme::fg(&theme.colors.text_dim));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print_padded(&shown, cols.saturating_sub(used));
            used = cols;
            print!("{}", Theme::reset());
        }
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
}

fn chip_text(chip: &OptionChip) -> String {
    if chip.is_selected {
        format!("[{}]", chip.label)
    } else {
        format!(" {} ", chip.label)
    }
}

fn render_chip(chip: &OptionChip, text: &str, theme: &Theme) {
    if chip.is_focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if chip.is_selected {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.match_highlight_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{text}");
    print!("{}", Theme::reset());
}
