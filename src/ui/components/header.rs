//! Header component renderer.
//!
//! Title on the left; the visible/total count and the admin badge on the
//! right.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const ADMIN_BADGE: &str = " ADMIN ";

/// Renders the header line at `row` and returns the next row.
///
/// ```text
///  Trust & Safety Operations Dashboard              12/40 updates  ADMIN
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let count = format!("{}/{} updates ", header.visible, header.total);
    let badge_width = if header.is_admin { display_width(ADMIN_BADGE) + 1 } else { 0 };
    let right_width = display_width(&count) + badge_width;

    let title = truncate(&format!(" {}", header.title), cols.saturating_sub(right_width + 1));
    let gap = cols.saturating_sub(display_width(&title) + right_width);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}{title}", Theme::bold());
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(gap));
    print!("{count}");

    if header.is_admin {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!("{}", Theme::bg(&theme.colors.admin_badge_bg));
        print!("{ADMIN_BADGE}");
        print!("{}", Theme::reset());
        print!(" ");
    }

    print!("{}", Theme::reset());
    row + 1
}
