//! Card list component renderer.
//!
//! Renders category headings and update cards. Each card takes
//! [`BodyRow::CARD_HEIGHT`] lines:
//!
//! ```text
//! ▌ Fraud Alert
//! ▌ Reuters
//! ▌ Media Attention: High | Sentiment: Negative (72%)
//! ▌  High Risk   Acknowledge & Assign
//! ```
//!
//! The `▌` edge takes the card's risk color unless the card is selected.

use crate::ui::helpers::{self, display_width, position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ActionVariant, BodyRow, CardInfo};

/// Renders the windowed body rows starting at `row`, returning the next row.
pub fn render_body_rows(row: usize, rows: &[BodyRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for body_row in rows {
        current_row = match body_row {
            BodyRow::Heading { name, count } => {
                render_heading(current_row, name, *count, theme, cols)
            }
            BodyRow::Card(card) => render_card(current_row, card, theme, cols),
        };
    }
    current_row
}

fn render_heading(row: usize, name: &str, count: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.category_fg));
    print_padded(&format!("{name} ({count})"), cols);
    print!("{}", Theme::reset());
    row + 1
}

/// Left edge color of a card: the selection color, otherwise its risk color.
fn marker_color<'a>(card: &CardInfo, theme: &'a Theme) -> &'a str {
    if card.is_selected {
        &theme.colors.selection_bg
    } else {
        theme.colors.risk(card.risk)
    }
}

fn render_card(row: usize, card: &CardInfo, theme: &Theme, cols: usize) -> usize {
    let marker = format!("{}▌ {}", Theme::fg(marker_color(card, theme)), Theme::reset());
    let width = cols.saturating_sub(2);

    // Title line, with the selection colors across the full width.
    position_cursor(row, 1);
    print!("{marker}");
    let restore = if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{}{restore}", Theme::bold());
    let title = truncate(&card.title, width);
    helpers::render_highlighted_text(
        &title,
        &card.highlight_ranges,
        theme,
        card.is_selected,
        &restore,
    );
    print!("{}", " ".repeat(width.saturating_sub(display_width(&title))));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{marker}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_padded(&card.source, width);
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{marker}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(&card.details, width);
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{marker}");
    let badge = format!(" {} ", card.risk.label());
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("{}", Theme::bg(theme.colors.risk(card.risk)));
    print!("{badge}");
    print!("{}", Theme::reset());
    let mut used = display_width(&badge);

    if let Some(variant) = card.action {
        let color = match variant {
            ActionVariant::Destructive => &theme.colors.action_destructive,
            ActionVariant::Default => &theme.colors.action_default,
        };
        let control = format!(" {} ", ActionVariant::LABEL);
        print!("  ");
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!("{}", Theme::bg(color));
        print!("{control}");
        print!("{}", Theme::reset());
        used += 2 + display_width(&control);
    }
    print!("{}", " ".repeat(width.saturating_sub(used)));

    row + BodyRow::CARD_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    fn card(risk: RiskLevel, is_selected: bool) -> CardInfo {
        CardInfo {
            title: "Fraud Alert".to_string(),
            highlight_ranges: Vec::new(),
            source: "Reuters".to_string(),
            details: String::new(),
            risk,
            is_selected,
            action: None,
        }
    }

    #[test]
    fn card_edge_follows_risk_level() {
        let theme = Theme::default();
        let colors = &theme.colors;

        assert_eq!(marker_color(&card(RiskLevel::High, false), &theme), colors.risk_high);
        assert_eq!(marker_color(&card(RiskLevel::Medium, false), &theme), colors.risk_medium);
        assert_eq!(marker_color(&card(RiskLevel::Low, false), &theme), colors.risk_low);
        assert_eq!(marker_color(&card(RiskLevel::Unrated, false), &theme), colors.risk_low);
    }

    #[test]
    fn selected_card_edge_uses_selection_color() {
        let theme = Theme::default();
        assert_eq!(
            marker_color(&card(RiskLevel::High, true), &theme),
            theme.colors.selection_bg
        );
    }
}
