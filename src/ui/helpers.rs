//! Shared rendering utilities.
//!
//! Low-level helpers used across components: cursor positioning, search match
//! highlighting and width-aware truncation. All text measurements are in
//! characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use trustboard::ui::helpers::{find_match_ranges, truncate};
//!
//! assert_eq!(find_match_ranges("Fraud Alert", "alert"), vec![(6, 11)]);
//! assert_eq!(truncate("Fraud Alert", 6), "Fraud…");
//! ```

use crate::domain::fold_case;
use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Finds the non-overlapping, case-insensitive occurrences of `needle` in
/// `text`, as character ranges.
///
/// Both sides go through [`fold_case`], the fold the title filter uses, so a
/// title is highlighted exactly when it passes the search. An empty needle has
/// no matches.
#[must_use]
pub fn find_match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    // Folded characters paired with the index of their source character.
    let hay: Vec<(char, usize)> = text
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |folded| (folded, index)))
        .collect();
    let needle: Vec<char> = fold_case(needle).chars().collect();

    if needle.is_empty() || needle.len() > hay.len() {
        return Vec::new();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        let window = &hay[start..start + needle.len()];
        if window.iter().map(|(c, _)| *c).eq(needle.iter().copied()) {
            let first = window[0].1;
            let end = window[needle.len() - 1].1 + 1;
            match ranges.last_mut() {
                // Two matches inside one expanded character share it.
                Some(last) if first < last.1 => last.1 = end,
                _ => ranges.push((first, end)),
            }
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

/// Prints `text` with the given character ranges highlighted.
///
/// Highlighting is skipped on the selected card so the selection colors win.
/// After each highlight the `restore` sequence is re-applied.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Prints `text` left-aligned and padded with spaces to `width` characters.
pub fn print_padded(text: &str, width: usize) {
    let text = truncate(text, width);
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(display_width(&text))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterState, Update};

    #[test]
    fn matches_are_case_insensitive_and_disjoint() {
        assert_eq!(find_match_ranges("Refund Fraud", "FRAUD"), vec![(7, 12)]);
        assert_eq!(find_match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(find_match_ranges("Spam Wave", "").is_empty());
        assert!(find_match_ranges("Spam", "Spam Wave").is_empty());
    }

    #[test]
    fn match_ranges_count_characters() {
        assert_eq!(find_match_ranges("Café Fraud", "fraud"), vec![(5, 10)]);
    }

    #[test]
    fn expanding_folds_map_back_to_title_characters() {
        // 'İ' lowercases to two characters.
        assert_eq!(find_match_ranges("İİ fraud", "FRAUD"), vec![(3, 8)]);
        assert_eq!(find_match_ranges("İstanbul Ring", "stanbul"), vec![(1, 8)]);
    }

    #[test]
    fn highlighting_agrees_with_the_title_filter() {
        let updates = vec![Update::new("İstanbul Ring", "Fraud")];
        for term in ["istanbul", "stanbul", "İSTANBUL", "ring"] {
            let filters = FilterState {
                search: term.to_string(),
                ..FilterState::default()
            };
            let passes = filters.matches(&updates[0]);
            let highlighted = !find_match_ranges(updates[0].display_title(), term).is_empty();
            assert_eq!(passes, highlighted, "search term {term:?}");
        }
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Trust & Safety", 5), "Trus…");
        assert_eq!(truncate("anything", 0), "");
    }
}
