//! Category derivation and grouping.
//!
//! Categories are derived from the loaded collection rather than stored: the
//! distinct category names in first-seen order. Grouping partitions a filtered
//! index list by category, keeping the feed order inside each group.

use crate::domain::update::Update;

/// Filtered updates belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Category heading.
    pub name: String,
    /// Positions into the update collection, in feed order.
    pub items: Vec<usize>,
}

/// Distinct category names in first-seen order.
///
/// Updates without a category contribute the `Uncategorized` heading.
///
/// # Examples
///
/// ```
/// use trustboard::domain::{derive_categories, Update};
///
/// let updates = vec![
///     Update::new("a", "Fraud"),
///     Update::new("b", "Spam"),
///     Update::new("c", "Fraud"),
/// ];
/// assert_eq!(derive_categories(&updates), vec!["Fraud", "Spam"]);
/// ```
#[must_use]
pub fn derive_categories(updates: &[Update]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for update in updates {
        let name = update.category_name();
        if !categories.iter().any(|c| c == name) {
            categories.push(name.to_string());
        }
    }
    categories
}

/// Partitions `visible` (positions into `updates`) by category.
///
/// One group per entry of `categories`, in that order, including categories
/// with no visible items. Every visible index lands in exactly one group as
/// long as `categories` was derived from `updates`.
#[must_use]
pub fn group_by_category(
    updates: &[Update],
    visible: &[usize],
    categories: &[String],
) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = categories
        .iter()
        .map(|name| CategoryGroup {
            name: name.clone(),
            items: Vec::new(),
        })
        .collect();

    for &index in visible {
        let Some(update) = updates.get(index) else {
            continue;
        };
        if let Some(group) = groups.iter_mut().find(|g| g.name == update.category_name()) {
            group.items.push(index);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{filter_indices, FilterState};

    fn updates() -> Vec<Update> {
        let mut untitled = Update::new("orphan", "x");
        untitled.category = None;
        vec![
            Update::new("card skimming", "Fraud"),
            Update::new("bot farm", "Spam"),
            untitled,
            Update::new("refund scam", "Fraud"),
            Update::new("link farm", "Spam"),
        ]
    }

    #[test]
    fn categories_keep_first_seen_order_without_duplicates() {
        assert_eq!(
            derive_categories(&updates()),
            vec!["Fraud", "Spam", "Uncategorized"]
        );
    }

    #[test]
    fn grouping_partitions_the_filtered_collection() {
        let updates = updates();
        let categories = derive_categories(&updates);
        let filters = FilterState {
            search: "farm".to_string(),
            ..Default::default()
        };
        let visible = filter_indices(&updates, &filters);
        let groups = group_by_category(&updates, &visible, &categories);

        let mut flattened: Vec<usize> = groups.iter().flat_map(|g| g.items.clone()).collect();
        flattened.sort_unstable();
        assert_eq!(flattened, visible);

        assert_eq!(groups[0].items, Vec::<usize>::new());
        assert_eq!(groups[1].items, vec![1, 4]);
    }

    #[test]
    fn groups_preserve_feed_order() {
        let updates = updates();
        let categories = derive_categories(&updates);
        let all: Vec<usize> = (0..updates.len()).collect();
        let groups = group_by_category(&updates, &all, &categories);

        assert_eq!(groups[0].items, vec![0, 3]);
        assert_eq!(groups[2].items, vec![2]);
        assert_eq!(groups.iter().map(|g| g.items.len()).sum::<usize>(), updates.len());
    }
}
