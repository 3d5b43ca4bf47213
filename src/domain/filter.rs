//! Facet filters and the filter evaluator.
//!
//! [`FilterState`] holds the nine independent filter conditions: a free-text
//! title search, six multi-valued facets and two optional date bounds. An
//! update is visible when all nine hold. [`filter_indices`] evaluates the
//! state over a collection and returns the surviving positions in feed
//! order, so filtering never reorders the feed.
//!
//! A facet with no selected values places no constraint on the result. That
//! rule is encoded in [`FacetFilter`] itself: `OneOf` never holds an empty
//! set, so "nothing selected" and "everything excluded" cannot be confused.

use crate::domain::error::{DashboardError, Result};
use crate::domain::update::{parse_date, parse_timestamp, Update};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// One independently filterable attribute of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Country,
    RiskLevel,
    Gender,
    Impact,
    MediaAttention,
    Sentiment,
}

impl Facet {
    /// All facets in display order.
    pub const ALL: [Self; 6] = [
        Self::Country,
        Self::RiskLevel,
        Self::Gender,
        Self::Impact,
        Self::MediaAttention,
        Self::Sentiment,
    ];

    /// Human-readable facet name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::RiskLevel => "Risk Level",
            Self::Gender => "Gender",
            Self::Impact => "Impact",
            Self::MediaAttention => "Media Attention",
            Self::Sentiment => "Sentiment",
        }
    }

    /// Options offered for this facet before any data is loaded.
    #[must_use]
    pub const fn default_options(self) -> &'static [&'static str] {
        match self {
            Self::Country => &["US", "UK", "Canada", "Germany", "Australia"],
            Self::RiskLevel => &["High Risk", "Medium Risk", "Low Risk"],
            Self::Gender => &["Male", "Female", "Non-binary"],
            Self::Impact => &["High Impact", "Medium Impact", "Low Impact"],
            Self::MediaAttention => &["High", "Medium", "Low"],
            Self::Sentiment => &["Positive", "Neutral", "Negative"],
        }
    }

    /// The update's value for this facet, if it has one.
    ///
    /// Unrated risk levels have no facet value, so they never match a risk
    /// selection.
    #[must_use]
    pub fn value_of(self, update: &Update) -> Option<&str> {
        match self {
            Self::Country => update.country.as_deref(),
            Self::RiskLevel => update
                .risk_level
                .is_rated()
                .then(|| update.risk_level.label()),
            Self::Gender => update.gender.as_deref(),
            Self::Impact => update.impact.as_deref(),
            Self::MediaAttention => update.media_attention.as_deref(),
            Self::Sentiment => update.sentiment.as_deref(),
        }
    }

    /// Default options followed by any other values present in `updates`,
    /// in first-seen order.
    #[must_use]
    pub fn options_for(self, updates: &[Update]) -> Vec<String> {
        let mut options: Vec<String> = self
            .default_options()
            .iter()
            .map(ToString::to_string)
            .collect();

        for value in updates.iter().filter_map(|u| self.value_of(u)) {
            if !options.iter().any(|o| o == value) {
                options.push(value.to_string());
            }
        }

        options
    }
}

/// Selection for one multi-valued facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetFilter {
    /// No constraint: every update passes.
    #[default]
    Any,
    /// Only updates whose value is in the set pass. Never empty.
    OneOf(BTreeSet<String>),
}

impl FacetFilter {
    /// Builds a filter from selected values; no values means [`FacetFilter::Any`].
    ///
    /// # Examples
    ///
    /// ```
    /// use trustboard::domain::FacetFilter;
    ///
    /// assert_eq!(FacetFilter::from_values(Vec::<String>::new()), FacetFilter::Any);
    /// assert!(FacetFilter::from_values(["US"]).allows(Some("US")));
    /// ```
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::Any
        } else {
            Self::OneOf(set)
        }
    }

    /// Whether an update with the given facet value passes this filter.
    #[must_use]
    pub fn allows(&self, value: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(set) => value.is_some_and(|v| set.contains(v)),
        }
    }

    /// Whether `value` is currently selected.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        matches!(self, Self::OneOf(set) if set.contains(value))
    }

    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Selected values in sorted order (empty for `Any`).
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Any => Vec::new(),
            Self::OneOf(set) => set.iter().map(String::as_str).collect(),
        }
    }

    /// Adds `value` to the selection, or removes it if already selected.
    ///
    /// Removing the last value turns the filter back into `Any`.
    pub fn toggle(&mut self, value: &str) {
        match self {
            Self::Any => {
                *self = Self::from_values([value]);
            }
            Self::OneOf(set) => {
                if !set.remove(value) {
                    set.insert(value.to_string());
                }
                if set.is_empty() {
                    *self = Self::Any;
                }
            }
        }
    }
}

/// Which end of the date range a bound constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Start,
    End,
}

impl BoundSide {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Date",
            Self::End => "End Date",
        }
    }
}

/// One end of the published-date range, as entered and as resolved.
///
/// A bare calendar date covers the whole UTC day: a start bound resolves to
/// the first instant of the day, an end bound to the last. Full timestamps
/// resolve exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBound {
    /// Text as the user entered it.
    pub input: String,
    /// Inclusive instant the bound compares against.
    pub instant: DateTime<Utc>,
}

impl DateBound {
    /// Parses a bound for the given side of the range.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Date`] if `text` is neither `YYYY-MM-DD` nor
    /// a timestamp accepted by the feed decoder.
    ///
    /// # Examples
    ///
    /// ```
    /// use trustboard::domain::filter::{BoundSide, DateBound};
    ///
    /// let end = DateBound::parse("2024-02-05", BoundSide::End)?;
    /// assert_eq!(end.instant.to_rfc3339(), "2024-02-05T23:59:59.999999999+00:00");
    /// # Ok::<(), trustboard::DashboardError>(())
    /// ```
    pub fn parse(text: &str, side: BoundSide) -> Result<Self> {
        let input = text.trim().to_string();

        let instant = if let Some(date) = parse_date(&input) {
            let naive = match side {
                BoundSide::Start => date.and_hms_opt(0, 0, 0),
                BoundSide::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
            };
            naive.map(|n| n.and_utc())
        } else {
            parse_timestamp(&input)
        };

        match instant {
            Some(instant) => Ok(Self { input, instant }),
            None => Err(DashboardError::Date(input)),
        }
    }
}

/// Complete filter state of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Case-insensitive title substring. Empty matches everything.
    pub search: String,
    pub country: FacetFilter,
    pub risk_level: FacetFilter,
    pub gender: FacetFilter,
    pub impact: FacetFilter,
    pub media_attention: FacetFilter,
    pub sentiment: FacetFilter,
    /// Inclusive lower bound on `published`.
    pub start: Option<DateBound>,
    /// Inclusive upper bound on `published`.
    pub end: Option<DateBound>,
}

impl FilterState {
    #[must_use]
    pub const fn facet(&self, facet: Facet) -> &FacetFilter {
        match facet {
            Facet::Country => &self.country,
            Facet::RiskLevel => &self.risk_level,
            Facet::Gender => &self.gender,
            Facet::Impact => &self.impact,
            Facet::MediaAttention => &self.media_attention,
            Facet::Sentiment => &self.sentiment,
        }
    }

    pub fn facet_mut(&mut self, facet: Facet) -> &mut FacetFilter {
        match facet {
            Facet::Country => &mut self.country,
            Facet::RiskLevel => &mut self.risk_level,
            Facet::Gender => &mut self.gender,
            Facet::Impact => &mut self.impact,
            Facet::MediaAttention => &mut self.media_attention,
            Facet::Sentiment => &mut self.sentiment,
        }
    }

    #[must_use]
    pub const fn bound(&self, side: BoundSide) -> Option<&DateBound> {
        match side {
            BoundSide::Start => self.start.as_ref(),
            BoundSide::End => self.end.as_ref(),
        }
    }

    pub fn set_bound(&mut self, side: BoundSide, bound: Option<DateBound>) {
        match side {
            BoundSide::Start => self.start = bound,
            BoundSide::End => self.end = bound,
        }
    }

    /// Whether every condition is at its neutral default.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of conditions currently constraining the result.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let facets = Facet::ALL.iter().filter(|f| !self.facet(**f).is_any()).count();
        let search = usize::from(!self.search.is_empty());
        facets + search + usize::from(self.start.is_some()) + usize::from(self.end.is_some())
    }

    /// Resets every condition to its neutral default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluates all nine conditions against one update.
    #[must_use]
    pub fn matches(&self, update: &Update) -> bool {
        self.matches_with_needle(update, &fold_case(&self.search))
    }

    fn matches_with_needle(&self, update: &Update, needle: &str) -> bool {
        let title_ok = needle.is_empty()
            || update
                .title
                .as_deref()
                .is_some_and(|title| fold_case(title).contains(needle));

        title_ok
            && Facet::ALL
                .iter()
                .all(|facet| self.facet(*facet).allows(facet.value_of(update)))
            && self.within_range(update.published)
    }

    fn within_range(&self, published: Option<DateTime<Utc>>) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(published) = published else {
            return false;
        };
        self.start.as_ref().map_or(true, |b| published >= b.instant)
            && self.end.as_ref().map_or(true, |b| published <= b.instant)
    }
}

/// Case fold shared by title search and match highlighting.
///
/// Lowercases one character at a time, so every folded character can be
/// traced back to the title character it came from.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Returns the positions of updates passing `filters`, in feed order.
///
/// # Examples
///
/// ```
/// use trustboard::domain::{filter_indices, FilterState, Update};
///
/// let updates = vec![Update::new("Fraud Alert", "Fraud"), Update::new("Spam Wave", "Spam")];
/// let filters = FilterState { search: "FRAUD".to_string(), ..Default::default() };
/// assert_eq!(filter_indices(&updates, &filters), vec![0]);
/// ```
#[must_use]
pub fn filter_indices(updates: &[Update], filters: &FilterState) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "filter_indices",
        total = updates.len(),
        active_filters = filters.active_count()
    )
    .entered();

    let needle = fold_case(&filters.search);
    let visible: Vec<usize> = updates
        .iter()
        .enumerate()
        .filter(|(_, update)| filters.matches_with_needle(update, &needle))
        .map(|(index, _)| index)
        .collect();

    tracing::debug!(visible = visible.len(), "filters evaluated");
    visible
}
