//! Domain layer for the trustboard plugin.
//!
//! Holds the update model, feed decoding, the filter evaluator and category
//! grouping. Nothing in here depends on Zellij APIs, so the whole layer can be
//! exercised on the host target.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`update`]: `Update` record, `RiskLevel`, defensive feed decoding
//! - [`filter`]: Facet filters, date bounds and the filter evaluator
//! - [`grouping`]: Category derivation and partitioning by category
//!
//! # Examples
//!
//! ```
//! use trustboard::domain::{decode_feed, filter_indices, FilterState};
//!
//! let body = br#"[{"title": "Fraud Alert", "category": "Fraud"}]"#;
//! let feed = decode_feed(body)?;
//! let visible = filter_indices(&feed.updates, &FilterState::default());
//! assert_eq!(visible, vec![0]);
//! # Ok::<(), trustboard::DashboardError>(())
//! ```

pub mod error;
pub mod filter;
pub mod grouping;
pub mod update;

pub use error::{DashboardError, Result};
pub use filter::{filter_indices, fold_case, BoundSide, DateBound, Facet, FacetFilter, FilterState};
pub use grouping::{derive_categories, group_by_category, CategoryGroup};
pub use update::{decode_feed, DecodedFeed, RiskLevel, Update};
