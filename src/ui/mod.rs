//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from application state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Region renderers (header, cards, filter panel, ...)
//! - [`helpers`]: Cursor positioning, match highlighting, truncation
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Body, BodyRow, CardInfo, EmptyState, FilterPanelInfo, FooterInfo, HeaderInfo, NoticeInfo,
    SearchBarInfo, UIViewModel,
};
