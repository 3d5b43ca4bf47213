//! Error types for the trustboard plugin.
//!
//! This module defines the centralized error type [`DashboardError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for dashboard operations.
///
/// Covers everything that can go wrong between fetching the update feed and
/// rendering it: transport failures, undecodable bodies, theme loading, worker
/// communication and user-entered filter values.
///
/// # Examples
///
/// ```
/// use trustboard::DashboardError;
///
/// fn check_status(status: u16) -> Result<(), DashboardError> {
///     if status == 200 {
///         Ok(())
///     } else {
///         Err(DashboardError::Feed(format!("endpoint returned HTTP {status}")))
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The update feed could not be fetched.
    ///
    /// Raised for non-success HTTP statuses or transport errors reported by
    /// the host.
    #[error("Feed error: {0}")]
    Feed(String),

    /// The feed body is not valid JSON.
    ///
    /// Automatically converts from `serde_json::Error`.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A date-range bound could not be parsed.
    ///
    /// Contains the rejected input text.
    #[error("Invalid date: {0:?} (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
    Date(String),
}

/// A specialized `Result` type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
