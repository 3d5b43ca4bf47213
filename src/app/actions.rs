//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order; nothing in the library performs host
//! calls directly.
//!
//! # Example
//!
//! ```rust
//! use trustboard::app::Action;
//!
//! let actions = vec![Action::FetchFeed { request_id: 1 }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::RiskLevel;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues the feed request to the configured endpoint.
    ///
    /// The id travels in the request context and comes back with the
    /// response so stale responses can be told apart.
    FetchFeed {
        /// Identifier of this fetch.
        request_id: u64,
    },

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// The admin "Acknowledge & Assign" control was activated.
    ///
    /// No workflow is attached to it; the runtime only records the request.
    Acknowledge {
        /// Title of the acknowledged update.
        title: String,
        /// Risk level of the acknowledged update.
        risk: RiskLevel,
    },
}
