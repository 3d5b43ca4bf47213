//! Infrastructure layer for host and sandbox interactions.
//!
//! - [`paths`]: sandbox path translation and the data directory
//! - [`feed`]: the feed request handed to the host's `web_request`

pub mod feed;
pub mod paths;

pub use feed::{request_id_from_context, FeedRequest, DEFAULT_ENDPOINT};
pub use paths::{expand_tilde, get_data_dir};
