//! Background worker thread for feed decoding.
//!
//! The fetched feed body is handed to a Zellij worker thread for decoding so
//! the plugin's event loop stays responsive. Messages carry tracing context so
//! spans on both threads land in the same trace.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::DashboardWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
