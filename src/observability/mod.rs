//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → FileSpanExporter
//!                                                                   ↓
//!                               ~/.local/share/zellij/trustboard/trustboard-otlp.json
//! ```
//!
//! Each line of the trace file is a complete OTLP JSON document. The file
//! rotates at 10 MiB and keeps three numbered backups.
//!
//! The level comes from the `trace_level` plugin option (an `EnvFilter`
//! directive), defaulting to `info`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: size-rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotatingFileWriter;
pub use init::{init_tracing, trace_file_path, try_init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
