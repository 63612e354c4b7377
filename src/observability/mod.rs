//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter
//!                                                                  ↓
//!                                     <data_dir>/parley-otlp.json (rotating)
//! ```
//!
//! - Trace file: `~/.local/share/zellij/parley/parley-otlp.json`
//! - Rotation at 10 MB, 3 backups (`.1` newest)
//! - Filter from the `trace_level` config key, default `"info"`
//!
//! Spans opened in `handle_event` and the pipeline become OTLP spans. A
//! delivered reply records the trace id of the send that scheduled it.
//!
//! # Usage
//!
//! ```no_run
//! use parley::observability::init_tracing;
//! use parley::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file_path, SERVICE_NAME, TRACE_FILE};
