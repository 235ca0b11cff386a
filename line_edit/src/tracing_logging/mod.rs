// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging for programs that own the terminal.
//!
//! While the editor has the terminal in raw mode, anything printed to stdout lands in the
//! middle of the user's line. So the usual setup for a program built on this crate is to
//! log to a file, and only log to a display writer when running without the editor.
//!
//! ```no_run
//! use line_edit::{TracingConfig, WriterArg, tracing_setup};
//!
//! # fn main() -> miette::Result<()> {
//! tracing_setup::init(TracingConfig {
//!     writers: vec![WriterArg::File],
//!     level: tracing::Level::DEBUG,
//!     tracing_log_file_path_and_prefix: "line_edit.log".into(),
//! })?;
//! # Ok(())
//! # }
//! ```

// Attach.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_setup;
pub mod writer_config;

// Re-export.
pub use tracing_config::*;
pub use writer_config::*;
