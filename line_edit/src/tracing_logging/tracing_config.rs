// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumString};
use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE: &str = "line_edit.log";

/// Fields:
/// - `writers`: Vec<[WriterArg]> - Zero or more writers to use for tracing.
/// - `level`: [tracing::Level] - The log level to use for tracing.
/// - `tracing_log_file_path_and_prefix`: [String] - The file path and prefix to use for
///   the log file. Eg: `/tmp/lambda_repl.log` or `lambda_repl.log`.
#[derive(Clone, Debug, PartialEq)]
pub struct TracingConfig {
    pub writers: Vec<WriterArg>,
    pub level: tracing::Level,
    pub tracing_log_file_path_and_prefix: String,
}

impl TracingConfig {
    /// Log to a file only. This is the right choice whenever the editor owns the
    /// terminal.
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writers: vec![WriterArg::File],
            level: tracing::Level::DEBUG,
            tracing_log_file_path_and_prefix: filename
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        }
    }

    pub fn get_level_filter(&self) -> LevelFilter {
        tracing_subscriber::filter::LevelFilter::from_level(self.level)
    }
}

/// Use to parse the command line arguments (provided by `clap` crate).
///
/// - This is an intermediate representation (IR),
/// - which is converted into a [crate::WriterConfig] before it is used in the rest of
///   the system.
///
/// More info:
/// - <https://docs.rs/strum_macros/latest/strum_macros/derive.EnumString.html>
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WriterArg {
    Stdout,
    Stderr,
    File,
    #[strum(to_string = "none", serialize = "")]
    None,
}
