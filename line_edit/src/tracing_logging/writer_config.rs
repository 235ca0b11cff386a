// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{WriterArg, rolling_file_appender_impl};
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, registry::LookupSpan};

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriterConfig {
    Display(DisplayPreference),
    File,
    DisplayAndFile(DisplayPreference),
}

/// 1. It is expected that arguments are passed in via the command line (using `clap`).
/// 1. These are then converted into a list of [WriterArg]s.
/// 1. Which are then converted into a [WriterConfig] using this trait implementation.
///
/// When both `stdout` and `stderr` are requested, `stderr` wins, since it is the one that
/// does not get mixed in with program output.
impl TryFrom<&[WriterArg]> for WriterConfig {
    type Error = miette::Report;

    fn try_from(writers: &[WriterArg]) -> Result<Self, Self::Error> {
        let contains_file_writer = writers.contains(&WriterArg::File);
        let display = if writers.contains(&WriterArg::Stderr) {
            Some(DisplayPreference::Stderr)
        } else if writers.contains(&WriterArg::Stdout) {
            Some(DisplayPreference::Stdout)
        } else {
            None
        };
        match (contains_file_writer, display) {
            (true, Some(pref)) => Ok(WriterConfig::DisplayAndFile(pref)),
            (true, None) => Ok(WriterConfig::File),
            (false, Some(pref)) => Ok(WriterConfig::Display(pref)),
            (false, None) => Err(miette::miette!("No valid writer configuration found")),
        }
    }
}

impl WriterConfig {
    fn display_preference(self) -> Option<DisplayPreference> {
        match self {
            WriterConfig::Display(pref) | WriterConfig::DisplayAndFile(pref) => Some(pref),
            WriterConfig::File => None,
        }
    }

    fn writes_to_file(self) -> bool {
        matches!(self, WriterConfig::File | WriterConfig::DisplayAndFile(_))
    }

    /// This erases the concrete type of the writer, and returns a boxed layer. This
    /// is useful for composition of layers. There's more info in the docs
    /// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
    pub fn create_display_layer<S>(
        self,
        level_filter: LevelFilter,
    ) -> Option<Box<DynLayer<S>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        // Shared configuration regardless of where logs are output to.
        let fmt_layer = create_fmt!().with_ansi(true);

        match self.display_preference()? {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        }
    }

    /// Same as [WriterConfig::create_display_layer], but for the log file. Colors are
    /// turned off so the file stays greppable.
    pub fn try_create_file_layer<S>(
        self,
        level_filter: LevelFilter,
        tracing_log_file_path_and_prefix: &str,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        if !self.writes_to_file() {
            return Ok(None);
        }

        let file = rolling_file_appender_impl::try_create(tracing_log_file_path_and_prefix)?;
        let fmt_layer = create_fmt!().with_ansi(false);
        Ok(Some(Box::new(
            fmt_layer.with_writer(file).with_filter(level_filter),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(&[WriterArg::File], WriterConfig::File)]
    #[test_case(&[WriterArg::Stdout], WriterConfig::Display(DisplayPreference::Stdout))]
    #[test_case(&[WriterArg::Stderr, WriterArg::Stdout], WriterConfig::Display(DisplayPreference::Stderr))]
    #[test_case(&[WriterArg::Stdout, WriterArg::File], WriterConfig::DisplayAndFile(DisplayPreference::Stdout))]
    fn test_writer_config_from_args(args: &[WriterArg], expected: WriterConfig) {
        assert_eq!(WriterConfig::try_from(args).unwrap(), expected);
    }

    #[test_case(&[] ; "empty")]
    #[test_case(&[WriterArg::None] ; "none only")]
    fn test_writer_config_rejects_no_writers(args: &[WriterArg]) {
        assert!(WriterConfig::try_from(args).is_err());
    }

    #[test]
    fn test_file_config_has_no_display_layer() {
        let layer = WriterConfig::File
            .create_display_layer::<tracing_subscriber::Registry>(LevelFilter::DEBUG);
        assert!(layer.is_none());
    }

    #[test]
    fn test_display_config_has_no_file_layer() {
        let layer = WriterConfig::Display(DisplayPreference::Stderr)
            .try_create_file_layer::<tracing_subscriber::Registry>(
                LevelFilter::DEBUG,
                "unused.log",
            )
            .unwrap();
        assert!(layer.is_none());
    }
}
