// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DynLayer, TracingConfig, WriterConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simply initialize the tracing system with the provided [TracingConfig]. If the config
/// does not name any writer, nothing is installed.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    if let Some(layers) = try_create_layers(&tracing_config)? {
        tracing_subscriber::registry().with(layers).try_init().map_err(|err| {
            miette::miette!("Unable to install the global tracing subscriber: {err}")
        })?;
    }
    Ok(())
}

/// Returns the layers. This does not initialize the tracing system. Don't forget to do
/// this manually, by calling `init` on the returned layers.
///
/// For example, once you have the layers, you can run the following:
/// `try_create_layers(..).map(|layers| tracing_subscriber::registry().with(layers).init());`
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    // Transform the `clap` crate's parsed command line arguments into a `WriterConfig`.
    let Ok(writer_config) = WriterConfig::try_from(tracing_config.writers.as_slice())
    else {
        return Ok(None);
    };

    let level_filter = tracing_config.get_level_filter();

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add more
    // layers which don't have a level filter.
    return_it.push(Box::new(level_filter));

    if let Some(layer) = writer_config.create_display_layer(level_filter) {
        return_it.push(layer);
    }

    if let Some(layer) = writer_config.try_create_file_layer(
        level_filter,
        &tracing_config.tracing_log_file_path_and_prefix,
    )? {
        return_it.push(layer);
    }

    Ok(Some(return_it))
}
