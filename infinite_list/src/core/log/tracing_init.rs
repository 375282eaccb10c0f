/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::io;

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use crate::{DisplayPreference, TracingConfig, WriterConfig};

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
            .with_ansi(true)
    };
}

/// Install the layers from [`try_create_layers()`] as the global default subscriber.
/// When the [`WriterConfig`] is [`WriterConfig::None`] nothing is installed.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been installed.
pub fn try_initialize_logging_global(tracing_config: TracingConfig) -> miette::Result<()> {
    let Some(layers) = try_create_layers(&tracing_config)? else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|error| miette::miette!("Could not install tracing subscriber: {error}"))
}

/// Returns the layers. Once you have the layers, you can run the following:
/// `try_create_layers(..).map(|layers| tracing_subscriber::registry().with(layers).init());`
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let writer_config = tracing_config.get_writer_config();
    if writer_config == WriterConfig::None {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add more
    // layers which don't have a level filter of their own.
    return_it.push(Box::new(level_filter));

    if let Some(layer) = try_create_display_layer(level_filter, &writer_config) {
        return_it.push(layer);
    }

    if let Some(layer) = try_create_file_layer(level_filter, &writer_config)? {
        return_it.push(layer);
    }

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer. This is useful
/// for composition of layers. There's more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let preferred_display = match writer_config {
        WriterConfig::Display(it) | WriterConfig::DisplayAndFile(it, _) => *it,
        WriterConfig::None | WriterConfig::File(_) => return None,
    };

    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!();

    let layer: Box<DynLayer<S>> = match preferred_display {
        DisplayPreference::Stdout => {
            Box::new(fmt_layer.with_writer(io::stdout).with_filter(level_filter))
        }
        DisplayPreference::Stderr => {
            Box::new(fmt_layer.with_writer(io::stderr).with_filter(level_filter))
        }
    };
    Some(layer)
}

/// Same as [`try_create_display_layer()`] but for the file writer.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let tracing_log_file_path_and_prefix = match writer_config {
        WriterConfig::File(it) | WriterConfig::DisplayAndFile(_, it) => it,
        WriterConfig::None | WriterConfig::Display(_) => return Ok(None),
    };

    let fmt_layer = create_fmt!().with_ansi(false);
    let file = rolling_file_appender_impl::try_create(tracing_log_file_path_and_prefix)?;

    let layer: Box<DynLayer<S>> =
        Box::new(fmt_layer.with_writer(file).with_filter(level_filter));
    Ok(Some(layer))
}

pub mod rolling_file_appender_impl {
    use std::path::Path;

    use miette::IntoDiagnostic;
    use tracing_appender::rolling::RollingFileAppender;

    /// Note that if you wrap this up in a non blocking writer, it doesn't work. Here's
    /// an example of this:
    /// `tracing_appender::non_blocking(try_create_rolling_file_appender("foo")?)`
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no file name, or if the parent directory can't
    /// be created.
    pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
        let path = Path::new(path_str);

        let parent = path.parent().ok_or_else(|| {
            miette::miette!(
                format!("Can't access current folder {}. It might not exist, or don't have required permissions.",
                path.display())
            )
        })?;

        let file_stem = path.file_name().ok_or_else(|| {
            miette::miette!(format!(
                "Can't access file name {}. It might not exist, or don't have required permissions.",
                path.display()
            ))
        })?;

        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }

        Ok(tracing_appender::rolling::never(parent, file_stem))
    }
}
