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

use tracing_core::LevelFilter;

/// Default file name used when no log file path is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "infinite_list_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level.
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level_filter`: [`LevelFilter`] - The log level to use for tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `tracing_log_file_path_and_prefix`: [String] is the file path and prefix to use for
///   the log file. Eg: `/tmp/photo_feed` or `photo_feed`.
/// - `DisplayPreference`: [`DisplayPreference`] is the preferred display to use for
///   logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference /* Stdout, Stderr */),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(
        DisplayPreference,
        String, /* tracing_log_file_path_and_prefix */
    ),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// Use to parse the command line arguments (provided by `clap` crate).
///
/// This is an intermediate representation, which is converted into [`WriterConfig`] by
/// [`WriterConfig::from_writer_args()`] before it is used in the rest of the system.
///
/// ```
/// use std::str::FromStr;
/// use r3bl_infinite_list::WriterArg;
///
/// assert_eq!(WriterArg::from_str("stdout").unwrap(), WriterArg::Stdout);
/// assert!(WriterArg::from_str("syslog").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum WriterArg {
    Stdout,
    Stderr,
    File,
    None,
}

impl WriterConfig {
    /// Combine zero or more parsed writer args. Display wins over none, and a file writer
    /// combines with a display writer. When both `stdout` and `stderr` are given, the
    /// first one wins.
    #[must_use]
    pub fn from_writer_args(args: &[WriterArg], log_file_path: impl Into<String>) -> Self {
        let display = args.iter().find_map(|arg| match arg {
            WriterArg::Stdout => Some(DisplayPreference::Stdout),
            WriterArg::Stderr => Some(DisplayPreference::Stderr),
            WriterArg::File | WriterArg::None => None,
        });
        let file = args.contains(&WriterArg::File);

        match (display, file) {
            (Some(display), true) => Self::DisplayAndFile(display, log_file_path.into()),
            (Some(display), false) => Self::Display(display),
            (None, true) => Self::File(log_file_path.into()),
            (None, false) => Self::None,
        }
    }
}

impl TracingConfig {
    /// Log to a file, at `DEBUG` level. Uses [`DEFAULT_LOG_FILE_NAME`] if no `filename`
    /// is given.
    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    /// Log to the given display, at `DEBUG` level.
    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}
