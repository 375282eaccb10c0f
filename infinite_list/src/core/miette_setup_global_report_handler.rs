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

//! Programs hosting a [`crate::ListController`] return [`crate::CommonResult`] from
//! `main()`, so config and fetch errors are rendered by miette's report handler. This
//! registers a handler sized to the current terminal width.
//!
//! - The [`miette::set_hook`] function is used to register a custom report handler.
//! - Using [`MietteHandlerOpts`] you can configure the default
//!   [`miette::MietteHandler`]. Under the hood, `build()` produces a
//!   [`miette::GraphicalReportHandler`] which is the "real" handler.

use miette::MietteHandlerOpts;

/// Fallback terminal width when it can't be queried (eg: output is piped).
pub const DEFAULT_REPORT_WIDTH: usize = 80;

/// The [`miette::ErrorHook`] is lazily evaluated.
///
/// The terminal width will be calculated just at the time of the global error handler
/// being used. So if an error never occurs, then the terminal width will never be
/// calculated.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = crossterm::terminal::size()
            .map_or(DEFAULT_REPORT_WIDTH, |(columns, _rows)| usize::from(columns));
        tracing::debug!(message = "miette::set_hook", terminal_width = terminal_width);
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
