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

//! Error types for the list controller. For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)
//!
//! None of these are fatal to the [`crate::ListController`]. Fetch errors are absorbed
//! by the pagination state (the loading flag is cleared and `has_more` is left alone so
//! that a later scroll or reload retries), while config and runtime errors are surfaced
//! when the controller is constructed.

use std::{path::PathBuf, time::Duration};

use crate::PageNumber;

/// Type alias to make it easy to work with [`miette::Result`], which works hand in hand
/// w/ all the error types in this module.
pub type CommonResult<T> = miette::Result<T>;

/// Reasons a fetch did not produce usable data.
///
/// | Variant               | Produced by                                   | Retryable |
/// | --------------------- | --------------------------------------------- | --------- |
/// | [`Transport`]         | your [`crate::Fetcher`] (network, decode)     | Yes       |
/// | [`MalformedResponse`] | pagination state (eg: empty section counts)   | Yes       |
/// | [`DeadlineElapsed`]   | controller, when the fetch deadline passes    | Yes       |
/// | [`ResponderDropped`]  | a fetcher that gave up without an answer      | Yes       |
///
/// [`Transport`]: Self::Transport
/// [`MalformedResponse`]: Self::MalformedResponse
/// [`DeadlineElapsed`]: Self::DeadlineElapsed
/// [`ResponderDropped`]: Self::ResponderDropped
#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
pub enum FetchError {
    #[error("Fetching page {page} failed: {message}")]
    #[diagnostic(
        code(r3bl_infinite_list::fetch::transport),
        help("The list keeps its current items; scrolling again or reloading will retry.")
    )]
    Transport { page: PageNumber, message: String },

    #[error("Response for page {page} is malformed: {reason}")]
    #[diagnostic(
        code(r3bl_infinite_list::fetch::malformed_response),
        help("A response must report at least one section, eg: `[0]` for an empty list.")
    )]
    MalformedResponse {
        page: PageNumber,
        reason: &'static str,
    },

    #[error("Fetching page {page} did not complete within {deadline:?}")]
    #[diagnostic(
        code(r3bl_infinite_list::fetch::deadline_elapsed),
        help("Raise `fetch_deadline_ms` in the config, or set it to `null` to wait forever.")
    )]
    DeadlineElapsed { page: PageNumber, deadline: Duration },

    #[error("Fetcher for page {page} went away without responding")]
    #[diagnostic(code(r3bl_infinite_list::fetch::responder_dropped))]
    ResponderDropped { page: PageNumber },
}

impl FetchError {
    /// Convenience constructor for fetcher implementations.
    pub fn transport(page: PageNumber, message: impl Into<String>) -> Self {
        Self::Transport {
            page,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn page(&self) -> PageNumber {
        match self {
            Self::Transport { page, .. }
            | Self::MalformedResponse { page, .. }
            | Self::DeadlineElapsed { page, .. }
            | Self::ResponderDropped { page } => *page,
        }
    }
}

/// Problems with an [`crate::InfiniteListConfig`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Config is not valid JSON")]
    #[diagnostic(code(r3bl_infinite_list::config::invalid_json))]
    InvalidJson(#[source] serde_json::Error),

    #[error("Could not read config file {path:?}")]
    #[diagnostic(
        code(r3bl_infinite_list::config::read_file),
        help("Check that the file exists and that you have permission to read it.")
    )]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`initial_section_counts` must contain at least one section")]
    #[diagnostic(
        code(r3bl_infinite_list::config::empty_initial_section_counts),
        help("Use `[0]` for a list that starts with one empty section.")
    )]
    EmptyInitialSectionCounts,

    #[error("`buffer_distance` must be a finite, non negative extent, got {value}")]
    #[diagnostic(code(r3bl_infinite_list::config::invalid_buffer_distance))]
    InvalidBufferDistance { value: f64 },

    #[error("`signal_channel_capacity` must be greater than zero")]
    #[diagnostic(code(r3bl_infinite_list::config::zero_channel_capacity))]
    ZeroChannelCapacity,

    #[error("`fetch_deadline_ms` must be greater than zero")]
    #[diagnostic(
        code(r3bl_infinite_list::config::zero_fetch_deadline),
        help("Use `null` to wait forever instead.")
    )]
    ZeroFetchDeadline,
}

/// Problems constructing a [`crate::ListController`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InfiniteListError {
    #[error("ListController must be created inside a Tokio runtime")]
    #[diagnostic(
        code(r3bl_infinite_list::controller::no_tokio_runtime),
        help("Create the controller from within `#[tokio::main]` or `Runtime::block_on()`.")
    )]
    NoTokioRuntime(#[source] tokio::runtime::TryCurrentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] ConfigError),
}
