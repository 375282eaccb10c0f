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

//! Configuration for the [`crate::ListController`].
//!
//! Every field has a named default, so a config file only needs to mention what it
//! changes:
//!
//! ```
//! use r3bl_infinite_list::{BufferDistance, InfiniteListConfig};
//!
//! let config = InfiniteListConfig::try_from_json_str(r#"{ "buffer_count": 8 }"#).unwrap();
//! assert_eq!(config.buffer_count, 8);
//! assert_eq!(config.buffer_distance, BufferDistance::Fixed(500.0));
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EdgeInsets, SectionCounts, SectionSpacing, Size, ok};

mod defaults {
    use super::{BufferDistance, EdgeInsets, LayoutDefaults, Size};

    pub const BUFFER_COUNT: usize = 5;
    pub const BUFFER_DISTANCE: BufferDistance = BufferDistance::Fixed(500.0);
    pub const FETCH_DEADLINE_MS: Option<u64> = Some(30_000);
    pub const SIGNAL_CHANNEL_CAPACITY: usize = 1_000;

    pub const LAYOUT: LayoutDefaults = LayoutDefaults {
        item_size: Size {
            width: 100.0,
            height: 100.0,
        },
        row_height: 45.0,
        placeholder_extent: 100.0,
        section_insets: EdgeInsets::ZERO,
        inter_item_spacing: 0.0,
        line_spacing: 0.0,
        header_height: 0.0,
        footer_height: 0.0,
    };

    pub fn initial_section_counts() -> Vec<usize> { vec![0] }
}

/// How close to the end of the content (along the scrolling axis) the next page gets
/// requested, for the scroll metric form of the [`crate::PrefetchTrigger`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferDistance {
    /// A fixed margin in the host's unit.
    Fixed(f64),
    /// `count` rows of `row_height` each.
    Rows { count: usize, row_height: f64 },
}

impl BufferDistance {
    /// The margin as a single extent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_extent(&self) -> f64 {
        match *self {
            BufferDistance::Fixed(extent) => extent,
            BufferDistance::Rows { count, row_height } => count as f64 * row_height,
        }
    }
}

impl Default for BufferDistance {
    fn default() -> Self { defaults::BUFFER_DISTANCE }
}

/// Named fallbacks for every optional [`crate::Renderer`] layout hook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDefaults {
    /// Grid item size when [`crate::Renderer::size_for()`] has no opinion.
    pub item_size: Size,
    /// Row height when [`crate::Renderer::row_height_for()`] has no opinion. Also the
    /// height of the placeholder row.
    pub row_height: f64,
    /// Height of the placeholder cell in a grid. Its width is always the container's.
    pub placeholder_extent: f64,
    pub section_insets: EdgeInsets,
    pub inter_item_spacing: f64,
    pub line_spacing: f64,
    /// Only applies to sections that have a header, see
    /// [`crate::Renderer::header_for()`].
    pub header_height: f64,
    pub footer_height: f64,
}

impl LayoutDefaults {
    #[must_use]
    pub fn section_spacing(&self) -> SectionSpacing {
        SectionSpacing {
            inter_item: self.inter_item_spacing,
            line: self.line_spacing,
        }
    }
}

impl Default for LayoutDefaults {
    fn default() -> Self { defaults::LAYOUT }
}

/// Configuration for a [`crate::ListController`]. Load it from JSON with
/// [`Self::try_from_json_str()`] or [`Self::try_from_json_file()`], or start from
/// [`Default`] and tweak fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteListConfig {
    /// Index form of the trigger: fire when a rendered row is within this many rows of
    /// the end of the last section.
    pub buffer_count: usize,
    /// Scroll metric form of the trigger.
    pub buffer_distance: BufferDistance,
    /// A fetch that hasn't resolved after this long fails with
    /// [`crate::FetchError::DeadlineElapsed`]. `None` waits forever.
    pub fetch_deadline_ms: Option<u64>,
    /// Shape the counts are reset to on attach and reload.
    pub initial_section_counts: Vec<usize>,
    /// Capacity for [`crate::create_signal_channel()`].
    pub signal_channel_capacity: usize,
    pub layout: LayoutDefaults,
}

impl Default for InfiniteListConfig {
    fn default() -> Self {
        Self {
            buffer_count: defaults::BUFFER_COUNT,
            buffer_distance: defaults::BUFFER_DISTANCE,
            fetch_deadline_ms: defaults::FETCH_DEADLINE_MS,
            initial_section_counts: defaults::initial_section_counts(),
            signal_channel_capacity: defaults::SIGNAL_CHANNEL_CAPACITY,
            layout: defaults::LAYOUT,
        }
    }
}

impl InfiniteListConfig {
    /// Parse and [`validate`](Self::validate) a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON can't be parsed, or if it fails validation.
    pub fn try_from_json_str(json: &str) -> miette::Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::InvalidJson)?;
        config.validate()?;
        ok!(config)
    }

    /// Read, parse and [`validate`](Self::validate) a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, or if its contents are not a valid
    /// config.
    pub fn try_from_json_file(path: impl AsRef<Path>) -> miette::Result<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(message = "📑 loaded list config", path = ?path);

        Self::try_from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_section_counts.is_empty() {
            return Err(ConfigError::EmptyInitialSectionCounts);
        }
        let extent = self.buffer_distance.as_extent();
        if !extent.is_finite() || extent < 0.0 {
            return Err(ConfigError::InvalidBufferDistance { value: extent });
        }
        if self.signal_channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.fetch_deadline_ms == Some(0) {
            return Err(ConfigError::ZeroFetchDeadline);
        }
        ok!()
    }

    #[must_use]
    pub fn fetch_deadline(&self) -> Option<Duration> {
        self.fetch_deadline_ms.map(Duration::from_millis)
    }

    /// The validated initial shape. Falls back to `[0]` if the field was emptied after
    /// validation.
    #[must_use]
    pub fn initial_shape(&self) -> SectionCounts {
        SectionCounts::try_new(self.initial_section_counts.clone()).unwrap_or_default()
    }
}
