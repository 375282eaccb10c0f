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

use crate::{BufferDistance, IndexPath, InfiniteListConfig, PaginationState, ScrollMetrics};

/// Decides whether the next page should be requested. It never mutates the state.
///
/// Two forms, for two kinds of host:
///
/// | Host reports        | Method                                   | Fires when                                        |
/// | ------------------- | ---------------------------------------- | ------------------------------------------------- |
/// | scroll metrics      | [`Self::should_fetch_on_scroll()`]       | `content - offset < viewport + buffer_distance`   |
/// | each rendered row   | [`Self::should_fetch_on_item_rendered()`] | row in last section, `count - buffer_count <= row <= count` |
///
/// Neither form fires while a fetch is outstanding, or once there is nothing more to
/// load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefetchTrigger {
    pub buffer_count: usize,
    pub buffer_distance: BufferDistance,
}

impl PrefetchTrigger {
    #[must_use]
    pub fn new(buffer_count: usize, buffer_distance: BufferDistance) -> Self {
        Self {
            buffer_count,
            buffer_distance,
        }
    }

    #[must_use]
    pub fn from_config(config: &InfiniteListConfig) -> Self {
        Self::new(config.buffer_count, config.buffer_distance)
    }

    fn is_armed(state: &PaginationState) -> bool { state.has_more() && !state.is_loading() }

    #[must_use]
    pub fn should_fetch_on_scroll(
        &self,
        state: &PaginationState,
        metrics: ScrollMetrics,
    ) -> bool {
        Self::is_armed(state)
            && metrics.remaining_extent()
                < metrics.viewport_extent + self.buffer_distance.as_extent()
    }

    /// Rendering the placeholder row (one past the last real item) always fires. Rows
    /// past the placeholder don't exist, so they never fire.
    #[must_use]
    pub fn should_fetch_on_item_rendered(
        &self,
        state: &PaginationState,
        index: IndexPath,
    ) -> bool {
        if !Self::is_armed(state) {
            return false;
        }
        let counts = state.section_counts();
        if index.section != counts.last_section() {
            return false;
        }
        let last_count = counts.last_count();
        (last_count.saturating_sub(self.buffer_count)..=last_count).contains(&index.row)
    }
}

impl Default for PrefetchTrigger {
    fn default() -> Self { Self::from_config(&InfiniteListConfig::default()) }
}
