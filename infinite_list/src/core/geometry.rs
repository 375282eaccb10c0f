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

//! Surface independent geometry. All extents are in the host's own unit (pixels, points,
//! or terminal rows), along the scrolling axis unless noted otherwise.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    #[must_use]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Grid spacing for one section.
/// - `inter_item`: between items on the same line.
/// - `line`: between successive lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionSpacing {
    pub inter_item: f64,
    pub line: f64,
}

/// Snapshot of a scrolling container, as reported by the host on every scroll update.
///
/// ```text
///  current_offset ─▶ ┌──────────────┐ ─┐
///                    │   viewport   │  │ viewport_extent
///                    └──────────────┘ ─┘
///                    │              │
///                    │  (the rest)  │
///                    └──────────────┘ ◀─ content_extent
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Total length of the scrollable content.
    pub content_extent: f64,
    /// Visible length of the container.
    pub viewport_extent: f64,
    /// Distance scrolled from the start of the content.
    pub current_offset: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(content_extent: f64, viewport_extent: f64, current_offset: f64) -> Self {
        Self {
            content_extent,
            viewport_extent,
            current_offset,
        }
    }

    /// What is left to scroll through, measured from the top of the viewport.
    #[must_use]
    pub fn remaining_extent(&self) -> f64 { self.content_extent - self.current_offset }
}
