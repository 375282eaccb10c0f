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

//! Host adapter for surfaces where every row has the same height, eg: a terminal list.
//!
//! The sections are flattened into one run of rows (the placeholder is the last row
//! while there is more to load). The viewport is a window over that run:
//!
//! ```text
//!   flat row   index path
//!   ┌───┬──────────────┐
//!   │ 0 │ [0, 0]       │
//!   │ 1 │ [0, 1]       │ ◀─ scroll_offset_index ─┐
//!   │ 2 │ [1, 0]       │ ◀─ cursor_row           │ viewport_height = 3
//!   │ 3 │ [1, 1]       │                         ┘
//!   │ 4 │ [1, 2] ⏳    │ placeholder
//!   └───┴──────────────┘
//! ```

use crate::{IndexPath, ListController, PlaceholderManager, ScrollMetrics};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowViewport {
    /// First visible flat row.
    pub scroll_offset_index: usize,
    /// Number of rows that fit.
    pub viewport_height: usize,
    /// Height of one row in the unit used for [`ScrollMetrics`].
    pub row_height: f64,
    /// Flat row of the cursor.
    pub cursor_row: usize,
}

impl RowViewport {
    #[must_use]
    pub fn new(viewport_height: usize, row_height: f64) -> Self {
        Self {
            scroll_offset_index: 0,
            viewport_height,
            row_height,
            cursor_row: 0,
        }
    }

    /// Back to the top. Call this on [`crate::ListSignal::DidReload`].
    pub fn reset(&mut self) {
        self.scroll_offset_index = 0;
        self.cursor_row = 0;
    }

    /// Flat rows currently in the window, mapped back to index paths.
    #[must_use]
    pub fn visible_index_paths<C: 'static>(
        &self,
        controller: &ListController<C>,
    ) -> Vec<IndexPath> {
        let state = controller.state();
        (self.scroll_offset_index..self.scroll_offset_index + self.viewport_height)
            .map_while(|row| PlaceholderManager::index_path_for_flat_row(state, row))
            .collect()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_metrics<C: 'static>(&self, controller: &ListController<C>) -> ScrollMetrics {
        ScrollMetrics::new(
            controller.total_item_count() as f64 * self.row_height,
            self.viewport_height as f64 * self.row_height,
            self.scroll_offset_index as f64 * self.row_height,
        )
    }

    /// Scroll by `delta` rows (negative is up), clamped to the content, and report the
    /// new position to the controller. The cursor is kept inside the window. Returns
    /// `true` if a fetch was started.
    pub fn scroll_by<C: 'static>(
        &mut self,
        delta: isize,
        controller: &mut ListController<C>,
    ) -> bool {
        let max_offset = controller
            .total_item_count()
            .saturating_sub(self.viewport_height);
        self.scroll_offset_index = self
            .scroll_offset_index
            .saturating_add_signed(delta)
            .min(max_offset);

        let last_visible = self.scroll_offset_index + self.viewport_height.saturating_sub(1);
        self.cursor_row = self
            .cursor_row
            .clamp(self.scroll_offset_index, last_visible.max(self.scroll_offset_index));

        let metrics = self.scroll_metrics(controller);
        controller.on_scroll_position_changed(metrics)
    }

    /// Move the cursor by `delta` rows, scrolling the window if necessary.
    pub fn move_cursor_by<C: 'static>(
        &mut self,
        delta: isize,
        controller: &mut ListController<C>,
    ) -> bool {
        let last_row = controller.total_item_count().saturating_sub(1);
        self.cursor_row = self.cursor_row.saturating_add_signed(delta).min(last_row);
        self.ensure_cursor_visible();
        let metrics = self.scroll_metrics(controller);
        controller.on_scroll_position_changed(metrics)
    }

    /// Adjusts `scroll_offset_index` if the cursor is above or below the viewport.
    fn ensure_cursor_visible(&mut self) {
        if self.cursor_row < self.scroll_offset_index {
            self.scroll_offset_index = self.cursor_row;
        } else if self.cursor_row >= self.scroll_offset_index + self.viewport_height {
            self.scroll_offset_index = self.cursor_row + 1 - self.viewport_height.max(1);
        }
    }

    /// Select the item under the cursor. `false` for the placeholder.
    pub fn select_cursor<C: 'static>(&self, controller: &mut ListController<C>) -> bool {
        PlaceholderManager::index_path_for_flat_row(controller.state(), self.cursor_row)
            .is_some_and(|index| controller.select(index))
    }

    /// Report each visible row to [`ListController::on_item_rendered()`] and collect the
    /// cells to draw, top to bottom.
    pub fn render_visible<C: 'static>(
        &self,
        controller: &mut ListController<C>,
    ) -> Vec<(IndexPath, C)> {
        let visible = self.visible_index_paths(controller);
        let mut cells = Vec::with_capacity(visible.len());
        for index in visible {
            controller.on_item_rendered(index);
            if let Some(cell) = controller.cell_descriptor(index) {
                cells.push((index, cell));
            }
        }
        cells
    }
}
