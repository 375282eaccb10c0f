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

use crate::{EdgeInsets, IndexPath, SectionSpacing, Size};

/// Provides the cells for a [`crate::ListController`].
///
/// Only the two required methods have to be implemented. Every layout hook returns
/// `None` by default, in which case the controller falls back to the matching field of
/// [`crate::LayoutDefaults`].
///
/// The placeholder (loading slot) is always drawn with
/// [`Renderer::placeholder_descriptor()`]; [`Renderer::content_for()`] is only called
/// for real items.
pub trait Renderer: Send {
    /// Whatever the host draws, eg: a `String` for a terminal list, or a widget
    /// description for a grid.
    type Cell;

    fn content_for(&self, index: IndexPath) -> Self::Cell;

    fn placeholder_descriptor(&self) -> Self::Cell;

    /// Grid item size.
    fn size_for(&self, _index: IndexPath) -> Option<Size> { None }

    /// List row height.
    fn row_height_for(&self, _index: IndexPath) -> Option<f64> { None }

    /// Row height used before the row is laid out, eg: to size a scroll bar.
    fn estimated_row_height_for(&self, _index: IndexPath) -> Option<f64> { None }

    /// Section header. No header by default.
    fn header_for(&self, _section: usize) -> Option<Self::Cell> { None }

    fn header_height_for(&self, _section: usize) -> Option<f64> { None }

    fn spacing_for(&self, _section: usize) -> Option<SectionSpacing> { None }

    fn insets_for(&self, _section: usize) -> Option<EdgeInsets> { None }

    fn footer_height_for(&self, _section: usize) -> Option<f64> { None }

    /// The user selected a real item.
    fn did_select(&mut self, _index: IndexPath) {}
}
