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

//! The counts the host sees are the real counts, plus one loading slot appended to the
//! last section while there is more to load.
//!
//! ```text
//! has_more == true, counts [3, 2]        has_more == false, counts [3, 2]
//!
//! section 0: [0,0] [0,1] [0,2]           section 0: [0,0] [0,1] [0,2]
//! section 1: [1,0] [1,1] ⏳[1,2]          section 1: [1,0] [1,1]
//! ```

use crate::{IndexPath, PaginationState};

/// What sits at an [`IndexPath`] the host asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A real item, to be drawn with [`crate::Renderer::content_for()`].
    Item(IndexPath),
    /// The loading slot, to be drawn with [`crate::Renderer::placeholder_descriptor()`].
    Placeholder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceholderManager;

impl PlaceholderManager {
    /// Same as the number of real sections; the placeholder never adds a section.
    #[must_use]
    pub fn number_of_sections(state: &PaginationState) -> usize {
        state.section_counts().section_count()
    }

    /// Effective count for `section`. Zero for sections that don't exist.
    #[must_use]
    pub fn item_count(state: &PaginationState, section: usize) -> usize {
        let counts = state.section_counts();
        match counts.get(section) {
            None => 0,
            Some(&count) if section == counts.last_section() && state.has_more() => {
                count + 1
            }
            Some(&count) => count,
        }
    }

    /// Effective count across all sections.
    #[must_use]
    pub fn total_item_count(state: &PaginationState) -> usize {
        state.section_counts().total() + usize::from(state.has_more())
    }

    #[must_use]
    pub fn placeholder_index_path(state: &PaginationState) -> Option<IndexPath> {
        if !state.has_more() {
            return None;
        }
        let counts = state.section_counts();
        Some(IndexPath::new(counts.last_section(), counts.last_count()))
    }

    /// `None` when `index` is outside the effective counts.
    #[must_use]
    pub fn resolve(state: &PaginationState, index: IndexPath) -> Option<Slot> {
        let real_count = *state.section_counts().get(index.section)?;
        if index.row < real_count {
            return Some(Slot::Item(index));
        }
        (Self::placeholder_index_path(state) == Some(index)).then_some(Slot::Placeholder)
    }

    /// Map a row of the flattened list (every section one after the other, placeholder
    /// included) to its [`IndexPath`]. `None` past the end.
    #[must_use]
    pub fn index_path_for_flat_row(state: &PaginationState, row: usize) -> Option<IndexPath> {
        let mut remaining = row;
        for section in 0..Self::number_of_sections(state) {
            let count = Self::item_count(state, section);
            if remaining < count {
                return Some(IndexPath::new(section, remaining));
            }
            remaining -= count;
        }
        None
    }
}
