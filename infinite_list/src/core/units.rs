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

//! Strongly typed units used by the list controller, so that a page number can't be
//! accidentally passed where a row index is expected.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// Sequential request index for one batch of items. Always `>= 1`.
///
/// The only way to move forward is [`PageNumber::next()`], which the pagination state
/// calls once per successful fetch.
///
/// ```
/// use r3bl_infinite_list::PageNumber;
///
/// let page = PageNumber::FIRST;
/// assert_eq!(page.as_u32(), 1);
/// assert_eq!(page.next().as_u32(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    /// Returns `None` for `0`, since pages are 1 based.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    #[must_use]
    pub fn next(self) -> Self { Self(self.0.saturating_add(1)) }

    #[must_use]
    pub fn as_u32(self) -> u32 { self.0 }

    #[must_use]
    pub fn as_usize(self) -> usize { self.0 as usize }
}

impl Default for PageNumber {
    fn default() -> Self { Self::FIRST }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}", self.0) }
}

/// Identity of one fetch issued by the pagination state. Monotonically increasing for
/// the lifetime of a [`crate::PaginationState`], across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FetchId(u64);

impl FetchId {
    #[must_use]
    pub fn new(value: u64) -> Self { Self(value) }

    #[must_use]
    pub fn next(self) -> Self { Self(self.0.wrapping_add(1)) }

    #[must_use]
    pub fn as_u64(self) -> u64 { self.0 }
}

impl Display for FetchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "#{}", self.0) }
}

/// Position of an item: section first, then row within the section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    #[must_use]
    pub fn new(section: usize, row: usize) -> Self { Self { section, row } }
}

impl Display for IndexPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

/// Shorthand for [`IndexPath::new()`].
#[must_use]
pub fn index_path(section: usize, row: usize) -> IndexPath { IndexPath::new(section, row) }
