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

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Most lists have a handful of sections at most, so keep them on the stack.
pub const INLINE_SECTION_COUNT: usize = 4;

pub type InlineSectionVec = SmallVec<[usize; INLINE_SECTION_COUNT]>;

/// Ordered, never empty, number of real (non placeholder) items per section.
///
/// Each fetch response replaces this wholesale; it is never appended to. The only way to
/// build one is through [`SectionCounts::try_new()`] (or the [`TryFrom`] impls), which
/// rejects an empty sequence.
///
/// ```
/// use r3bl_infinite_list::SectionCounts;
///
/// let counts = SectionCounts::try_new(vec![3, 12]).unwrap();
/// assert_eq!(counts.last_section(), 1);
/// assert_eq!(counts.last_count(), 12);
/// assert!(SectionCounts::try_new(vec![]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct SectionCounts {
    inner: InlineSectionVec,
}

impl SectionCounts {
    /// `None` when `counts` is empty.
    #[must_use]
    pub fn try_new(counts: impl Into<Vec<usize>>) -> Option<Self> {
        let counts: Vec<usize> = counts.into();
        if counts.is_empty() {
            return None;
        }
        Some(Self {
            inner: InlineSectionVec::from_vec(counts),
        })
    }

    /// A single empty section, ie `[0]`. This is the shape of a freshly reset list.
    #[must_use]
    pub fn single_empty_section() -> Self { Self { inner: smallvec![0] } }

    /// Index of the last section.
    #[must_use]
    pub fn last_section(&self) -> usize { self.inner.len() - 1 }

    /// Number of real items in the last section.
    #[must_use]
    pub fn last_count(&self) -> usize { self.inner[self.last_section()] }

    /// Sum of the real items in all sections.
    #[must_use]
    pub fn total(&self) -> usize { self.inner.iter().sum() }

    #[must_use]
    pub fn section_count(&self) -> usize { self.inner.len() }

    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> { self.inner.to_vec() }
}

impl Default for SectionCounts {
    fn default() -> Self { Self::single_empty_section() }
}

impl Deref for SectionCounts {
    type Target = [usize];

    fn deref(&self) -> &Self::Target { &self.inner }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptySectionCounts;

impl std::fmt::Display for EmptySectionCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "section counts must contain at least one section")
    }
}

impl TryFrom<Vec<usize>> for SectionCounts {
    type Error = EmptySectionCounts;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(EmptySectionCounts)
    }
}

impl TryFrom<&[usize]> for SectionCounts {
    type Error = EmptySectionCounts;

    fn try_from(value: &[usize]) -> Result<Self, Self::Error> {
        Self::try_new(value.to_vec()).ok_or(EmptySectionCounts)
    }
}

impl From<SectionCounts> for Vec<usize> {
    fn from(value: SectionCounts) -> Self { value.to_vec() }
}
