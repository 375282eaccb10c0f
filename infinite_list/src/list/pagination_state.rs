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

//! The pagination state machine.
//!
//! ```text
//!          reset()                  begin_fetch()
//!   ───────────────▶ ┌──────────┐ ─────────────────▶ ┌──────────────────┐
//!                    │   Idle   │                    │ Loading(ticket)  │
//!                    │          │ ◀───────────────── │                  │
//!                    └──────────┘  complete_fetch()  └──────────────────┘
//!                         │        (matching ticket)         │
//!                         │                                  │ reset()
//!                         │ has_more == false                ▼
//!                         ▼                          ticket is now stale, any
//!                    ┌──────────┐                    completion for it is ignored
//!                    │   Done   │ (until reset)
//!                    └──────────┘
//! ```
//!
//! There is no queue. A `begin_fetch()` while loading is dropped, and a completion for
//! anything other than the outstanding ticket is discarded.

use crate::{FetchError, FetchId, FetchResponse, PageNumber, SectionCounts};

/// Identity of one outstanding fetch.
///
/// The page number alone is not enough to tell a stale completion from a fresh one:
/// after a reload during the page 1 fetch, both the stale fetch and the fresh one are
/// for page 1. The [`FetchId`] is unique per [`PaginationState::begin_fetch()`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub id: FetchId,
    pub page: PageNumber,
}

/// What [`PaginationState::complete_fetch()`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// The response was applied. `next_page` is the page the next fetch will request.
    Applied { next_page: PageNumber, has_more: bool },
    /// The fetch failed. The loading flag is cleared; page and `has_more` are unchanged
    /// so the next trigger retries the same page.
    Failed(FetchError),
    /// The completion does not belong to the outstanding fetch. Nothing changed.
    Stale,
}

impl CompletionOutcome {
    #[must_use]
    pub fn is_stale(&self) -> bool { matches!(self, Self::Stale) }
}

/// Value copy of the observable state, for comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSnapshot {
    pub page: PageNumber,
    pub section_counts: SectionCounts,
    pub has_more: bool,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    page: PageNumber,
    section_counts: SectionCounts,
    has_more: bool,
    in_flight: Option<FetchTicket>,
    /// Never reset, so tickets stay unique across reloads.
    next_fetch_id: FetchId,
    initial_shape: SectionCounts,
}

impl PaginationState {
    /// A state equal to a freshly reset one.
    #[must_use]
    pub fn new(initial_shape: SectionCounts) -> Self {
        Self {
            page: PageNumber::FIRST,
            section_counts: initial_shape.clone(),
            has_more: true,
            in_flight: None,
            next_fetch_id: FetchId::default(),
            initial_shape,
        }
    }

    /// Back to page 1 with the initial shape, not loading, and more data assumed.
    ///
    /// An outstanding fetch is not cancelled, it is forgotten: its completion will be
    /// [`CompletionOutcome::Stale`].
    pub fn reset(&mut self) {
        if let Some(ticket) = self.in_flight {
            tracing::trace!(
                message = "🔄 reset forgets in-flight fetch",
                fetch_id = %ticket.id,
                page = %ticket.page
            );
        }
        self.page = PageNumber::FIRST;
        self.section_counts = self.initial_shape.clone();
        self.has_more = true;
        self.in_flight = None;
    }

    /// Mark a fetch of the current page as outstanding, and return its ticket. Returns
    /// `None` (and changes nothing) if a fetch is already outstanding.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let ticket = FetchTicket {
            id: self.next_fetch_id,
            page: self.page,
        };
        self.next_fetch_id = self.next_fetch_id.next();
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchResponse, FetchError>,
    ) -> CompletionOutcome {
        if self.in_flight != Some(ticket) {
            return CompletionOutcome::Stale;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(error) => return CompletionOutcome::Failed(error),
        };

        let Some(section_counts) = SectionCounts::try_new(response.section_counts) else {
            return CompletionOutcome::Failed(FetchError::MalformedResponse {
                page: ticket.page,
                reason: "section counts are empty",
            });
        };

        self.section_counts = section_counts;
        self.has_more = response.has_more;
        self.page = self.page.next();

        CompletionOutcome::Applied {
            next_page: self.page,
            has_more: self.has_more,
        }
    }

    /// Forget the outstanding fetch without resetting anything else. Returns the
    /// ticket that was abandoned, if any. Its completion will be stale.
    pub fn abandon_in_flight(&mut self) -> Option<FetchTicket> { self.in_flight.take() }

    /// The page the next fetch will request.
    #[must_use]
    pub fn page(&self) -> PageNumber { self.page }

    #[must_use]
    pub fn section_counts(&self) -> &SectionCounts { &self.section_counts }

    #[must_use]
    pub fn has_more(&self) -> bool { self.has_more }

    #[must_use]
    pub fn is_loading(&self) -> bool { self.in_flight.is_some() }

    #[must_use]
    pub fn in_flight(&self) -> Option<FetchTicket> { self.in_flight }

    #[must_use]
    pub fn initial_shape(&self) -> &SectionCounts { &self.initial_shape }

    #[must_use]
    pub fn snapshot(&self) -> PaginationSnapshot {
        PaginationSnapshot {
            page: self.page,
            section_counts: self.section_counts.clone(),
            has_more: self.has_more,
            is_loading: self.is_loading(),
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self { Self::new(SectionCounts::default()) }
}
