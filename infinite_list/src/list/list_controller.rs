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

use std::fmt::{Debug, Formatter};

use tokio::{runtime::Handle, sync::mpsc::error::TrySendError, task::AbortHandle};

use crate::{CommonResult, CompletionOutcome, EdgeInsets, FetchError, FetchId,
            FetchResolution, FetchTicket, Fetcher, IndexPath, InfiniteListConfig,
            InfiniteListError, ListSignal, ListSignalSender, PaginationState,
            PlaceholderManager, PrefetchTrigger, Renderer, ScrollMetrics, SectionSpacing,
            Size, Slot, send_signal};

/// Mediates between a host view, a [`Fetcher`] and a [`Renderer`].
///
/// # Threading
///
/// Every method takes `&self` or `&mut self` and is meant to be called from one
/// context (the host's main loop). Fetch futures run on Tokio tasks spawned on the
/// runtime that was current when the controller was created; their results come back as
/// [`ListSignal::FetchResolved`], and the host passes them to
/// [`Self::handle_fetch_resolution()`]. The pagination state is never touched by any
/// other task.
///
/// # Lifecycle
///
/// 1. [`Self::try_new()`] - nothing is fetched yet.
/// 2. [`Self::attach()`] - reset, then fetch page 1.
/// 3. [`Self::on_scroll_position_changed()`] or [`Self::on_item_rendered()`] - fetch the
///    next page when the [`PrefetchTrigger`] fires.
/// 4. [`Self::reload()`] - reset, then fetch page 1. The in-flight fetch (if any) is not
///    cancelled, but its completion will be discarded.
/// 5. [`Self::abandon_in_flight_fetch()`] - the in-flight fetch task is aborted.
///
/// Dropping the controller aborts the in-flight fetch task, if any.
pub struct ListController<C> {
    config: InfiniteListConfig,
    state: PaginationState,
    trigger: PrefetchTrigger,
    fetcher: Option<Box<dyn Fetcher>>,
    renderer: Option<Box<dyn Renderer<Cell = C>>>,
    sender: ListSignalSender,
    runtime_handle: Handle,
    /// The fetch started by the last reset, until it resolves.
    pending_refresh: Option<FetchId>,
    /// The task awaiting the most recently started fetch, until it resolves.
    in_flight_task: Option<(FetchId, AbortHandle)>,
}

impl<C> Debug for ListController<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("trigger", &self.trigger)
            .field("has_fetcher", &self.fetcher.is_some())
            .field("has_renderer", &self.renderer.is_some())
            .field("pending_refresh", &self.pending_refresh)
            .field(
                "in_flight_task",
                &self.in_flight_task.as_ref().map(|(id, _)| *id),
            )
            .finish_non_exhaustive()
    }
}

impl<C> Drop for ListController<C> {
    fn drop(&mut self) {
        if let Some((_, task)) = self.in_flight_task.take() {
            task.abort();
        }
    }
}

impl<C: 'static> ListController<C> {
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InfiniteListError::NoTokioRuntime`] outside of a runtime, or
    /// [`InfiniteListError::InvalidConfig`] if the config doesn't validate.
    pub fn try_new(config: InfiniteListConfig, sender: ListSignalSender) -> CommonResult<Self> {
        let runtime_handle = Handle::try_current().map_err(InfiniteListError::NoTokioRuntime)?;
        config.validate().map_err(InfiniteListError::from)?;

        Ok(Self {
            state: PaginationState::new(config.initial_shape()),
            trigger: PrefetchTrigger::from_config(&config),
            config,
            fetcher: None,
            renderer: None,
            sender,
            runtime_handle,
            pending_refresh: None,
            in_flight_task: None,
        })
    }

    /// Store the collaborators (replacing any previous ones), reset, and fetch page 1.
    pub fn attach(
        &mut self,
        fetcher: impl Fetcher,
        renderer: impl Renderer<Cell = C> + 'static,
    ) {
        self.fetcher = Some(Box::new(fetcher));
        self.renderer = Some(Box::new(renderer));
        tracing::debug!(message = "🔗 list controller attached");
        self.reset_and_fetch_first_page();
    }

    /// Pull-to-refresh. Back to page 1 with the initial shape, then fetch page 1.
    /// Returns `false` if nothing is attached yet, in which case only the reset happens.
    pub fn reload(&mut self) -> bool {
        tracing::debug!(
            message = "🔄 reload",
            abandoned = ?self.state.in_flight()
        );
        self.reset_and_fetch_first_page()
    }

    fn reset_and_fetch_first_page(&mut self) -> bool {
        self.state.reset();
        self.notify(ListSignal::DidReload);
        self.notify(ListSignal::Render);

        let ticket = self.start_fetch();
        self.pending_refresh = ticket.map(|it| it.id);
        ticket.is_some()
    }

    /// Report the host's scroll position. Returns `true` if a fetch was started.
    pub fn on_scroll_position_changed(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.trigger.should_fetch_on_scroll(&self.state, metrics) {
            return false;
        }
        self.start_fetch().is_some()
    }

    /// Report that the host rendered the item at `index`. Returns `true` if a fetch was
    /// started.
    pub fn on_item_rendered(&mut self, index: IndexPath) -> bool {
        if !self.trigger.should_fetch_on_item_rendered(&self.state, index) {
            return false;
        }
        self.start_fetch().is_some()
    }

    /// Begin a fetch of the current page and spawn a task that awaits it. When a fetch
    /// is already outstanding, or there is no fetcher, nothing happens.
    fn start_fetch(&mut self) -> Option<FetchTicket> {
        let Some(fetcher) = self.fetcher.as_ref() else {
            tracing::trace!(message = "⏭️ fetch skipped, no fetcher attached");
            return None;
        };
        let Some(ticket) = self.state.begin_fetch() else {
            tracing::trace!(
                message = "⏭️ fetch dropped, already loading",
                in_flight = ?self.state.in_flight()
            );
            return None;
        };

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "📡 fetch begin",
            fetch_id = %ticket.id,
            page = %ticket.page
        );

        let future = fetcher.fetch(ticket.page);
        let deadline = self.config.fetch_deadline();
        let sender = self.sender.clone();

        let join_handle = self.runtime_handle.spawn(async move {
            let result = match deadline {
                Some(deadline) => tokio::time::timeout(deadline, future)
                    .await
                    .unwrap_or_else(|_elapsed| {
                        Err(FetchError::DeadlineElapsed {
                            page: ticket.page,
                            deadline,
                        })
                    }),
                None => future.await,
            };
            // The receiver is gone when the host has shut down.
            let _ = sender
                .send(ListSignal::FetchResolved(FetchResolution { ticket, result }))
                .await;
        });
        self.in_flight_task = Some((ticket.id, join_handle.abort_handle()));

        Some(ticket)
    }

    /// Apply a [`ListSignal::FetchResolved`] payload, then ask the host to redraw.
    /// Stale resolutions (from before a reload, or an abandoned fetch) change nothing
    /// and don't cause a redraw.
    pub fn handle_fetch_resolution(&mut self, resolution: FetchResolution) -> CompletionOutcome {
        let FetchResolution { ticket, result } = resolution;
        let outcome = self.state.complete_fetch(ticket, result);

        match &outcome {
            CompletionOutcome::Applied {
                next_page,
                has_more,
            } => {
                tracing::debug!(
                    message = "📥 fetch applied",
                    fetch_id = %ticket.id,
                    next_page = %next_page,
                    has_more = has_more,
                    total_items = self.state.section_counts().total()
                );
            }
            CompletionOutcome::Failed(error) => {
                tracing::warn!(
                    message = "⚠️ fetch failed",
                    fetch_id = %ticket.id,
                    page = %ticket.page,
                    error = %error
                );
            }
            CompletionOutcome::Stale => {
                tracing::trace!(
                    message = "🗑️ stale fetch discarded",
                    fetch_id = %ticket.id,
                    page = %ticket.page
                );
                return outcome;
            }
        }

        if self
            .in_flight_task
            .as_ref()
            .is_some_and(|(id, _)| *id == ticket.id)
        {
            self.in_flight_task = None;
        }
        if self.pending_refresh == Some(ticket.id) {
            self.pending_refresh = None;
            self.notify(ListSignal::EndRefreshing);
        }
        self.notify(ListSignal::Render);

        outcome
    }

    /// Manual un-stick for a fetch that never resolves (eg: no deadline configured).
    /// The loading flag is cleared and `has_more` is kept. The task awaiting the fetch
    /// is aborted, which drops the fetch future. A completion that was already sent
    /// before the abort is discarded as stale.
    pub fn abandon_in_flight_fetch(&mut self) -> Option<FetchTicket> {
        let ticket = self.state.abandon_in_flight()?;
        let aborted = match self.in_flight_task.take() {
            Some((id, task)) if id == ticket.id => {
                task.abort();
                true
            }
            _ => false,
        };
        tracing::warn!(
            message = "🛑 in-flight fetch abandoned",
            fetch_id = %ticket.id,
            page = %ticket.page,
            aborted = aborted
        );
        if self.pending_refresh.take().is_some() {
            self.notify(ListSignal::EndRefreshing);
        }
        Some(ticket)
    }

    /// Forward a selection to the [`Renderer`]. Only real items can be selected; returns
    /// `false` for the placeholder and for out of range paths.
    pub fn select(&mut self, index: IndexPath) -> bool {
        let is_item = matches!(
            PlaceholderManager::resolve(&self.state, index),
            Some(Slot::Item(_))
        );
        match self.renderer.as_mut() {
            Some(renderer) if is_item => {
                renderer.did_select(index);
                true
            }
            _ => false,
        }
    }

    /// Push a signal to the host without blocking. If the channel is full the send is
    /// deferred to a task.
    fn notify(&self, signal: ListSignal) {
        match self.sender.try_send(signal) {
            Ok(()) => {}
            Err(TrySendError::Full(signal)) => {
                send_signal!(self.runtime_handle, self.sender, signal);
            }
            Err(TrySendError::Closed(signal)) => {
                tracing::trace!(message = "📪 signal dropped, receiver closed", signal = ?signal);
            }
        }
    }
}

/// Queries. None of these change any state.
impl<C: 'static> ListController<C> {
    #[must_use]
    pub fn state(&self) -> &PaginationState { &self.state }

    #[must_use]
    pub fn config(&self) -> &InfiniteListConfig { &self.config }

    #[must_use]
    pub fn is_attached(&self) -> bool { self.fetcher.is_some() && self.renderer.is_some() }

    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        PlaceholderManager::number_of_sections(&self.state)
    }

    /// Includes the placeholder, when present.
    #[must_use]
    pub fn item_count(&self, section: usize) -> usize {
        PlaceholderManager::item_count(&self.state, section)
    }

    #[must_use]
    pub fn total_item_count(&self) -> usize {
        PlaceholderManager::total_item_count(&self.state)
    }

    /// `None` when nothing is attached, or when `index` is out of range.
    #[must_use]
    pub fn cell_descriptor(&self, index: IndexPath) -> Option<C> {
        let renderer = self.renderer.as_ref()?;
        match PlaceholderManager::resolve(&self.state, index)? {
            Slot::Item(index) => Some(renderer.content_for(index)),
            Slot::Placeholder => Some(renderer.placeholder_descriptor()),
        }
    }

    /// Grid item size. The placeholder spans the container's width.
    #[must_use]
    pub fn size_for(&self, index: IndexPath, container_width: f64) -> Size {
        let layout = &self.config.layout;
        if self.is_placeholder(index) {
            return Size::new(container_width, layout.placeholder_extent);
        }
        self.renderer
            .as_ref()
            .and_then(|it| it.size_for(index))
            .unwrap_or(layout.item_size)
    }

    /// List row height. The placeholder row always uses the default row height.
    #[must_use]
    pub fn row_height_for(&self, index: IndexPath) -> f64 {
        let layout = &self.config.layout;
        if self.is_placeholder(index) {
            return layout.row_height;
        }
        self.renderer
            .as_ref()
            .and_then(|it| it.row_height_for(index))
            .unwrap_or(layout.row_height)
    }

    /// Falls back to [`Self::row_height_for()`], so a renderer that knows exact heights
    /// doesn't have to estimate them too.
    #[must_use]
    pub fn estimated_row_height_for(&self, index: IndexPath) -> f64 {
        if self.is_placeholder(index) {
            return self.config.layout.row_height;
        }
        self.renderer
            .as_ref()
            .and_then(|it| it.estimated_row_height_for(index))
            .unwrap_or_else(|| self.row_height_for(index))
    }

    /// `None` when there is no header, nothing is attached, or `section` is out of range.
    #[must_use]
    pub fn header_for(&self, section: usize) -> Option<C> {
        if section >= self.number_of_sections() {
            return None;
        }
        self.renderer.as_ref()?.header_for(section)
    }

    /// Zero for a section without a header.
    #[must_use]
    pub fn header_height_for(&self, section: usize) -> f64 {
        if self.header_for(section).is_none() {
            return 0.0;
        }
        self.renderer
            .as_ref()
            .and_then(|it| it.header_height_for(section))
            .unwrap_or(self.config.layout.header_height)
    }

    #[must_use]
    pub fn spacing_for(&self, section: usize) -> SectionSpacing {
        self.renderer
            .as_ref()
            .and_then(|it| it.spacing_for(section))
            .unwrap_or_else(|| self.config.layout.section_spacing())
    }

    #[must_use]
    pub fn insets_for(&self, section: usize) -> EdgeInsets {
        self.renderer
            .as_ref()
            .and_then(|it| it.insets_for(section))
            .unwrap_or(self.config.layout.section_insets)
    }

    #[must_use]
    pub fn footer_height_for(&self, section: usize) -> f64 {
        self.renderer
            .as_ref()
            .and_then(|it| it.footer_height_for(section))
            .unwrap_or(self.config.layout.footer_height)
    }

    fn is_placeholder(&self, index: IndexPath) -> bool {
        PlaceholderManager::placeholder_index_path(&self.state) == Some(index)
    }
}
