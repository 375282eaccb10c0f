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

//! Scripted collaborators for driving a [`ListController`] step by step in tests.

use std::{collections::VecDeque,
          sync::{Arc, Mutex}};

use tokio::sync::oneshot;

use crate::{FetchError, FetchFuture, FetchResolution, FetchResponse, Fetcher, IndexPath,
            InfiniteListConfig, ListController, ListSignal, ListSignalReceiver,
            PageNumber, Renderer, create_signal_channel};

type Responder = oneshot::Sender<Result<FetchResponse, FetchError>>;

#[derive(Default)]
struct ScriptedFetcherInner {
    calls: Vec<PageNumber>,
    pending: VecDeque<(PageNumber, Responder)>,
}

/// Every fetch stays pending until the test answers it with [`Self::respond_next()`].
/// Dropping an answer (see [`Self::drop_next()`]) resolves the fetch with
/// [`FetchError::ResponderDropped`]. Fetches whose future was dropped (the task awaiting
/// it was aborted) are skipped.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    inner: Arc<Mutex<ScriptedFetcherInner>>,
}

impl ScriptedFetcher {
    /// Pages requested so far, oldest first.
    pub fn calls(&self) -> Vec<PageNumber> { self.inner.lock().unwrap().calls.clone() }

    /// Fetches that can still be answered.
    pub fn pending_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .pending
            .iter()
            .filter(|(_, responder)| !responder.is_closed())
            .count()
    }

    /// Fetches whose future was dropped before they were answered.
    pub fn cancelled_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .pending
            .iter()
            .filter(|(_, responder)| responder.is_closed())
            .count()
    }

    fn pop_next_open(&self) -> (PageNumber, Responder) {
        let mut inner = self.inner.lock().unwrap();
        loop {
            let (page, responder) = inner.pending.pop_front().unwrap();
            if !responder.is_closed() {
                return (page, responder);
            }
        }
    }

    /// Answer the oldest pending fetch, and return the page it was for.
    pub fn respond_next(&self, result: Result<FetchResponse, FetchError>) -> PageNumber {
        let (page, responder) = self.pop_next_open();
        responder.send(result).unwrap();
        page
    }

    /// Drop the oldest pending fetch's responder without answering.
    pub fn drop_next(&self) -> PageNumber {
        let (page, _responder) = self.pop_next_open();
        page
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self, page: PageNumber) -> FetchFuture {
        let (sender, receiver) = oneshot::channel();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(page);
            inner.pending.push_back((page, sender));
        }
        Box::pin(async move {
            receiver
                .await
                .unwrap_or(Err(FetchError::ResponderDropped { page }))
        })
    }
}

/// Cells are plain strings. Selections are recorded. The row height hook can be
/// overridden for one section, and one section can have a header.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub selected: Arc<Mutex<Vec<IndexPath>>>,
    pub row_height_override: Option<(usize /* section */, f64)>,
    pub header_section: Option<usize>,
}

impl RecordingRenderer {
    pub fn selected(&self) -> Vec<IndexPath> { self.selected.lock().unwrap().clone() }
}

impl Renderer for RecordingRenderer {
    type Cell = String;

    fn content_for(&self, index: IndexPath) -> String {
        format!("item {}.{}", index.section, index.row)
    }

    fn placeholder_descriptor(&self) -> String { "loading".to_string() }

    fn row_height_for(&self, index: IndexPath) -> Option<f64> {
        self.row_height_override
            .and_then(|(section, height)| (section == index.section).then_some(height))
    }

    fn header_for(&self, section: usize) -> Option<String> {
        (self.header_section == Some(section)).then(|| format!("header {section}"))
    }

    fn did_select(&mut self, index: IndexPath) { self.selected.lock().unwrap().push(index); }
}

pub struct Harness {
    pub controller: ListController<String>,
    pub receiver: ListSignalReceiver,
    pub fetcher: ScriptedFetcher,
    pub renderer: RecordingRenderer,
}

impl Harness {
    /// Controller with the given config, not attached yet.
    pub fn new(config: InfiniteListConfig) -> Self {
        let (sender, receiver) = create_signal_channel(config.signal_channel_capacity);
        Self {
            controller: ListController::try_new(config, sender).unwrap(),
            receiver,
            fetcher: ScriptedFetcher::default(),
            renderer: RecordingRenderer::default(),
        }
    }

    /// Controller with the default config, attached (so page 1 is in flight).
    pub fn attached() -> Self {
        let mut it = Self::new(InfiniteListConfig::default());
        it.attach();
        it
    }

    pub fn attach(&mut self) {
        self.controller
            .attach(self.fetcher.clone(), self.renderer.clone());
    }

    /// Wait for the next [`ListSignal::FetchResolved`], skipping any other signal.
    pub async fn next_resolution(&mut self) -> FetchResolution {
        loop {
            match self.receiver.recv().await.unwrap() {
                ListSignal::FetchResolved(resolution) => return resolution,
                _ => continue,
            }
        }
    }

    /// Answer the oldest pending fetch and apply its resolution to the controller.
    pub async fn respond_and_apply(
        &mut self,
        result: Result<FetchResponse, FetchError>,
    ) -> crate::CompletionOutcome {
        self.fetcher.respond_next(result);
        let resolution = self.next_resolution().await;
        self.controller.handle_fetch_resolution(resolution)
    }

    /// Signals that are already queued, without waiting.
    pub fn drain_signals(&mut self) -> Vec<ListSignal> {
        let mut signals = vec![];
        while let Ok(signal) = self.receiver.try_recv() {
            signals.push(signal);
        }
        signals
    }
}
