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

use tokio::sync::mpsc::{Receiver, Sender, channel};

use crate::{FetchError, FetchResponse, FetchTicket};

/// The result of one fetch, on its way back to the host's context.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResolution {
    pub ticket: FetchTicket,
    pub result: Result<FetchResponse, FetchError>,
}

/// Messages from the [`crate::ListController`] (and the fetch tasks it spawns) to the
/// host. The host drains these on the same context it uses to call the controller.
///
/// ```text
/// ┌────────────────┐  ListSignal  ┌─────────────────────────────────────────────┐
/// │ controller /   │ ───────────▶ │ host loop                                   │
/// │ fetch task     │              │  FetchResolved => handle_fetch_resolution() │
/// └────────────────┘              │  Render        => redraw                    │
///                                 │  DidReload     => scroll back to top, etc   │
///                                 │  EndRefreshing => stop refresh spinner      │
///                                 └─────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ListSignal {
    /// Counts or the placeholder changed, redraw.
    Render,
    /// A reset happened (attach or reload).
    DidReload,
    /// The fetch started by the last reset has resolved.
    EndRefreshing,
    /// Must be handed to [`crate::ListController::handle_fetch_resolution()`].
    FetchResolved(FetchResolution),
}

pub type ListSignalSender = Sender<ListSignal>;
pub type ListSignalReceiver = Receiver<ListSignal>;

/// Bounded channel for [`ListSignal`]s. A `capacity` of zero is bumped to one.
#[must_use]
pub fn create_signal_channel(capacity: usize) -> (ListSignalSender, ListSignalReceiver) {
    channel(capacity.max(1))
}
