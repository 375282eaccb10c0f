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

//! # r3bl_infinite_list
//!
//! An infinite scroll controller for list and grid views. As the user approaches the end
//! of the loaded content, the next page is requested from your [`Fetcher`], and a
//! synthetic "loading" slot is shown at the tail of the list until the data source says
//! there is nothing more to load. Pull-to-refresh style reloads reset everything back to
//! page 1.
//!
//! The crate is independent of any rendering surface. Your host view (a TUI list, a
//! grid, a headless test harness) asks the [`ListController`] how many sections and
//! items to show and which cell to draw, and it reports scroll positions or rendered
//! rows back to the controller.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Host view (eg: RowViewport)                                   │
//! │  - reports scroll metrics / rendered rows                     │
//! │  - drains the ListSignal channel on its main context          │
//! └──────────────────────────────────────────────────────────────┘
//!        │ on_scroll_position_changed()        ▲ ListSignal::Render
//!        │ on_item_rendered()                  │ ListSignal::FetchResolved
//!        ▼                                     │
//! ┌──────────────────────────────────────────────────────────────┐
//! │ ListController<Cell>                                          │
//! │  ├── PaginationState     page, in-flight ticket, has-more     │
//! │  ├── PrefetchTrigger     "fetch now?" predicate               │
//! │  └── PlaceholderManager  real counts + loading slot           │
//! └──────────────────────────────────────────────────────────────┘
//!        │ Fetcher::fetch(page)                │ Renderer::content_for()
//!        ▼                                     ▼
//!   Tokio task (timeout) ── result ──▶    cell descriptors
//! ```
//!
//! The state is only ever mutated on the host's context. A fetch future runs on a
//! spawned Tokio task, and its result travels back over the [`ListSignal`] channel. The
//! host hands it to [`ListController::handle_fetch_resolution()`], where stale results
//! (from before a reload) are discarded.
//!
//! # Example
//!
//! ```no_run
//! use r3bl_infinite_list::{create_signal_channel, FetchError, FetchResponse,
//!                          IndexPath, InfiniteListConfig, ListController, ListSignal,
//!                          PageNumber, Renderer};
//!
//! struct Lines;
//!
//! impl Renderer for Lines {
//!     type Cell = String;
//!     fn content_for(&self, index: IndexPath) -> String { format!("row {}", index.row) }
//!     fn placeholder_descriptor(&self) -> String { "loading...".into() }
//! }
//!
//! # async fn example() -> miette::Result<()> {
//! let config = InfiniteListConfig::default();
//! let (sender, mut receiver) = create_signal_channel(config.signal_channel_capacity);
//! let mut controller = ListController::try_new(config, sender)?;
//!
//! controller.attach(
//!     |page: PageNumber| async move {
//!         let rows = 20 * page.as_usize();
//!         Ok::<_, FetchError>(FetchResponse::new(page.as_usize() < 5, vec![rows]))
//!     },
//!     Lines,
//! );
//!
//! while let Some(signal) = receiver.recv().await {
//!     match signal {
//!         ListSignal::FetchResolved(resolution) => {
//!             controller.handle_fetch_resolution(resolution);
//!         }
//!         ListSignal::Render => { /* redraw using controller.item_count() etc */ }
//!         ListSignal::DidReload | ListSignal::EndRefreshing => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod list;

// Re-export.
pub use core::*;
pub use list::*;
