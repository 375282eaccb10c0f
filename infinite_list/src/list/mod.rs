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

//! The pagination controller and its parts. Start with [`ListController`].

// Attach sources.
pub mod fetcher;
pub mod list_controller;
pub mod list_signal;
pub mod pagination_state;
pub mod placeholder_manager;
pub mod prefetch_trigger;
pub mod renderer;
pub mod row_viewport;

// Re-export.
pub use fetcher::*;
pub use list_controller::*;
pub use list_signal::*;
pub use pagination_state::*;
pub use placeholder_manager::*;
pub use prefetch_trigger::*;
pub use renderer::*;
pub use row_viewport::*;

// Tests.
#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_list_controller;
#[cfg(test)]
mod test_row_viewport;
