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

//! Building blocks shared by the list controller: units, geometry, configuration,
//! errors, and logging setup.

// Attach sources.
pub mod config;
pub mod decl_macros;
pub mod geometry;
pub mod list_error;
pub mod log;
pub mod miette_setup_global_report_handler;
pub mod section_counts;
pub mod units;

// Re-export.
pub use config::*;
pub use geometry::*;
pub use list_error::*;
pub use log::*;
pub use miette_setup_global_report_handler::*;
pub use section_counts::*;
pub use units::*;
