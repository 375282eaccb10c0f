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

use std::{future::Future, pin::Pin};

use crate::{FetchError, PageNumber};

/// What a [`Fetcher`] hands back for one page.
pub type FetchFuture =
    Pin<Box<dyn Future<Output = Result<FetchResponse, FetchError>> + Send + 'static>>;

/// One page worth of answer from the data source.
///
/// `section_counts` is the complete, cumulative shape of the list after this page is
/// applied (not a delta), one count per section. It is validated when it is applied:
/// an empty vector is treated as [`FetchError::MalformedResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchResponse {
    pub has_more: bool,
    pub section_counts: Vec<usize>,
}

impl FetchResponse {
    pub fn new(has_more: bool, section_counts: impl Into<Vec<usize>>) -> Self {
        Self {
            has_more,
            section_counts: section_counts.into(),
        }
    }
}

/// The data source for a [`crate::ListController`].
///
/// [`Fetcher::fetch()`] is called on the host's context, and must return without
/// blocking. The returned future is driven to completion on a Tokio task, so this is
/// where the network request (or whatever else) actually happens. The future resolves
/// exactly once; if it needs to be abandoned, have it resolve with an error (eg:
/// [`FetchError::ResponderDropped`]) rather than never resolving.
///
/// Any `Fn(PageNumber) -> impl Future<...>` closure is a [`Fetcher`]:
///
/// ```
/// use r3bl_infinite_list::{FetchError, FetchResponse, Fetcher, PageNumber};
///
/// let fetcher = |page: PageNumber| async move {
///     Ok::<_, FetchError>(FetchResponse::new(false, vec![page.as_usize()]))
/// };
/// let _future = fetcher.fetch(PageNumber::FIRST);
/// ```
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, page: PageNumber) -> FetchFuture;
}

impl<F, Fut> Fetcher for F
where
    F: Fn(PageNumber) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    fn fetch(&self, page: PageNumber) -> FetchFuture { Box::pin(self(page)) }
}
