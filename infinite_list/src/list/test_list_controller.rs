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

use std::time::Duration;

use tokio::runtime::Handle;

use super::test_fixtures::{Harness, RecordingRenderer};
use crate::{CompletionOutcome, EdgeInsets, FetchError, FetchResponse, IndexPath,
            InfiniteListConfig, InfiniteListError, LayoutDefaults, ListController, ListSignal,
            PageNumber, PaginationState, ScrollMetrics, SectionCounts, SectionSpacing,
            Size, assert_eq2, create_signal_channel};

fn page(value: u32) -> PageNumber { PageNumber::new(value).unwrap() }

fn ok(has_more: bool, counts: &[usize]) -> Result<FetchResponse, FetchError> {
    Ok(FetchResponse::new(has_more, counts.to_vec()))
}

#[test]
fn test_try_new_outside_runtime_fails() {
    let (sender, _receiver) = create_signal_channel(10);
    let report =
        ListController::<String>::try_new(InfiniteListConfig::default(), sender).unwrap_err();
    assert!(matches!(
        report.downcast_ref::<InfiniteListError>(),
        Some(InfiniteListError::NoTokioRuntime(_))
    ));
}

#[tokio::test]
async fn test_try_new_rejects_invalid_config() {
    let (sender, _receiver) = create_signal_channel(10);
    let config = InfiniteListConfig {
        initial_section_counts: vec![],
        ..Default::default()
    };
    let report = ListController::<String>::try_new(config, sender).unwrap_err();
    assert!(matches!(
        report.downcast_ref::<InfiniteListError>(),
        Some(InfiniteListError::InvalidConfig(_))
    ));
}

#[tokio::test]
async fn test_nothing_fetched_before_attach() {
    let mut harness = Harness::new(InfiniteListConfig::default());
    assert!(!harness.controller.is_attached());
    assert!(
        !harness
            .controller
            .on_scroll_position_changed(ScrollMetrics::new(0.0, 100.0, 0.0))
    );
    assert!(!harness.controller.reload());
    assert_eq2!(harness.controller.cell_descriptor(IndexPath::new(0, 0)), None);
    assert!(harness.fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_attach_resets_and_fetches_first_page() {
    let mut harness = Harness::attached();

    assert_eq2!(harness.fetcher.calls(), vec![PageNumber::FIRST]);
    let state = harness.controller.state();
    assert_eq2!(state.page(), PageNumber::FIRST);
    assert!(state.has_more());
    assert!(state.is_loading());

    // Only the placeholder is visible.
    assert_eq2!(harness.controller.number_of_sections(), 1);
    assert_eq2!(harness.controller.item_count(0), 1);
    assert_eq2!(
        harness.controller.cell_descriptor(IndexPath::new(0, 0)),
        Some("loading".to_string())
    );

    assert_eq2!(
        harness.drain_signals(),
        vec![ListSignal::DidReload, ListSignal::Render]
    );
}

#[tokio::test]
async fn test_first_page_applied() {
    let mut harness = Harness::attached();
    harness.drain_signals();

    let outcome = harness.respond_and_apply(ok(true, &[12])).await;

    assert_eq2!(
        outcome,
        CompletionOutcome::Applied {
            next_page: page(2),
            has_more: true
        }
    );
    assert_eq2!(harness.controller.item_count(0), 13);
    assert_eq2!(
        harness.controller.cell_descriptor(IndexPath::new(0, 11)),
        Some("item 0.11".to_string())
    );
    assert_eq2!(
        harness.controller.cell_descriptor(IndexPath::new(0, 12)),
        Some("loading".to_string())
    );
    assert_eq2!(harness.controller.cell_descriptor(IndexPath::new(0, 13)), None);
    assert_eq2!(
        harness.drain_signals(),
        vec![ListSignal::EndRefreshing, ListSignal::Render]
    );
}

#[tokio::test]
async fn test_item_rendered_near_end_fetches_next_page() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[50])).await;

    assert!(!harness.controller.on_item_rendered(IndexPath::new(0, 44)));
    assert!(harness.controller.on_item_rendered(IndexPath::new(0, 46)));
    // Dropped, not queued, while loading.
    assert!(!harness.controller.on_item_rendered(IndexPath::new(0, 47)));
    assert_eq2!(harness.fetcher.calls(), vec![page(1), page(2)]);
    assert_eq2!(harness.fetcher.pending_count(), 1);

    harness.drain_signals();
    harness.respond_and_apply(ok(true, &[100])).await;
    // Only the reset-initiated fetch ends refreshing.
    assert_eq2!(harness.drain_signals(), vec![ListSignal::Render]);
    assert_eq2!(harness.controller.state().page(), page(3));
}

#[tokio::test]
async fn test_scroll_near_end_fetches_next_page() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[20])).await;

    assert!(
        !harness
            .controller
            .on_scroll_position_changed(ScrollMetrics::new(5_000.0, 800.0, 0.0))
    );
    assert!(
        harness
            .controller
            .on_scroll_position_changed(ScrollMetrics::new(5_000.0, 800.0, 4_000.0))
    );
    assert_eq2!(harness.fetcher.calls(), vec![page(1), page(2)]);
}

#[tokio::test]
async fn test_last_page_removes_placeholder_and_disarms_trigger() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(false, &[50])).await;

    assert_eq2!(harness.controller.item_count(0), 50);
    assert_eq2!(harness.controller.cell_descriptor(IndexPath::new(0, 50)), None);
    for row in 0..50 {
        assert!(!harness.controller.on_item_rendered(IndexPath::new(0, row)));
    }
    assert!(
        !harness
            .controller
            .on_scroll_position_changed(ScrollMetrics::new(100.0, 800.0, 0.0))
    );
    assert_eq2!(harness.fetcher.calls(), vec![page(1)]);
}

#[tokio::test]
async fn test_failure_keeps_has_more_and_allows_retry() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[20])).await;
    harness.controller.on_item_rendered(IndexPath::new(0, 20));

    let error = FetchError::transport(page(2), "503");
    let outcome = harness.respond_and_apply(Err(error.clone())).await;

    assert_eq2!(outcome, CompletionOutcome::Failed(error));
    let state = harness.controller.state();
    assert!(!state.is_loading());
    assert!(state.has_more());
    assert_eq2!(state.page(), page(2));
    assert_eq2!(harness.controller.item_count(0), 21);

    assert!(harness.controller.on_item_rendered(IndexPath::new(0, 20)));
    assert_eq2!(harness.fetcher.calls(), vec![page(1), page(2), page(2)]);
}

#[tokio::test]
async fn test_dropped_responder_is_a_failure() {
    let mut harness = Harness::attached();
    harness.fetcher.drop_next();

    let resolution = harness.next_resolution().await;
    let outcome = harness.controller.handle_fetch_resolution(resolution);

    assert_eq2!(
        outcome,
        CompletionOutcome::Failed(FetchError::ResponderDropped {
            page: PageNumber::FIRST
        })
    );
    assert!(!harness.controller.state().is_loading());
}

#[tokio::test]
async fn test_reload_while_loading_discards_stale_completion() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[30])).await;
    harness.controller.on_item_rendered(IndexPath::new(0, 30));
    assert_eq2!(harness.controller.state().page(), page(2));

    // Pull-to-refresh while page 2 is in flight.
    assert!(harness.controller.reload());
    harness.drain_signals();
    let after_reload = harness.controller.state().snapshot();

    // The page 2 fetch resolves first.
    let stale_page = harness.fetcher.respond_next(ok(true, &[30, 30]));
    assert_eq2!(stale_page, page(2));
    let resolution = harness.next_resolution().await;
    assert_eq2!(
        harness.controller.handle_fetch_resolution(resolution),
        CompletionOutcome::Stale
    );
    assert_eq2!(harness.controller.state().snapshot(), after_reload);
    assert!(harness.drain_signals().is_empty());

    // Then the fresh page 1 fetch.
    let outcome = harness.respond_and_apply(ok(true, &[10])).await;
    assert!(matches!(outcome, CompletionOutcome::Applied { .. }));
    assert_eq2!(harness.controller.item_count(0), 11);
}

#[tokio::test]
async fn test_reload_during_first_page_fetch_is_fenced() {
    let mut harness = Harness::attached();
    harness.controller.reload();
    assert_eq2!(harness.fetcher.calls(), vec![page(1), page(1)]);

    // The stale page 1 answer arrives first, and says the list is done.
    let outcome = harness.respond_and_apply(ok(false, &[3])).await;
    assert_eq2!(outcome, CompletionOutcome::Stale);
    assert!(harness.controller.state().has_more());
    assert!(harness.controller.state().is_loading());

    let outcome = harness.respond_and_apply(ok(true, &[8])).await;
    assert!(matches!(outcome, CompletionOutcome::Applied { .. }));
    assert_eq2!(
        harness.controller.state().section_counts(),
        &SectionCounts::try_from(&[8_usize][..]).unwrap()
    );
}

#[tokio::test]
async fn test_reload_after_progress_matches_fresh_attach() {
    let fresh = Harness::attached();
    let fresh_snapshot = fresh.controller.state().snapshot();

    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[40])).await;
    harness.controller.reload();

    assert_eq2!(harness.controller.state().snapshot(), fresh_snapshot);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_elapsed_is_a_failure() {
    let config = InfiniteListConfig {
        fetch_deadline_ms: Some(1_000),
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.attach();

    // Never answered. The paused clock auto advances past the deadline.
    let resolution = harness.next_resolution().await;
    let outcome = harness.controller.handle_fetch_resolution(resolution);

    assert_eq2!(
        outcome,
        CompletionOutcome::Failed(FetchError::DeadlineElapsed {
            page: PageNumber::FIRST,
            deadline: Duration::from_secs(1),
        })
    );
    assert!(!harness.controller.state().is_loading());
    assert!(harness.controller.state().has_more());
}

#[tokio::test(start_paused = true)]
async fn test_no_deadline_waits_until_answered() {
    let config = InfiniteListConfig {
        fetch_deadline_ms: None,
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.attach();

    tokio::time::sleep(Duration::from_secs(3_600)).await;
    assert!(harness.controller.state().is_loading());

    let outcome = harness.respond_and_apply(ok(true, &[5])).await;
    assert!(matches!(outcome, CompletionOutcome::Applied { .. }));
}

#[tokio::test]
async fn test_abandon_in_flight_fetch() {
    let mut harness = Harness::attached();
    harness.drain_signals();

    let ticket = harness.controller.abandon_in_flight_fetch().unwrap();
    assert_eq2!(ticket.page, PageNumber::FIRST);
    assert!(!harness.controller.state().is_loading());
    assert_eq2!(harness.drain_signals(), vec![ListSignal::EndRefreshing]);
    assert_eq2!(harness.controller.abandon_in_flight_fetch(), None);

    let mut expected = PaginationState::default();
    expected.begin_fetch();
    expected.abandon_in_flight();
    assert_eq2!(harness.controller.state(), &expected);

    // The placeholder stays, so rendering it retries.
    assert!(harness.controller.on_item_rendered(IndexPath::new(0, 0)));
}

#[tokio::test]
async fn test_completion_sent_before_abandon_is_stale() {
    let mut harness = Harness::attached();
    harness.fetcher.respond_next(ok(false, &[9]));
    let resolution = harness.next_resolution().await;

    assert!(harness.controller.abandon_in_flight_fetch().is_some());
    assert_eq2!(
        harness.controller.handle_fetch_resolution(resolution),
        CompletionOutcome::Stale
    );
    assert!(harness.controller.state().has_more());
    assert_eq2!(harness.controller.total_item_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_abandon_aborts_the_fetch_task() {
    let config = InfiniteListConfig {
        fetch_deadline_ms: None,
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.attach();
    assert_eq2!(Handle::current().metrics().num_alive_tasks(), 1);
    harness.controller.abandon_in_flight_fetch();

    for _ in 0..3 {
        assert!(harness.controller.on_item_rendered(IndexPath::new(0, 0)));
        harness.controller.abandon_in_flight_fetch();
    }

    // None of these fetches is ever answered, and there is no deadline.
    tokio::time::sleep(Duration::from_secs(86_400)).await;

    assert_eq2!(Handle::current().metrics().num_alive_tasks(), 0);
    assert_eq2!(harness.fetcher.calls().len(), 4);
    assert_eq2!(harness.fetcher.cancelled_count(), 4);
    assert_eq2!(harness.fetcher.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_the_fetch_task() {
    let harness = Harness::attached();
    let fetcher = harness.fetcher.clone();
    drop(harness);

    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq2!(fetcher.cancelled_count(), 1);
    assert_eq2!(Handle::current().metrics().num_alive_tasks(), 0);
}

#[tokio::test]
async fn test_select_forwards_real_items_only() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[3])).await;

    assert!(harness.controller.select(IndexPath::new(0, 1)));
    assert!(!harness.controller.select(IndexPath::new(0, 3)));
    assert!(!harness.controller.select(IndexPath::new(1, 0)));
    assert_eq2!(harness.renderer.selected(), vec![IndexPath::new(0, 1)]);
}

#[tokio::test]
async fn test_layout_falls_back_to_defaults() {
    let mut harness = Harness::attached();
    harness.respond_and_apply(ok(true, &[4])).await;
    let controller = &harness.controller;

    assert_eq2!(
        controller.size_for(IndexPath::new(0, 0), 320.0),
        Size::new(100.0, 100.0)
    );
    assert_eq2!(
        controller.size_for(IndexPath::new(0, 4), 320.0),
        Size::new(320.0, 100.0)
    );
    assert_eq2!(controller.row_height_for(IndexPath::new(0, 0)), 45.0);
    assert_eq2!(controller.estimated_row_height_for(IndexPath::new(0, 0)), 45.0);
    assert_eq2!(controller.header_for(0), None);
    assert_eq2!(controller.header_height_for(0), 0.0);
    assert_eq2!(controller.spacing_for(0), SectionSpacing::default());
    assert_eq2!(controller.insets_for(0), EdgeInsets::ZERO);
    assert_eq2!(controller.footer_height_for(0), 0.0);
}

#[tokio::test]
async fn test_layout_hooks_override_defaults() {
    let mut harness = Harness::new(InfiniteListConfig::default());
    harness.renderer = RecordingRenderer {
        row_height_override: Some((0, 60.0)),
        ..Default::default()
    };
    harness.attach();
    harness.respond_and_apply(ok(true, &[4])).await;

    assert_eq2!(harness.controller.row_height_for(IndexPath::new(0, 2)), 60.0);
    // The placeholder row keeps the default height.
    assert_eq2!(harness.controller.row_height_for(IndexPath::new(0, 4)), 45.0);
    // Estimates follow the exact height when the renderer has no estimate.
    assert_eq2!(
        harness.controller.estimated_row_height_for(IndexPath::new(0, 2)),
        60.0
    );
    assert_eq2!(
        harness.controller.estimated_row_height_for(IndexPath::new(0, 4)),
        45.0
    );
}

#[tokio::test]
async fn test_section_header_from_renderer() {
    let config = InfiniteListConfig {
        layout: LayoutDefaults {
            header_height: 24.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.renderer = RecordingRenderer {
        header_section: Some(1),
        ..Default::default()
    };
    harness.attach();
    harness.respond_and_apply(ok(true, &[2, 2])).await;

    let controller = &harness.controller;
    assert_eq2!(controller.header_for(0), None);
    assert_eq2!(controller.header_height_for(0), 0.0);
    assert_eq2!(controller.header_for(1), Some("header 1".to_string()));
    assert_eq2!(controller.header_height_for(1), 24.0);
    // Out of range.
    assert_eq2!(controller.header_for(2), None);
}

#[tokio::test]
async fn test_full_channel_defers_signals() {
    let config = InfiniteListConfig {
        signal_channel_capacity: 1,
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.attach();

    // DidReload fit in the channel. Render, and later the fetch resolution, are sent
    // from tasks once there is room.
    let mut signals = vec![];
    harness.fetcher.respond_next(ok(true, &[2]));
    while signals.len() < 3 {
        signals.push(harness.receiver.recv().await.unwrap());
    }
    assert_eq2!(signals[0], ListSignal::DidReload);
    assert!(signals.contains(&ListSignal::Render));
    assert!(
        signals
            .iter()
            .any(|it| matches!(it, ListSignal::FetchResolved(_)))
    );
}
