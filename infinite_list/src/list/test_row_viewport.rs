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

use super::test_fixtures::Harness;
use crate::{BufferDistance, FetchResponse, IndexPath, InfiniteListConfig, PageNumber,
            RowViewport, ScrollMetrics, assert_eq2};

/// Trigger margin of 2 rows of height 1, so the numbers below stay small.
async fn harness_with_rows(counts: &[usize]) -> Harness {
    let config = InfiniteListConfig {
        buffer_count: 2,
        buffer_distance: BufferDistance::Rows {
            count: 2,
            row_height: 1.0,
        },
        ..Default::default()
    };
    let mut harness = Harness::new(config);
    harness.attach();
    harness
        .respond_and_apply(Ok(FetchResponse::new(true, counts.to_vec())))
        .await;
    harness
}

#[tokio::test]
async fn test_visible_rows_span_sections_and_placeholder() {
    let mut harness = harness_with_rows(&[2, 2]).await;
    let mut viewport = RowViewport::new(4, 1.0);
    viewport.scroll_offset_index = 1;

    assert_eq2!(
        viewport.visible_index_paths(&harness.controller),
        vec![
            IndexPath::new(0, 1),
            IndexPath::new(1, 0),
            IndexPath::new(1, 1),
            IndexPath::new(1, 2),
        ]
    );

    let cells = viewport.render_visible(&mut harness.controller);
    let cells: Vec<_> = cells.into_iter().map(|(_, cell)| cell).collect();
    assert_eq2!(cells, vec!["item 0.1", "item 1.0", "item 1.1", "loading"]);

    // Rendering the first row of the last section started the page 2 fetch.
    assert!(harness.controller.state().is_loading());
    assert_eq2!(
        harness.fetcher.calls().last().copied(),
        Some(PageNumber::FIRST.next())
    );
}

#[tokio::test]
async fn test_scroll_metrics() {
    let harness = harness_with_rows(&[10]).await;
    let mut viewport = RowViewport::new(4, 2.0);
    viewport.scroll_offset_index = 3;

    // 10 items + placeholder.
    assert_eq2!(
        viewport.scroll_metrics(&harness.controller),
        ScrollMetrics::new(22.0, 8.0, 6.0)
    );
}

#[tokio::test]
async fn test_scroll_by_clamps_and_triggers_near_end() {
    let mut harness = harness_with_rows(&[20]).await;
    let mut viewport = RowViewport::new(5, 1.0);

    // remaining 21 - 10 = 11, not < 5 + 2.
    assert!(!viewport.scroll_by(10, &mut harness.controller));
    assert_eq2!(viewport.cursor_row, 10);

    assert!(!viewport.scroll_by(-100, &mut harness.controller));
    assert_eq2!(viewport.scroll_offset_index, 0);

    // Clamped to 21 - 5 = 16. remaining 5 < 7.
    assert!(viewport.scroll_by(100, &mut harness.controller));
    assert_eq2!(viewport.scroll_offset_index, 16);
    assert!(harness.controller.state().is_loading());
}

#[tokio::test]
async fn test_move_cursor_scrolls_window_and_selects() {
    let mut harness = harness_with_rows(&[20]).await;
    let mut viewport = RowViewport::new(5, 1.0);

    viewport.move_cursor_by(7, &mut harness.controller);
    assert_eq2!(viewport.cursor_row, 7);
    assert_eq2!(viewport.scroll_offset_index, 3);

    viewport.move_cursor_by(-5, &mut harness.controller);
    assert_eq2!(viewport.scroll_offset_index, 2);

    assert!(viewport.select_cursor(&mut harness.controller));
    assert_eq2!(harness.renderer.selected(), vec![IndexPath::new(0, 2)]);

    // The placeholder can't be selected.
    viewport.move_cursor_by(100, &mut harness.controller);
    assert_eq2!(viewport.cursor_row, 20);
    assert!(!viewport.select_cursor(&mut harness.controller));

    viewport.reset();
    assert_eq2!(viewport, RowViewport::new(5, 1.0));
}
