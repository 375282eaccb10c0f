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

//! Headless demo: auto scroll through a simulated, paged photo feed. Each page is one
//! "day" of photos (one section). Fetches take a while, some of them fail, and once the
//! feed runs out the list is reloaded once (pull-to-refresh) before the demo exits.
//!
//! ```text
//! cargo run --example photo_feed -- --pages 4 --fail-every 3 --log stderr
//! ```

use std::{path::PathBuf,
          sync::{Arc,
                 atomic::{AtomicU32, Ordering}},
          time::Duration};

use clap::Parser;
use r3bl_infinite_list::{CommonResult, CompletionOutcome, FetchError, FetchFuture,
                         FetchResponse, Fetcher, IndexPath, InfiniteListConfig,
                         ListController, ListSignal, PageNumber, PlaceholderManager,
                         Renderer, RowViewport, TracingConfig, WriterArg, WriterConfig,
                         create_signal_channel,
                         setup_default_miette_global_report_handler,
                         try_initialize_logging_global};
use rand::Rng;
use tracing_core::LevelFilter;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

#[derive(Debug, Parser)]
#[command(bin_name = "photo_feed")]
#[command(about = "📷 Auto scroll through a simulated paged photo feed")]
#[command(version)]
#[command(next_line_help = true)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(long, default_value_t = 5, help = "Number of pages (days) in the feed")]
    pub pages: u32,

    #[arg(long, default_value_t = 12, help = "Photos per page")]
    pub page_size: usize,

    #[arg(long, default_value_t = 150, help = "Simulated fetch latency")]
    pub latency_ms: u64,

    #[arg(
        long,
        default_value_t = 0,
        help = "Fail every Nth fetch with a transport error, 0 never fails"
    )]
    pub fail_every: u32,

    #[arg(long, default_value_t = 8, help = "Rows visible at once")]
    pub viewport_rows: usize,

    #[arg(long, default_value_t = 40, help = "Time between auto scroll steps")]
    pub scroll_interval_ms: u64,

    #[arg(long, short = 'c', help = "JSON config file for the list controller")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_delimiter = ',',
        default_value = "none",
        help = "Where to write logs: stdout, stderr, file, none (comma separated)"
    )]
    pub log: Vec<WriterArg>,

    #[arg(long, default_value = "photo_feed_log.txt", help = "Log file path")]
    pub log_file: String,
}

/// Simulated remote feed. Page `n` answers with `n` sections of `page_size` photos.
#[derive(Debug, Clone)]
struct PhotoFeed {
    pages: u32,
    page_size: usize,
    latency_ms: u64,
    fail_every: u32,
    call_count: Arc<AtomicU32>,
}

impl PhotoFeed {
    fn new(cli_arg: &CLIArg) -> Self {
        Self {
            pages: cli_arg.pages,
            page_size: cli_arg.page_size,
            latency_ms: cli_arg.latency_ms,
            fail_every: cli_arg.fail_every,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Fetcher for PhotoFeed {
    fn fetch(&self, page: PageNumber) -> FetchFuture {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed) + 1;
        let should_fail = self.fail_every > 0 && call % self.fail_every == 0;
        let jitter_ms = rand::rng().random_range(0..=self.latency_ms / 2);
        let delay = Duration::from_millis(self.latency_ms + jitter_ms);
        let has_more = page.as_u32() < self.pages;
        let section_counts = vec![self.page_size; page.as_usize()];

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if should_fail {
                return Err(FetchError::transport(page, "simulated 503"));
            }
            Ok(FetchResponse::new(has_more, section_counts))
        })
    }
}

#[derive(Debug)]
struct PhotoCells;

impl Renderer for PhotoCells {
    type Cell = String;

    fn content_for(&self, index: IndexPath) -> String {
        format!("📷 day {:02} photo {:02}", index.section + 1, index.row + 1)
    }

    fn placeholder_descriptor(&self) -> String { "⏳ loading more photos...".to_string() }

    fn did_select(&mut self, index: IndexPath) {
        println!("❤️ liked day {} photo {}", index.section + 1, index.row + 1);
    }
}

#[tokio::main]
async fn main() -> CommonResult<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);

    let cli_arg = CLIArg::parse();

    try_initialize_logging_global(TracingConfig {
        writer_config: WriterConfig::from_writer_args(&cli_arg.log, cli_arg.log_file.clone()),
        level_filter: LevelFilter::DEBUG,
    })?;

    let config = match &cli_arg.config {
        Some(path) => InfiniteListConfig::try_from_json_file(path)?,
        None => InfiniteListConfig::default(),
    };

    let (sender, mut receiver) = create_signal_channel(config.signal_channel_capacity);
    let mut controller = ListController::try_new(config, sender)?;
    let mut viewport = RowViewport::new(cli_arg.viewport_rows, 1.0);

    controller.attach(PhotoFeed::new(&cli_arg), PhotoCells);

    let mut scroll_tick =
        tokio::time::interval(Duration::from_millis(cli_arg.scroll_interval_ms));
    let mut has_reloaded = false;

    loop {
        tokio::select! {
            _ = scroll_tick.tick() => {
                if is_at_end_of_feed(&viewport, &controller) {
                    if has_reloaded {
                        viewport.select_cursor(&mut controller);
                        break;
                    }
                    println!("🔄 reached the end, pulling to refresh");
                    has_reloaded = true;
                    controller.reload();
                    continue;
                }
                viewport.scroll_by(1, &mut controller);
            }

            Some(signal) = receiver.recv() => {
                match signal {
                    ListSignal::FetchResolved(resolution) => {
                        if let CompletionOutcome::Failed(error) =
                            controller.handle_fetch_resolution(resolution)
                        {
                            println!("⚠️ {error}, will retry on next scroll");
                        }
                    }
                    ListSignal::Render => draw(&viewport, &mut controller),
                    ListSignal::DidReload => viewport.reset(),
                    ListSignal::EndRefreshing => println!("✅ refresh complete"),
                }
            }
        }
    }

    println!(
        "👋 done, {} photos in {} days",
        controller.state().section_counts().total(),
        controller.number_of_sections()
    );

    Ok(())
}

fn is_at_end_of_feed(viewport: &RowViewport, controller: &ListController<String>) -> bool {
    !controller.state().has_more()
        && viewport.scroll_offset_index + viewport.viewport_height
            >= controller.total_item_count()
}

fn draw(viewport: &RowViewport, controller: &mut ListController<String>) {
    let state = controller.state();
    println!(
        "── page {} | {} photos | loading: {} ──",
        state.page(),
        state.section_counts().total(),
        state.is_loading()
    );
    let cells = viewport.render_visible(controller);
    let cursor =
        PlaceholderManager::index_path_for_flat_row(controller.state(), viewport.cursor_row);
    for (index, cell) in cells {
        let marker = if Some(index) == cursor { ">" } else { " " };
        println!("{marker} {index} {cell}");
    }
}
