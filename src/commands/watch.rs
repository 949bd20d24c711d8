use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::alerts::AlertReport;
use super::Engine;
use crate::cli::MatchOpts;
use crate::output::print_value;

/// Redraw alerts every `interval` seconds until Ctrl+C.
///
/// Reads go through the shared cache, so the monitoring server is only contacted
/// after the stale marker has ticked, not on every redraw.
pub fn run(
    engine: &Engine,
    cluster: &str,
    matching: &MatchOpts,
    interval: u64,
    json_mode: bool,
) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .ok(); // Ignore if handler can't be set (e.g., already set)

    loop {
        let report = AlertReport::build(cluster, matching, engine.cache.get_outcome(cluster));
        tracing::info!(%cluster, source = report.source, "alerts read");

        print_value(&report, json_mode, |report| {
            report.print_human();
            println!();
            println!("Refreshing every {}s \u{2014} press Ctrl+C to stop", interval);
        });

        // Sleep in small increments so Ctrl+C is responsive
        let sleep_end = redraw_deadline(Instant::now(), interval);
        while sleep_end.map_or(true, |end| Instant::now() < end) {
            if !running.load(Ordering::SeqCst) {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(100));
        }

        if !running.load(Ordering::SeqCst) {
            return Ok(());
        }

        // Clear terminal before next render
        if !json_mode {
            print!("\x1B[2J\x1B[H");
        }
    }
}

/// `None` when the interval reaches past what `Instant` can represent; the loop then
/// waits for Ctrl+C.
fn redraw_deadline(now: Instant, interval: u64) -> Option<Instant> {
    now.checked_add(Duration::from_secs(interval))
}
