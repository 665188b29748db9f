//! Development diagnostics for runaway render and logging loops.
//!
//! A rendering bug that re-triggers itself floods the logs long before it
//! shows up in the UI. This module is the instrumentation for catching that:
//!
//! - a [`CounterLayer`] for `tracing-subscriber` that counts every log event
//!   per level and per target, and reports the top sources once when the
//!   total crosses [`MAX_LOG_EVENTS`];
//! - render accounting: each view rebuild records how many lines it rebuilt,
//!   warning on oversized batches and on every [`RENDER_REPORT_EVERY`]
//!   cumulative rebuilt lines;
//! - timer tracking: an RAII [`TimerGuard`] counts started and active timed
//!   tasks (toast dismissals, payment delays) so leaked timers show up in
//!   the shutdown report.
//!
//! All counters are atomics; the struct is shared via `Arc` and is safe to
//! touch from any handler or task.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Total log events after which the top sources are reported once.
pub const MAX_LOG_EVENTS: u64 = 1000;

/// A single render pass rebuilding more lines than this is suspicious.
pub const HIGH_RENDER_BATCH: usize = 50;

/// Warn every this many cumulative rebuilt lines.
pub const RENDER_REPORT_EVERY: u64 = 1000;

/// Timers with a delay below this count as "short".
const SHORT_TIMER_DELAY: Duration = Duration::from_millis(50);

/// Many short timers outstanding suggests a scheduling loop.
const MANY_TIMERS: u64 = 100;

/// Shared diagnostic counters.
#[derive(Debug, Default)]
pub struct Diagnostics {
    log_events: AtomicU64,
    warn_and_error_events: AtomicU64,
    log_threshold_reported: AtomicBool,
    events_per_target: Mutex<HashMap<String, u64>>,

    render_passes: AtomicU64,
    lines_rebuilt: AtomicU64,
    lines_skipped: AtomicU64,
    missing_views: AtomicU64,

    timers_started: AtomicU64,
    timers_active: AtomicU64,
    short_timers: AtomicU64,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one log event. Called by [`CounterLayer`]; the threshold report
    /// is emitted at most once.
    pub fn record_log(&self, level: &Level, target: &str) {
        let total = self.log_events.fetch_add(1, Ordering::Relaxed) + 1;
        if *level <= Level::WARN {
            self.warn_and_error_events.fetch_add(1, Ordering::Relaxed);
        }

        {
            let mut per_target = self
                .events_per_target
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *per_target.entry(target.to_string()).or_insert(0) += 1;
        }

        if total >= MAX_LOG_EVENTS
            && self
                .log_threshold_reported
                .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
        {
            // The flag is set before emitting, so the warning below being
            // counted by the layer cannot re-enter this branch.
            let top = self.top_targets(5);
            tracing::warn!(total, ?top, "excessive logging detected");
        }
    }

    /// Count one render pass that rebuilt `lines` display lines.
    pub fn record_render(&self, lines: usize) {
        self.render_passes.fetch_add(1, Ordering::Relaxed);
        let added = u64::try_from(lines).unwrap_or(u64::MAX);
        let before = self.lines_rebuilt.fetch_add(added, Ordering::Relaxed);
        let rebuilt = before + added;

        if lines > HIGH_RENDER_BATCH {
            tracing::warn!(lines, "high render batch");
        }
        if rebuilt / RENDER_REPORT_EVERY > before / RENDER_REPORT_EVERY {
            tracing::warn!(rebuilt, "high cumulative render rate");
        }
    }

    /// Count a display line skipped during rendering because it was
    /// degenerate.
    pub fn record_skipped_line(&self) {
        self.lines_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a read of the cart view before anything was published.
    pub fn record_missing_view(&self) {
        self.missing_views.fetch_add(1, Ordering::Relaxed);
    }

    /// Track a timed task for its lifetime. Hold the guard across the delay;
    /// dropping it marks the timer completed.
    #[must_use]
    pub fn timer_guard(self: &Arc<Self>, delay: Duration) -> TimerGuard {
        let started = self.timers_started.fetch_add(1, Ordering::Relaxed) + 1;
        self.timers_active.fetch_add(1, Ordering::Relaxed);

        if delay < SHORT_TIMER_DELAY {
            let short = self.short_timers.fetch_add(1, Ordering::Relaxed) + 1;
            if short > MANY_TIMERS {
                tracing::warn!(total = started, "many short timers detected");
            }
        }

        TimerGuard {
            diagnostics: Arc::clone(self),
        }
    }

    /// The `count` busiest log targets, descending.
    #[must_use]
    pub fn top_targets(&self, count: usize) -> Vec<(String, u64)> {
        let per_target = self
            .events_per_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<(String, u64)> = per_target
            .iter()
            .map(|(target, n)| (target.clone(), *n))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(count);
        entries
    }

    /// Emit the totals. Called after graceful shutdown; leaked timers show
    /// as a non-zero active count.
    pub fn report(&self) {
        let active_timers = self.timers_active.load(Ordering::Relaxed);
        tracing::info!(
            log_events = self.log_events.load(Ordering::Relaxed),
            warn_and_error_events = self.warn_and_error_events.load(Ordering::Relaxed),
            render_passes = self.render_passes.load(Ordering::Relaxed),
            lines_rebuilt = self.lines_rebuilt.load(Ordering::Relaxed),
            lines_skipped = self.lines_skipped.load(Ordering::Relaxed),
            missing_views = self.missing_views.load(Ordering::Relaxed),
            timers_started = self.timers_started.load(Ordering::Relaxed),
            active_timers,
            "diagnostics report"
        );

        if active_timers > 0 {
            tracing::warn!(active_timers, "timers still active at shutdown");
        }
    }

    // Accessors used by tests and the report.

    #[must_use]
    pub fn log_events(&self) -> u64 {
        self.log_events.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn render_passes(&self) -> u64 {
        self.render_passes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn lines_rebuilt(&self) -> u64 {
        self.lines_rebuilt.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn lines_skipped(&self) -> u64 {
        self.lines_skipped.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn timers_started(&self) -> u64 {
        self.timers_started.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn timers_active(&self) -> u64 {
        self.timers_active.load(Ordering::Relaxed)
    }
}

/// RAII handle for a tracked timed task.
pub struct TimerGuard {
    diagnostics: Arc<Diagnostics>,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.diagnostics
            .timers_active
            .fetch_sub(1, Ordering::Relaxed);
    }
}

/// `tracing-subscriber` layer that feeds every event into [`Diagnostics`].
pub struct CounterLayer {
    diagnostics: Arc<Diagnostics>,
}

impl CounterLayer {
    #[must_use]
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self { diagnostics }
    }
}

impl<S: Subscriber> Layer<S> for CounterLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        self.diagnostics
            .record_log(metadata.level(), metadata.target());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_log_counts_per_target() {
        let diagnostics = Diagnostics::new();
        diagnostics.record_log(&Level::INFO, "cart");
        diagnostics.record_log(&Level::WARN, "cart");
        diagnostics.record_log(&Level::INFO, "checkout");

        assert_eq!(diagnostics.log_events(), 3);
        let top = diagnostics.top_targets(5);
        assert_eq!(top[0], ("cart".to_string(), 2));
        assert_eq!(top[1], ("checkout".to_string(), 1));
    }

    #[test]
    fn test_top_targets_truncates() {
        let diagnostics = Diagnostics::new();
        for target in ["a", "b", "c"] {
            diagnostics.record_log(&Level::INFO, target);
        }
        assert_eq!(diagnostics.top_targets(2).len(), 2);
    }

    #[test]
    fn test_log_threshold_reports_once() {
        let diagnostics = Diagnostics::new();
        for _ in 0..(MAX_LOG_EVENTS + 10) {
            diagnostics.record_log(&Level::INFO, "noisy");
        }
        // The flag flips exactly once; crossing again must not re-arm it.
        assert!(diagnostics.log_threshold_reported.load(Ordering::Relaxed));
        assert_eq!(diagnostics.log_events(), MAX_LOG_EVENTS + 10);
    }

    #[test]
    fn test_render_accounting() {
        let diagnostics = Diagnostics::new();
        diagnostics.record_render(3);
        diagnostics.record_render(0);
        diagnostics.record_render(7);

        assert_eq!(diagnostics.render_passes(), 3);
        assert_eq!(diagnostics.lines_rebuilt(), 10);
    }

    #[test]
    fn test_timer_guard_tracks_active() {
        let diagnostics = Arc::new(Diagnostics::new());

        let guard = diagnostics.timer_guard(Duration::from_millis(2000));
        assert_eq!(diagnostics.timers_started(), 1);
        assert_eq!(diagnostics.timers_active(), 1);

        drop(guard);
        assert_eq!(diagnostics.timers_active(), 0);
        assert_eq!(diagnostics.timers_started(), 1);
    }

    #[test]
    fn test_skipped_and_missing_counters() {
        let diagnostics = Diagnostics::new();
        diagnostics.record_skipped_line();
        diagnostics.record_missing_view();
        diagnostics.record_skipped_line();

        assert_eq!(diagnostics.lines_skipped(), 2);
        assert_eq!(diagnostics.missing_views.load(Ordering::Relaxed), 1);
    }
}
