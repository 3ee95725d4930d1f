// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

/// Millisecond instant supplied by the caller.
///
/// The stopwatch never reads a clock of its own, which keeps it fully
/// deterministic under test and lets the widget driving it decide where
/// time comes from.
pub type Millis = u64;

/// Accumulating stopwatch.
///
/// Banks the length of every completed start/pause span; `elapsed` adds the
/// open span on top while running. Starting a running watch and pausing a
/// paused one are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    banked_ms: u64,
    started_at: Option<Millis>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self, now: Millis) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: Millis) {
        if let Some(started_at) = self.started_at.take() {
            self.banked_ms += now.saturating_sub(started_at);
        }
    }

    /// Accumulated time, including the open span when running.
    pub fn elapsed(&self, now: Millis) -> Duration {
        let open_span = self
            .started_at
            .map(|started_at| now.saturating_sub(started_at))
            .unwrap_or(0);
        Duration::from_millis(self.banked_ms + open_span)
    }

    /// Discard everything, back to a stopped zero.
    pub fn reset(&mut self) {
        self.banked_ms = 0;
        self.started_at = None;
    }
}
