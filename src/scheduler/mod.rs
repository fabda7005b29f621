//! Frame scheduling for the wave animation.
//!
//! [`FrameScheduler`] is a two-state machine (Stopped, Running) driven by the
//! host's update loop. Each tick advances the phase offsets, rebuilds the wave
//! path and signals the host that a repaint is needed, then schedules the next
//! tick so that frames land on a fixed cadence.
//!
//! The scheduler is the only writer of [`WaveRuntimeState`] and [`WavePath`]:
//! both are private fields mutated through `&mut self`, so ticks can never
//! overlap or race with another writer.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::wave::{build_path, ViewportGeometry, WaveConfig, WavePath, WaveRuntimeState};
use std::time::{Duration, Instant};

/// Target spacing between ticks (about 60 Hz).
pub const TARGET_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Receives "repaint needed" signals. Fire-and-forget, no payload.
pub trait RepaintSink {
    fn request_repaint(&mut self);
}

impl<F: FnMut()> RepaintSink for F {
    fn request_repaint(&mut self) {
        self()
    }
}

/// Counts repaint requests. Useful for hosts that repaint on their own schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepaintCounter {
    pub requests: u64,
}

impl RepaintSink for RepaintCounter {
    fn request_repaint(&mut self) {
        self.requests += 1;
    }
}

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}

/// Delay before the next tick given how long the current one took.
///
/// Never negative: a tick that overruns the interval schedules the next one immediately.
pub fn next_frame_delay(frame_interval: Duration, elapsed: Duration) -> Duration {
    frame_interval.saturating_sub(elapsed)
}

/// Drives the wave animation at a fixed cadence.
pub struct FrameScheduler<C: Clock = SystemClock> {
    clock: C,
    state: SchedulerState,
    next_tick: Option<Instant>,
    frame_interval: Duration,
    runtime: WaveRuntimeState,
    path: WavePath,
    frame_count: u64,
}

impl FrameScheduler<SystemClock> {
    pub fn new(runtime: WaveRuntimeState) -> Self {
        Self::with_clock(runtime, SystemClock)
    }
}

impl<C: Clock> FrameScheduler<C> {
    pub fn with_clock(runtime: WaveRuntimeState, clock: C) -> Self {
        Self {
            clock,
            state: SchedulerState::Stopped,
            next_tick: None,
            frame_interval: TARGET_FRAME_INTERVAL,
            runtime,
            path: WavePath::default(),
            frame_count: 0,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Deadline of the pending tick, if one is scheduled.
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn runtime(&self) -> &WaveRuntimeState {
        &self.runtime
    }

    /// Path built by the most recent tick.
    pub fn path(&self) -> &WavePath {
        &self.path
    }

    /// Ticks executed since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Stopped -> Running. The first tick is due immediately.
    ///
    /// Phase offsets carry over from wherever the last run left them.
    /// Starting an already running scheduler leaves the pending tick alone.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = SchedulerState::Running;
        self.next_tick = Some(self.clock.now());
        log::debug!(
            "Wave scheduler started at phase {:.3} after {} frames",
            self.runtime.foreground_offset,
            self.frame_count
        );
    }

    /// Running -> Stopped, dropping any pending tick. No-op when already stopped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = SchedulerState::Stopped;
        self.next_tick = None;
        log::debug!("Wave scheduler stopped after {} frames", self.frame_count);
    }

    /// Cancel the pending tick and post a fresh one due now.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Re-seed the undrawn background offset after the wave parameters change.
    pub fn reseed_background(&mut self, runtime: &WaveRuntimeState) {
        self.runtime.background_offset = runtime.background_offset;
    }

    /// Whether a tick is scheduled and its deadline has passed.
    pub fn is_due(&self) -> bool {
        self.next_tick
            .is_some_and(|deadline| self.clock.now() >= deadline)
    }

    /// Time left until the pending tick, zero if it is overdue.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    /// Run the pending tick if it is due.
    ///
    /// Returns the delay until the next tick, or `None` when stopped.
    pub fn poll(
        &mut self,
        config: &WaveConfig,
        viewport: &ViewportGeometry,
        repaint: &mut dyn RepaintSink,
    ) -> Option<Duration> {
        if self.is_due() {
            self.tick(config, viewport, repaint)
        } else {
            self.time_until_next_tick()
        }
    }

    /// Execute one tick now and schedule the next.
    ///
    /// Returns the computed delay, or `None` (doing nothing) when stopped.
    pub fn tick(
        &mut self,
        config: &WaveConfig,
        viewport: &ViewportGeometry,
        repaint: &mut dyn RepaintSink,
    ) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }

        let start = self.clock.now();

        self.runtime = self.runtime.advance(config.params().angular_hz);
        self.path = build_path(config, viewport, &self.runtime);
        self.frame_count += 1;
        repaint.request_repaint();

        let now = self.clock.now();
        let delay = next_frame_delay(self.frame_interval, now.saturating_duration_since(start));
        self.next_tick = Some(now + delay);

        log::trace!(
            "Wave tick {} phase {:.3}, next in {:?}",
            self.frame_count,
            self.runtime.foreground_offset,
            delay
        );

        Some(delay)
    }
}
