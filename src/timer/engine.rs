//! The countdown state machine.

use super::scheduler::{Scheduler, TickScheduler};
use super::types::{
    clamp_seconds, CompletionRecord, FrameMsg, TickEvent, TimerControl, TimerEvent, TimerState,
    DEFAULT_SECONDS,
};
use crate::display::format_countdown;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicI64, Ordering};

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Drift-corrected countdown engine.
///
/// Remaining time is always re-derived from absolute monotonic timestamps:
/// `total - (elapsed_base + (now - run_start))`. Irregular frame timing never
/// accumulates error because no per-frame delta is ever summed.
///
/// Commands issued in a state where they do not apply are ignored. Out of
/// range or non-finite durations are clamped (see [`clamp_seconds`]).
///
/// # Examples
///
/// ```rust
/// use focus_flow::timer::{Engine, ManualScheduler, TimerState};
///
/// let mut engine = Engine::new(1500.0, ManualScheduler::new());
/// engine.start();
/// engine.advance(400_000);
/// assert_eq!(engine.remaining_seconds(), 1100.0);
/// assert_eq!(engine.state(), TimerState::Running);
/// ```
#[derive(Debug)]
pub struct Engine<S: Scheduler = TickScheduler> {
    id: i64,
    total_ms: u64,
    elapsed_base_ms: u64,
    remaining_ms: u64,
    run_start: Option<u64>,
    started_at: Option<DateTime<Local>>,
    state: TimerState,
    tag: u64,
    pending: Option<u64>,
    events: Vec<TimerEvent>,
    scheduler: S,
}

impl<S: Scheduler> Engine<S> {
    /// Creates an idle engine with the given session length.
    pub fn new(seconds: f64, scheduler: S) -> Self {
        let total_ms = u64::from(clamp_seconds(seconds)) * 1000;
        Self {
            id: next_id(),
            total_ms,
            elapsed_base_ms: 0,
            remaining_ms: total_ms,
            run_start: None,
            started_at: None,
            state: TimerState::Idle,
            tag: 0,
            pending: None,
            events: Vec::new(),
            scheduler,
        }
    }

    /// Unique identifier used to route frames.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Configured session length in seconds.
    pub fn total_seconds(&self) -> u32 {
        (self.total_ms / 1000) as u32
    }

    /// Configured session length in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Remaining milliseconds as of the last tick.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Remaining seconds as of the last tick, unrounded.
    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_ms as f64 / 1000.0
    }

    /// Elapsed milliseconds folded in at the last pause or rebase.
    pub fn elapsed_base_ms(&self) -> u64 {
        self.elapsed_base_ms
    }

    /// Wall-clock time of the last `start()`, cleared by `reset()`.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// The tag of the frame the engine is waiting for, if any.
    pub fn pending_tag(&self) -> Option<u64> {
        self.pending
    }

    /// Current tick snapshot.
    pub fn snapshot(&self) -> TickEvent {
        TickEvent {
            remaining_seconds: self.remaining_seconds(),
            total_seconds: self.total_seconds(),
            state: self.state,
        }
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Drains queued events in emission order.
    pub fn take_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hands the next frame command to the runtime, if the scheduler has one.
    pub fn take_cmd(&mut self) -> Option<Cmd> {
        self.scheduler.take_cmd()
    }

    /// Sets the session length while idle or complete.
    ///
    /// Ignored while running or paused; use [`Engine::set_duration`] to change
    /// the length of a session in progress.
    pub fn configure(&mut self, seconds: f64) {
        if matches!(self.state, TimerState::Running | TimerState::Paused) {
            return;
        }
        self.total_ms = u64::from(clamp_seconds(seconds)) * 1000;
        self.elapsed_base_ms = 0;
        self.remaining_ms = self.total_ms;
        self.emit_tick();
    }

    /// Starts a fresh session. Only valid from idle or complete.
    pub fn start(&mut self) {
        if !matches!(self.state, TimerState::Idle | TimerState::Complete) {
            return;
        }
        self.cancel_pending();
        self.elapsed_base_ms = 0;
        self.remaining_ms = self.total_ms;
        self.started_at = Some(self.scheduler.wall_now());
        self.run_start = Some(self.scheduler.now_ms());
        self.switch_state(TimerState::Running);
        self.schedule_next();
    }

    /// Freezes the countdown. Only valid while running.
    pub fn pause(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        let now = self.scheduler.now_ms();
        self.elapsed_base_ms = self.elapsed_at(now);
        self.remaining_ms = self.total_ms - self.elapsed_base_ms;
        self.run_start = None;
        self.cancel_pending();
        self.switch_state(TimerState::Paused);
    }

    /// Continues a paused countdown.
    pub fn resume(&mut self) {
        if self.state != TimerState::Paused {
            return;
        }
        self.run_start = Some(self.scheduler.now_ms());
        self.switch_state(TimerState::Running);
        self.schedule_next();
    }

    /// Returns to idle with the full duration remaining. Valid from any state.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.elapsed_base_ms = 0;
        self.remaining_ms = self.total_ms;
        self.started_at = None;
        self.run_start = None;
        self.switch_state(TimerState::Idle);
    }

    /// Changes the session length in any state.
    ///
    /// Idle or complete: same as [`Engine::configure`]. Paused or running: the
    /// elapsed time is rebased so the remaining time stays the same, clamped to
    /// the new total. A tick is emitted in every state.
    pub fn set_duration(&mut self, seconds: f64) {
        match self.state {
            TimerState::Idle | TimerState::Complete => self.configure(seconds),
            TimerState::Paused | TimerState::Running => {
                let now = self.scheduler.now_ms();
                let remaining = self.total_ms - self.elapsed_at(now);
                let new_total = u64::from(clamp_seconds(seconds)) * 1000;

                self.total_ms = new_total;
                self.elapsed_base_ms = new_total.saturating_sub(remaining);
                self.remaining_ms = new_total - self.elapsed_base_ms;
                if self.state == TimerState::Running {
                    self.run_start = Some(now);
                }
                self.emit_tick();
            }
        }
    }

    /// Handles a scheduled frame observed at monotonic time `timestamp`.
    ///
    /// Frames are ignored unless the engine is running and `tag` is the frame
    /// it is waiting for.
    pub fn on_frame(&mut self, tag: u64, timestamp: u64) {
        if self.state != TimerState::Running || self.pending != Some(tag) {
            return;
        }
        self.pending = None;

        let elapsed = self.elapsed_at(timestamp);
        self.remaining_ms = self.total_ms - elapsed;
        if self.remaining_ms == 0 {
            self.complete();
            return;
        }
        self.emit_tick();
        self.schedule_next();
    }

    /// Routes a [`FrameMsg`] to [`Engine::on_frame`] and returns the next frame command.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id {
                return None;
            }
            let now = self.scheduler.now_ms();
            self.on_frame(frame.tag, now);
        }
        self.take_cmd()
    }

    /// Countdown rendered as `MM:SS`.
    pub fn view(&self) -> String {
        format_countdown(self.remaining_seconds())
    }

    fn complete(&mut self) {
        self.cancel_pending();
        self.elapsed_base_ms = self.total_ms;
        self.remaining_ms = 0;
        self.run_start = None;
        let ended_at = self.scheduler.wall_now();
        self.switch_state(TimerState::Complete);

        let record = CompletionRecord {
            started_at: self.started_at.unwrap_or(ended_at),
            ended_at,
            total_seconds: self.total_seconds(),
        };
        log::debug!(
            "timer {} completed a {}s session",
            self.id,
            record.total_seconds
        );
        self.events.push(TimerEvent::Completed(record));
    }

    /// Total elapsed time at `now`, clamped to the session length.
    fn elapsed_at(&self, now: u64) -> u64 {
        let live = match self.run_start {
            Some(start) if self.state == TimerState::Running => now.saturating_sub(start),
            _ => 0,
        };
        self.elapsed_base_ms.saturating_add(live).min(self.total_ms)
    }

    fn schedule_next(&mut self) {
        self.tag = self.tag.wrapping_add(1);
        self.pending = Some(self.tag);
        self.scheduler.schedule(self.id, self.tag);
    }

    fn cancel_pending(&mut self) {
        if let Some(tag) = self.pending.take() {
            self.scheduler.cancel(tag);
        }
    }

    // Tick first, then the state change notification.
    fn switch_state(&mut self, next: TimerState) {
        let changed = self.state != next;
        self.state = next;
        self.emit_tick();
        if changed {
            log::debug!("timer {} -> {}", self.id, next);
            self.events.push(TimerEvent::StateChanged(next));
        }
    }

    fn emit_tick(&mut self) {
        let tick = self.snapshot();
        self.events.push(TimerEvent::Tick(tick));
    }
}

impl Engine<crate::timer::ManualScheduler> {
    /// Advances the simulated clock and delivers the pending frame, if any.
    ///
    /// One frame is enough to observe any amount of elapsed time since the
    /// remaining time is derived from absolute timestamps.
    pub fn advance(&mut self, ms: u64) {
        self.scheduler.advance(ms);
        if let Some(frame) = self.scheduler.take_pending() {
            let now = self.scheduler.now_ms();
            self.on_frame(frame.tag, now);
        }
    }

    /// Advances the simulated clock in `step` sized frames until `ms` have passed.
    pub fn advance_in_steps(&mut self, ms: u64, step: u64) {
        let step = step.max(1);
        let mut left = ms;
        while left > 0 {
            let delta = left.min(step);
            self.advance(delta);
            left -= delta;
        }
    }
}

impl<S: Scheduler> TimerControl for Engine<S> {
    fn set_duration(&mut self, seconds: f64) {
        Engine::set_duration(self, seconds)
    }

    fn reset(&mut self) {
        Engine::reset(self)
    }

    fn pause(&mut self) {
        Engine::pause(self)
    }

    fn state(&self) -> TimerState {
        self.state
    }

    fn total_seconds(&self) -> u32 {
        Engine::total_seconds(self)
    }
}

/// Creates an idle production engine with the given session length.
pub fn new(seconds: u32) -> Engine {
    Engine::new(f64::from(seconds), TickScheduler::new())
}

impl Default for Engine {
    fn default() -> Self {
        new(DEFAULT_SECONDS)
    }
}

impl BubbleTeaModel for Engine {
    fn init() -> (Self, Option<Cmd>) {
        let mut engine = Engine::default();
        engine.reset();
        (engine, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
