//! Core types for the timer engine.

use bubbletea_rs::Msg;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest session the engine accepts, in seconds.
pub const MIN_SECONDS: u32 = 30;
/// Longest session the engine accepts, in seconds.
pub const MAX_SECONDS: u32 = 5400;
/// Duration used when a requested duration is not a finite number.
pub const DEFAULT_SECONDS: u32 = 1500;

/// Lifecycle of a countdown session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not started, or reset. Remaining equals the configured total.
    Idle,
    /// Counting down.
    Running,
    /// Suspended; elapsed time is frozen.
    Paused,
    /// Reached zero.
    Complete,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Complete => "complete",
        })
    }
}

/// Snapshot emitted on every state-affecting operation and every frame while running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEvent {
    /// Remaining time in seconds. Not rounded; rounding is up to the consumer.
    pub remaining_seconds: f64,
    /// Configured session length in seconds.
    pub total_seconds: u32,
    /// State at the time of the tick.
    pub state: TimerState,
}

/// Record of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Wall-clock time `start()` was called.
    pub started_at: DateTime<Local>,
    /// Wall-clock time the countdown reached zero.
    pub ended_at: DateTime<Local>,
    /// Configured session length in seconds.
    pub total_seconds: u32,
}

/// Events queued by the engine, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Remaining time changed or was re-announced.
    Tick(TickEvent),
    /// The state machine moved to a new state.
    StateChanged(TimerState),
    /// A session finished. Emitted exactly once per completion.
    Completed(CompletionRecord),
}

/// Scheduled frame callback for a specific engine.
///
/// Frames carry the tag they were scheduled with. The engine drops frames whose
/// tag is not the one it is waiting for, which is how pending callbacks are
/// cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMsg {
    /// Engine the frame belongs to.
    pub id: i64,
    /// Scheduling tag.
    pub tag: u64,
}

impl From<FrameMsg> for Msg {
    fn from(msg: FrameMsg) -> Self {
        Box::new(msg) as Msg
    }
}

/// The command surface the duration editor needs from a timer.
pub trait TimerControl {
    /// Changes the session length, preserving remaining time mid-session.
    fn set_duration(&mut self, seconds: f64);
    /// Returns to idle with the full duration remaining.
    fn reset(&mut self);
    /// Pauses a running countdown.
    fn pause(&mut self);
    /// Current state.
    fn state(&self) -> TimerState;
    /// Configured session length in seconds.
    fn total_seconds(&self) -> u32;
}

/// Clamps a requested duration into `[MIN_SECONDS, MAX_SECONDS]`.
///
/// Non-finite input (NaN, infinities) falls back to [`DEFAULT_SECONDS`].
/// Fractional seconds are rounded to the nearest whole second.
pub fn clamp_seconds(seconds: f64) -> u32 {
    if !seconds.is_finite() {
        return DEFAULT_SECONDS;
    }
    seconds
        .round()
        .clamp(f64::from(MIN_SECONDS), f64::from(MAX_SECONDS)) as u32
}
