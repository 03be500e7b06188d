//! Scheduling port for the timer engine.
//!
//! The engine never reads a clock or arms a timer on its own. It asks a
//! [`Scheduler`] for the current monotonic time and to schedule (or cancel) the
//! next frame. Two implementations ship with the crate:
//!
//! - [`TickScheduler`] issues `bubbletea_rs::tick` commands that deliver a
//!   [`FrameMsg`] back through the program's update loop.
//! - [`ManualScheduler`] is a simulated clock that only moves when told to.

use super::types::FrameMsg;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use chrono::{DateTime, Local, TimeDelta};
use std::time::{Duration, Instant};

/// Default delay between frames while a countdown is running.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Time source and callback scheduler used by the engine.
pub trait Scheduler {
    /// Monotonic time in milliseconds. Never decreases.
    fn now_ms(&self) -> u64;

    /// Wall-clock time, used only for session records.
    fn wall_now(&self) -> DateTime<Local> {
        Local::now()
    }

    /// Arranges for a frame tagged `tag` to be delivered to engine `id`.
    fn schedule(&mut self, id: i64, tag: u64);

    /// Drops the frame tagged `tag` if it has not been handed out yet.
    fn cancel(&mut self, tag: u64);

    /// Hands the scheduled frame command to the runtime, if the scheduler
    /// produces commands.
    fn take_cmd(&mut self) -> Option<Cmd> {
        None
    }
}

/// Production scheduler backed by bubbletea tick commands.
pub struct TickScheduler {
    origin: Instant,
    interval: Duration,
    queued: Option<(u64, Cmd)>,
}

impl TickScheduler {
    /// Creates a scheduler with [`DEFAULT_FRAME_INTERVAL`].
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Creates a scheduler delivering frames every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            interval,
            queued: None,
        }
    }

    /// Delay between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame command is waiting to be handed out.
    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("interval", &self.interval)
            .field("queued_tag", &self.queued.as_ref().map(|(tag, _)| *tag))
            .finish()
    }
}

impl Scheduler for TickScheduler {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn schedule(&mut self, id: i64, tag: u64) {
        let cmd = bubbletea_tick(self.interval, move |_| Box::new(FrameMsg { id, tag }) as Msg);
        self.queued = Some((tag, cmd));
    }

    fn cancel(&mut self, tag: u64) {
        if matches!(self.queued, Some((queued, _)) if queued == tag) {
            self.queued = None;
        }
    }

    fn take_cmd(&mut self) -> Option<Cmd> {
        self.queued.take().map(|(_, cmd)| cmd)
    }
}

/// Simulated clock for tests and headless hosts.
///
/// Time starts at zero and only advances through [`ManualScheduler::advance`]
/// or [`ManualScheduler::set_now`]. The wall clock is derived from the
/// monotonic one so session records are deterministic.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: u64,
    wall_origin: DateTime<Local>,
    pending: Option<(i64, u64)>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    /// Creates a clock at time zero with the wall clock anchored to now.
    pub fn new() -> Self {
        Self::with_wall_origin(Local::now())
    }

    /// Creates a clock at time zero with a fixed wall-clock anchor.
    pub fn with_wall_origin(wall_origin: DateTime<Local>) -> Self {
        Self {
            now: 0,
            wall_origin,
            pending: None,
            scheduled: 0,
            cancelled: 0,
        }
    }

    /// Moves monotonic time forward.
    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Jumps to an absolute monotonic time. Earlier times are ignored.
    pub fn set_now(&mut self, ms: u64) {
        self.now = self.now.max(ms);
    }

    /// The frame waiting to fire, as `(engine id, tag)`.
    pub fn pending(&self) -> Option<FrameMsg> {
        self.pending.map(|(id, tag)| FrameMsg { id, tag })
    }

    /// Removes and returns the pending frame.
    pub fn take_pending(&mut self) -> Option<FrameMsg> {
        self.pending.take().map(|(id, tag)| FrameMsg { id, tag })
    }

    /// Number of frames scheduled so far.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Number of frames cancelled before firing.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn wall_now(&self) -> DateTime<Local> {
        let offset = TimeDelta::try_milliseconds(self.now as i64).unwrap_or(TimeDelta::zero());
        self.wall_origin + offset
    }

    fn schedule(&mut self, id: i64, tag: u64) {
        self.pending = Some((id, tag));
        self.scheduled += 1;
    }

    fn cancel(&mut self, tag: u64) {
        if matches!(self.pending, Some((_, pending)) if pending == tag) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_never_goes_back() {
        let mut clock = ManualScheduler::new();
        clock.advance(500);
        clock.set_now(200);
        assert_eq!(clock.now_ms(), 500);
        clock.set_now(900);
        assert_eq!(clock.now_ms(), 900);
    }

    #[test]
    fn test_manual_cancel_only_matching_tag() {
        let mut clock = ManualScheduler::new();
        clock.schedule(1, 7);
        clock.cancel(6);
        assert_eq!(clock.pending(), Some(FrameMsg { id: 1, tag: 7 }));
        clock.cancel(7);
        assert!(clock.pending().is_none());
        assert_eq!(clock.cancelled_count(), 1);
    }

    #[test]
    fn test_manual_wall_clock_follows_monotonic() {
        let origin = Local::now();
        let mut clock = ManualScheduler::with_wall_origin(origin);
        clock.advance(90_000);
        assert_eq!(clock.wall_now() - origin, TimeDelta::seconds(90));
    }

    #[test]
    fn test_tick_scheduler_hands_out_once() {
        let mut sched = TickScheduler::with_interval(Duration::from_millis(10));
        assert!(sched.take_cmd().is_none());
        sched.schedule(3, 1);
        assert!(sched.has_queued());
        assert!(sched.take_cmd().is_some());
        assert!(sched.take_cmd().is_none());
    }

    #[test]
    fn test_tick_scheduler_cancel_drops_queued() {
        let mut sched = TickScheduler::new();
        sched.schedule(3, 4);
        sched.cancel(4);
        assert!(sched.take_cmd().is_none());
    }

    #[tokio::test]
    async fn test_tick_scheduler_delivers_frame() {
        let mut sched = TickScheduler::with_interval(Duration::from_millis(1));
        sched.schedule(42, 9);
        let cmd = sched.take_cmd().expect("queued frame");
        let msg = cmd.await.expect("frame message");
        let frame = msg.downcast_ref::<FrameMsg>().expect("frame type");
        assert_eq!(*frame, FrameMsg { id: 42, tag: 9 });
    }
}
