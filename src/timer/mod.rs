//! Drift-corrected countdown timer for Bubble Tea applications.
//!
//! The [`Engine`] is a state machine over [`TimerState`]. It converts explicit
//! commands (`start`, `pause`, `resume`, `reset`, `configure`, `set_duration`)
//! and scheduled frames into a consistent remaining time, and queues
//! [`TimerEvent`]s for the host to drain.
//!
//! # Basic Usage
//!
//! ```rust
//! use focus_flow::timer::{Engine, ManualScheduler, TimerEvent, TimerState};
//!
//! let mut engine = Engine::new(1500.0, ManualScheduler::new());
//! engine.start();
//! engine.advance(100_000);
//! engine.pause();
//! engine.advance(500_000); // no effect while paused
//! engine.resume();
//! engine.advance(100_000);
//! assert_eq!(engine.remaining_seconds(), 1300.0);
//!
//! let states: Vec<TimerState> = engine
//!     .take_events()
//!     .into_iter()
//!     .filter_map(|e| match e {
//!         TimerEvent::StateChanged(s) => Some(s),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(states, vec![TimerState::Running, TimerState::Paused, TimerState::Running]);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! With the default [`TickScheduler`], every command that schedules a frame
//! leaves a tick command behind; hand it to the runtime with
//! [`Engine::take_cmd`] and forward frames through [`Engine::update`]:
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Msg};
//! use focus_flow::timer::{self, Engine};
//!
//! struct App {
//!     engine: Engine,
//! }
//!
//! impl App {
//!     fn start(&mut self) -> Option<Cmd> {
//!         self.engine.start();
//!         self.engine.take_cmd()
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         let cmd = self.engine.update(msg);
//!         for _event in self.engine.take_events() {
//!             // render ticks, record completions
//!         }
//!         cmd
//!     }
//! }
//!
//! let mut app = App { engine: timer::new(1500) };
//! assert!(app.start().is_some());
//! ```

pub mod engine;
pub mod scheduler;
pub mod types;


pub use engine::{new, Engine};
pub use scheduler::{ManualScheduler, Scheduler, TickScheduler, DEFAULT_FRAME_INTERVAL};
pub use types::{
    clamp_seconds, CompletionRecord, FrameMsg, TickEvent, TimerControl, TimerEvent, TimerState,
    DEFAULT_SECONDS, MAX_SECONDS, MIN_SECONDS,
};
