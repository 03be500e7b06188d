#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/focus-flow-widgets/")]

//! # focus-flow
//!
//! A focus timer for the terminal, built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is split into a drift-corrected countdown engine, an in-place
//! `MM:SS` duration editor and the application that hosts them. Each piece
//! follows the Elm Architecture with `update()` and `view()` methods, so the
//! engine and editor can also be embedded in other bubbletea-rs programs.
//!
//! ## Components
//!
//! - **[`timer`]**: countdown state machine. Remaining time is always derived
//!   from absolute timestamps, never accumulated per frame.
//! - **[`editor`]**: retype the countdown in place. Every keystroke, paste and
//!   cut is normalized into an edit over four digits.
//! - **[`app`]**: the Focus Flow program with timer, task and history tabs.
//! - **[`tasks`]**, **[`history`]**, **[`storage`]**: task list, completed
//!   sessions and their JSON persistence.
//! - **[`display`]**: pure formatting helpers for ticks.
//! - **[`key`]**: type-safe key bindings.
//!
//! ## Focus Management
//!
//! The duration editor implements [`Component`]: focusing it opens an edit
//! session.
//!
//! ```rust
//! use focus_flow::prelude::*;
//!
//! let mut editor = editor_new(1500);
//! assert!(!editor.focused());
//! editor.focus();
//! assert!(editor.focused());
//! editor.blur();
//! assert!(!editor.focused());
//! ```
//!
//! ## Driving the engine
//!
//! Tests and embedders can swap the frame scheduler for a manual clock:
//!
//! ```rust
//! use focus_flow::timer::{Engine, ManualScheduler, TimerEvent, TimerState};
//!
//! let mut engine = Engine::new(1500.0, ManualScheduler::new());
//! engine.start();
//! engine.advance(400_000);
//! assert_eq!(engine.remaining_seconds(), 1100.0);
//!
//! let events = engine.take_events();
//! assert!(events.contains(&TimerEvent::StateChanged(TimerState::Running)));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: state
//! transitions and edits at `debug`, persistence failures at `warn`. No logger
//! is installed; the host program picks one.

pub mod app;
pub mod display;
pub mod editor;
pub mod history;
pub mod key;
pub mod storage;
pub mod tasks;
pub mod timer;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input and renders its active state;
/// a blurred one does neither.
///
/// ## Implementation Guidelines
///
/// - `focus()` should set the focused state and may return a command for
///   initialization
/// - `blur()` should unset the focused state and drop focus-only state
/// - `focused()` should report the current state consistently
///
/// ## Examples
///
/// ```rust
/// use focus_flow::prelude::*;
///
/// fn toggle_focus<T: Component>(component: &mut T) {
///     if component.focused() {
///         component.blur();
///     } else {
///         let _cmd = component.focus();
///     }
/// }
///
/// let mut editor = editor_new(600);
/// toggle_focus(&mut editor);
/// assert!(editor.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// Returns an optional command for the bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use app::FocusFlow;
pub use editor::Model as DurationEditor;
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use storage::{JsonFileStore, MemoryStore, Settings, Store, StoreError};
pub use timer::{Engine as TimerEngine, TimerControl, TimerEvent, TimerState};

/// Prelude module for convenient imports.
///
/// ```rust
/// use focus_flow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{FocusFlow, Tab};
    pub use crate::display::{format_countdown, window_title, Controls};
    pub use crate::editor::{
        new as editor_new, CommitOutcome, EditCommand, EditEnd, Model as DurationEditor,
    };
    pub use crate::history::{format_duration, SessionLog, SessionRecord};
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::storage::{JsonFileStore, MemoryStore, Settings, Store, StoreError};
    pub use crate::tasks::{Task, TaskList};
    pub use crate::timer::{
        new as timer_new, Engine as TimerEngine, ManualScheduler, Scheduler, TickEvent,
        TickScheduler, TimerControl, TimerEvent, TimerState,
    };
    pub use crate::Component;
}
