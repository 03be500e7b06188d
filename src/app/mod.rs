//! The Focus Flow terminal application.
//!
//! [`FocusFlow`] is a Bubble Tea model that ties the countdown engine, the
//! in-place duration editor, the task list and the session history together,
//! and persists tasks, sessions and settings between runs.
//!
//! # Keys
//!
//! | Tab     | Keys |
//! |---------|------|
//! | Timer   | `s` start/restart, `p` pause, `r` resume, `x` reset, `e` edit duration |
//! | Tasks   | type + `enter` to add, `↓`/`↑` select, `space` check, `d` remove, `esc` back to input |
//! | History | `c` then `y` to clear |
//!
//! `tab`/`shift+tab` switch tabs and `ctrl+c` quits from anywhere.
//!
//! # Example
//!
//! ```rust
//! use focus_flow::app::FocusFlow;
//! use focus_flow::storage::MemoryStore;
//! use focus_flow::timer::{ManualScheduler, TimerState};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut app = FocusFlow::with_scheduler(ManualScheduler::new(), Box::new(MemoryStore::new()));
//! app.update(Box::new(KeyMsg { key: KeyCode::Char('s'), modifiers: KeyModifiers::NONE }));
//! assert_eq!(app.engine().state(), TimerState::Running);
//!
//! app.engine_mut().advance(90_000);
//! app.sync();
//! assert_eq!(app.title(), "Focus Flow • 23:30");
//! ```

pub mod keymap;
pub mod model;
pub mod view;

#[cfg(test)]
mod tests;

pub use keymap::{default_key_map, KeyMap, TabHelp};
pub use model::{default_home, FocusFlow, Tab, DEFAULT_HOME, HOME_ENV};
