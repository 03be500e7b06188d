//! In-place `MM:SS` duration editor for Bubble Tea applications.
//!
//! The editor lets a user retype the countdown display directly. Everything the
//! user does is reduced to a small set of [`EditCommand`]s over a four-digit
//! buffer (see [`digits`]), so the text is always a well-formed `MM:SS`. On
//! commit the text is parsed ([`parse_duration_text`]), clamped and handed to
//! the timer through the [`TimerControl`](crate::timer::TimerControl) trait.
//!
//! # Basic Usage
//!
//! ```rust
//! use focus_flow::editor::{self, EditEnd};
//! use focus_flow::timer::{Engine, ManualScheduler};
//!
//! let mut engine = Engine::new(1500.0, ManualScheduler::new());
//! let mut editor = editor::new(engine.total_seconds());
//!
//! editor.begin_edit(&mut engine);
//! editor.paste_text("ab1:2cd");
//! assert_eq!(editor.value(), "12:00");
//! editor.cancel();
//! assert_eq!(editor.value(), "25:00");
//! assert_eq!(editor.take_finished(), Some(EditEnd::Cancelled));
//! ```
//!
//! # Key Bindings
//!
//! Enter commits, Escape cancels, backspace/delete remove digits, arrows move
//! the caret (with shift to select), `ctrl+v` pastes and `ctrl+x` cuts. Any
//! other non-digit key is swallowed.

pub mod digits;
pub mod keymap;
pub mod methods;
pub mod model;
pub mod parse;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use digits::{DigitBuffer, DigitRange, EditCommand, EditOutcome, SelectionRange};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, paste, Model};
pub use parse::parse_duration_text;
pub use types::{CommitOutcome, EditEnd, PasteErrMsg, PasteMsg};
