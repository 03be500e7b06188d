//! Core model implementation for the duration editor.

use super::digits::{SelectionRange, TEXT_LEN};
use super::keymap::{default_key_map, KeyMap};
#[cfg(feature = "clipboard-support")]
use super::types::PasteMsg;
use super::types::{EditEnd, PasteErrMsg};
use crate::display::format_countdown;
use crate::timer::clamp_seconds;
use bubbletea_rs::{Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::time::Duration;

/// In-place editor for the `MM:SS` countdown text.
///
/// Outside an edit session the editor simply mirrors the countdown (see
/// [`Model::show_remaining`]). An edit session starts with
/// [`Model::begin_edit`], which pauses a running timer and selects the whole
/// text. Keys, pastes and cuts are turned into digit-buffer edits, and the
/// session ends with a commit or a cancel (Escape). Enter commits at once;
/// blur leaves the commit pending until the host resolves it with
/// [`Model::commit_pending`].
///
/// # Examples
///
/// ```rust
/// use focus_flow::editor;
/// use focus_flow::timer::{Engine, ManualScheduler};
///
/// let mut engine = Engine::new(1500.0, ManualScheduler::new());
/// let mut editor = editor::new(1500);
/// assert_eq!(editor.value(), "25:00");
///
/// editor.begin_edit(&mut engine);
/// editor.insert_digits("1205");
/// assert_eq!(editor.value(), "12:05");
///
/// let outcome = editor.commit(&mut engine);
/// assert_eq!(outcome.persisted_seconds(), Some(725));
/// assert_eq!(engine.total_seconds(), 725);
/// ```
pub struct Model {
    /// Last clipboard error, if any.
    pub err: Option<String>,

    /// Style of the text outside an edit session.
    pub text_style: Style,
    /// Style of the text while editing.
    pub editing_style: Style,
    /// Style of selected characters and of the caret.
    pub selection_style: Style,

    /// KeyMap encodes the keybindings.
    pub key_map: KeyMap,

    /// The rendered text.
    pub(super) text: String,
    /// Selection anchor, in characters.
    pub(super) anchor: usize,
    /// Caret, in characters. The selection spans anchor..caret.
    pub(super) caret: usize,
    pub(super) editing: bool,
    /// Text captured when the edit began, restored on cancel.
    pub(super) backup: Option<String>,
    /// Text typed before a blur, awaiting [`Model::commit_pending`].
    pub(super) pending: Option<String>,
    pub(super) last_committed: u32,
    pub(super) finished: Option<EditEnd>,
}

/// Creates an editor showing `seconds` as `MM:SS`.
///
/// `seconds` is clamped to the timer's duration range.
pub fn new(seconds: u32) -> Model {
    let seconds = clamp_seconds(f64::from(seconds));
    Model {
        err: None,
        text_style: Style::new().bold(true),
        editing_style: Style::new().foreground(Color::from("212")),
        selection_style: Style::new().reverse(true),
        key_map: default_key_map(),
        text: format_countdown(f64::from(seconds)),
        anchor: 0,
        caret: 0,
        editing: false,
        backup: None,
        pending: None,
        last_committed: seconds,
        finished: None,
    }
}

impl Default for Model {
    fn default() -> Self {
        new(crate::timer::DEFAULT_SECONDS)
    }
}

impl Model {
    /// The current selection.
    pub fn selection(&self) -> SelectionRange {
        SelectionRange::new(self.anchor, self.caret)
    }

    /// Sets the selection. Offsets are clamped to the text.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        let len = self.text.chars().count().min(TEXT_LEN);
        self.anchor = anchor.min(len);
        self.caret = caret.min(len);
    }
}

/// Creates a command that reads the system clipboard.
///
/// The command resolves to a [`PasteMsg`](super::PasteMsg) with the clipboard
/// text or a [`PasteErrMsg`] describing why it could not be read.
pub fn paste() -> Cmd {
    use bubbletea_rs::tick as bubbletea_tick;
    bubbletea_tick(Duration::from_nanos(1), |_| {
        #[cfg(feature = "clipboard-support")]
        {
            use clipboard::{ClipboardContext, ClipboardProvider};
            let res: Result<String, String> = (|| {
                let mut ctx: ClipboardContext = ClipboardProvider::new()
                    .map_err(|e| format!("Failed to create clipboard context: {}", e))?;
                ctx.get_contents()
                    .map_err(|e| format!("Failed to read clipboard: {}", e))
            })();
            match res {
                Ok(s) => Box::new(PasteMsg(s)) as Msg,
                Err(e) => Box::new(PasteErrMsg(e)) as Msg,
            }
        }
        #[cfg(not(feature = "clipboard-support"))]
        {
            Box::new(PasteErrMsg("Clipboard support not enabled".to_string())) as Msg
        }
    })
}

/// Writes `text` to the system clipboard.
pub(super) fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(feature = "clipboard-support")]
    {
        use clipboard::{ClipboardContext, ClipboardProvider};
        let mut ctx: ClipboardContext = ClipboardProvider::new()
            .map_err(|e| format!("Failed to create clipboard context: {}", e))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| format!("Failed to write clipboard: {}", e))
    }
    #[cfg(not(feature = "clipboard-support"))]
    {
        let _ = text;
        Err("Clipboard support not enabled".to_string())
    }
}
