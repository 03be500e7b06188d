//! Core methods for the Model struct.

use super::digits::{self, sanitize_paste, EditCommand, TEXT_LEN};
use super::model::{copy_to_clipboard, paste, Model};
use super::parse::parse_duration_text;
use super::types::{CommitOutcome, EditEnd, PasteErrMsg, PasteMsg};
use crate::display::format_countdown;
use crate::key::matches_binding;
use crate::timer::{clamp_seconds, TimerControl, TimerState};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Returns the current text.
    pub fn value(&self) -> String {
        self.text.clone()
    }

    /// Replaces the text outright, e.g. with a value restored from elsewhere.
    ///
    /// The text is not normalized; a commit of unparsable text reverts to
    /// the last committed duration.
    pub fn set_value(&mut self, s: &str) {
        self.text = s.to_string();
        self.set_selection(self.anchor, self.caret);
    }

    /// Caret position in characters.
    pub fn position(&self) -> usize {
        self.caret
    }

    /// Whether an edit session is in progress.
    pub fn editing(&self) -> bool {
        self.editing
    }

    /// Whether a blur left typed text waiting for [`Model::commit_pending`].
    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    /// The duration most recently committed, in seconds.
    pub fn last_committed(&self) -> u32 {
        self.last_committed
    }

    /// Mirrors the countdown while not editing. Ignored during an edit.
    pub fn show_remaining(&mut self, remaining_seconds: f64) {
        if !self.editing {
            self.text = format_countdown(remaining_seconds);
        }
    }

    /// Starts an edit session.
    ///
    /// Backs up the text for cancel, pauses the timer if it is running and
    /// selects everything so typing overwrites the duration.
    pub fn begin_edit(&mut self, timer: &mut dyn TimerControl) {
        if self.editing {
            return;
        }
        if timer.state() == TimerState::Running {
            timer.pause();
        }
        self.last_committed = timer.total_seconds();
        let _ = Component::focus(self);
        log::debug!("duration edit started at {}", self.text);
    }

    /// Applies an edit command to the text and moves the caret after it.
    pub fn apply(&mut self, cmd: EditCommand) {
        if !self.editing {
            return;
        }
        let outcome = digits::apply(&self.text, self.selection(), &cmd);
        self.text = outcome.text;
        self.anchor = outcome.caret;
        self.caret = outcome.caret;
    }

    /// Types digits over the selection. Non-digits are dropped.
    pub fn insert_digits(&mut self, s: &str) {
        self.apply(EditCommand::InsertDigits(s.to_string()));
    }

    /// Backspace.
    pub fn delete_backward(&mut self) {
        self.apply(EditCommand::DeleteBackward);
    }

    /// Forward delete.
    pub fn delete_forward(&mut self) {
        self.apply(EditCommand::DeleteForward);
    }

    /// Deletes exactly the selected digits.
    pub fn delete_selection(&mut self) {
        self.apply(EditCommand::DeleteRange);
    }

    /// Inserts clipboard text after sanitizing it to digits and one colon.
    pub fn paste_text(&mut self, raw: &str) {
        let sanitized = sanitize_paste(raw);
        self.apply(EditCommand::InsertDigits(sanitized));
    }

    /// Copies the selection to the clipboard, then deletes it.
    ///
    /// A clipboard failure is recorded in `err`; the selection is deleted
    /// either way.
    pub fn cut(&mut self) {
        let selection = self.selection();
        if !self.editing || selection.is_collapsed() {
            return;
        }
        let selected = selection.slice(&self.text).to_string();
        self.err = copy_to_clipboard(&selected).err();
        self.delete_selection();
    }

    /// Whether a typed character should reach the buffer.
    ///
    /// Digits always do. A colon only does while the text has no colon and
    /// is not empty.
    pub fn accepts_char(&self, c: char) -> bool {
        match c {
            '0'..='9' => true,
            ':' => !self.text.is_empty() && !self.text.contains(':'),
            _ => false,
        }
    }

    /// Ends the session and applies the edited duration to the timer.
    ///
    /// Unparsable text reverts to the last committed duration. A valid
    /// duration is clamped to the timer's range; if it differs from the
    /// timer's total the timer takes it and resets. An unchanged duration
    /// still discards a session in progress.
    ///
    /// Outside an edit session, with no blurred text pending, this does
    /// nothing and returns [`CommitOutcome::Unchanged`].
    pub fn commit(&mut self, timer: &mut dyn TimerControl) -> CommitOutcome {
        let typed = if self.editing {
            self.pending = None;
            self.text.clone()
        } else if let Some(pending) = self.pending.take() {
            pending
        } else {
            return CommitOutcome::Unchanged;
        };
        self.end_edit();

        let outcome = match parse_duration_text(&typed) {
            None => {
                self.text = format_countdown(f64::from(self.last_committed));
                if timer.state() != TimerState::Idle {
                    timer.reset();
                }
                CommitOutcome::Invalid
            }
            Some(parsed) => {
                let seconds = clamp_seconds(parsed as f64);
                let outcome = if seconds != timer.total_seconds() {
                    timer.set_duration(f64::from(seconds));
                    timer.reset();
                    self.last_committed = seconds;
                    CommitOutcome::Updated(seconds)
                } else if timer.state() != TimerState::Idle {
                    timer.reset();
                    CommitOutcome::Discarded
                } else {
                    CommitOutcome::Unchanged
                };
                self.text = format_countdown(f64::from(seconds));
                outcome
            }
        };

        log::debug!("duration edit committed: {:?}", outcome);
        self.finished = Some(EditEnd::Committed(outcome));
        outcome
    }

    /// Commits text left behind by a blur, if any.
    ///
    /// Hosts call this after anything that may have blurred the editor.
    pub fn commit_pending(&mut self, timer: &mut dyn TimerControl) -> Option<CommitOutcome> {
        if self.editing || self.pending.is_none() {
            return None;
        }
        Some(self.commit(timer))
    }

    /// Ends the session and restores the text from before it began.
    ///
    /// Also drops text a blur left pending.
    pub fn cancel(&mut self) {
        if !self.editing {
            if self.pending.take().is_some() {
                log::debug!("pending duration edit dropped");
                self.finished = Some(EditEnd::Cancelled);
            }
            return;
        }
        if let Some(backup) = self.backup.take() {
            self.text = backup;
        }
        self.end_edit();
        log::debug!("duration edit cancelled");
        self.finished = Some(EditEnd::Cancelled);
    }

    /// Returns how the last edit session ended, once.
    pub fn take_finished(&mut self) -> Option<EditEnd> {
        self.finished.take()
    }

    /// Processes a key or clipboard message during an edit session.
    ///
    /// Enter commits through `timer`, Escape cancels. Returns a clipboard
    /// read command for the paste binding.
    pub fn update(&mut self, msg: Msg, timer: &mut dyn TimerControl) -> Option<Cmd> {
        if !self.editing {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.key_map.commit) {
                self.commit(timer);
                return None;
            }
            if matches_binding(key_msg, &self.key_map.cancel) {
                self.cancel();
                return None;
            }
            if matches_binding(key_msg, &self.key_map.paste) {
                return Some(paste());
            }
            if matches_binding(key_msg, &self.key_map.cut) {
                self.cut();
                return None;
            }

            self.handle_deletion_keys(key_msg);
            self.handle_movement_keys(key_msg);
            self.handle_character_input(key_msg);
            return None;
        }

        if let Some(paste_msg) = msg.downcast_ref::<PasteMsg>() {
            self.err = None;
            self.paste_text(&paste_msg.0);
        }

        if let Some(paste_err) = msg.downcast_ref::<PasteErrMsg>() {
            self.err = Some(paste_err.0.clone());
        }

        None
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) {
        if matches_binding(key_msg, &self.key_map.delete_character_backward) {
            self.delete_backward();
        } else if matches_binding(key_msg, &self.key_map.delete_character_forward) {
            self.delete_forward();
        }
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) {
        let len = self.text.chars().count().min(TEXT_LEN);
        let selection = self.selection();

        if matches_binding(key_msg, &self.key_map.character_backward) {
            let to = if selection.is_collapsed() {
                self.caret.saturating_sub(1)
            } else {
                selection.start
            };
            self.set_selection(to, to);
        } else if matches_binding(key_msg, &self.key_map.character_forward) {
            let to = if selection.is_collapsed() {
                (self.caret + 1).min(len)
            } else {
                selection.end
            };
            self.set_selection(to, to);
        } else if matches_binding(key_msg, &self.key_map.select_backward) {
            self.set_selection(self.anchor, self.caret.saturating_sub(1));
        } else if matches_binding(key_msg, &self.key_map.select_forward) {
            self.set_selection(self.anchor, self.caret + 1);
        } else if matches_binding(key_msg, &self.key_map.select_all) {
            self.set_selection(0, len);
        } else if matches_binding(key_msg, &self.key_map.line_start) {
            self.set_selection(0, 0);
        } else if matches_binding(key_msg, &self.key_map.line_end) {
            self.set_selection(len, len);
        }
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) {
        if let KeyCode::Char(ch) = key_msg.key {
            if key_msg.modifiers.contains(KeyModifiers::CONTROL)
                || key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                return;
            }
            if self.accepts_char(ch) {
                self.apply(EditCommand::InsertDigits(ch.to_string()));
            }
        }
    }

    fn end_edit(&mut self) {
        self.editing = false;
        self.backup = None;
        self.anchor = 0;
        self.caret = 0;
    }
}

impl Component for Model {
    /// Opens an edit session without touching any timer.
    ///
    /// Hosts normally call [`Model::begin_edit`], which also pauses a running
    /// timer before focusing. A commit left pending by a blur is dropped.
    fn focus(&mut self) -> Option<Cmd> {
        if !self.editing {
            self.pending = None;
            self.backup = Some(self.text.clone());
            self.editing = true;
            self.err = None;
            let len = self.text.chars().count().min(TEXT_LEN);
            self.set_selection(0, len);
        }
        None
    }

    /// Leaves the edit session with its commit pending.
    ///
    /// The typed text is set aside and the text from before the session is
    /// shown again until [`Model::commit_pending`] applies it to the timer.
    fn blur(&mut self) {
        if !self.editing {
            return;
        }
        let typed = self.text.clone();
        if let Some(backup) = self.backup.take() {
            self.text = backup;
        }
        self.end_edit();
        self.pending = Some(typed);
    }

    fn focused(&self) -> bool {
        self.editing
    }
}

