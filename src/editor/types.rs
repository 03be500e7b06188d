//! Core types for the duration editor.

use bubbletea_rs::Msg;

/// Clipboard paste message carrying raw text.
#[derive(Debug, Clone)]
pub struct PasteMsg(pub String);

/// Clipboard paste error message.
#[derive(Debug, Clone)]
pub struct PasteErrMsg(pub String);

/// What a commit did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The text did not parse; the last committed duration is shown again.
    Invalid,
    /// A new duration was applied and the timer reset. Hosts persist this value.
    Updated(u32),
    /// The duration was unchanged but the session in progress was discarded.
    Discarded,
    /// Nothing changed.
    Unchanged,
}

impl CommitOutcome {
    /// The new duration to persist, if any.
    pub fn persisted_seconds(&self) -> Option<u32> {
        match self {
            CommitOutcome::Updated(seconds) => Some(*seconds),
            _ => None,
        }
    }
}

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEnd {
    /// The text was committed.
    Committed(CommitOutcome),
    /// Escape restored the text from before the edit.
    Cancelled,
}

impl From<PasteMsg> for Msg {
    fn from(msg: PasteMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<PasteErrMsg> for Msg {
    fn from(msg: PasteErrMsg) -> Self {
        Box::new(msg) as Msg
    }
}
