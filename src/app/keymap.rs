//! Key bindings for the Focus Flow application.

use super::model::Tab;
use crate::key::{new_binding, with_help, with_keys_str, Binding};

/// KeyMap is the set of application-level key bindings.
///
/// The duration editor has its own bindings and owns the keyboard while an
/// edit is in progress; only [`KeyMap::quit`] is honoured then.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Quit the program.
    pub quit: Binding,
    /// Next tab.
    pub next_tab: Binding,
    /// Previous tab.
    pub prev_tab: Binding,

    /// Start, or restart after completion.
    pub start: Binding,
    /// Pause a running session.
    pub pause: Binding,
    /// Resume a paused session.
    pub resume: Binding,
    /// Abandon the session.
    pub reset: Binding,
    /// Edit the countdown in place.
    pub edit: Binding,

    /// Add the drafted task.
    pub add_task: Binding,
    /// Remove the last drafted character.
    pub erase: Binding,
    /// Move the task cursor up.
    pub up: Binding,
    /// Move the task cursor down.
    pub down: Binding,
    /// Check or uncheck the task under the cursor.
    pub toggle_task: Binding,
    /// Remove the task under the cursor.
    pub remove_task: Binding,
    /// Leave the list and return to the task input.
    pub leave_list: Binding,

    /// Ask to clear the history.
    pub clear_history: Binding,
    /// Confirm clearing the history.
    pub confirm: Binding,
}

/// Default application bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        quit: new_binding(vec![with_keys_str(&["ctrl+c"]), with_help("ctrl+c", "quit")]),
        next_tab: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "next tab")]),
        prev_tab: new_binding(vec![with_keys_str(&["shift+tab"])]),

        start: new_binding(vec![with_keys_str(&["s"]), with_help("s", "start")]),
        pause: new_binding(vec![with_keys_str(&["p"]), with_help("p", "pause")]),
        resume: new_binding(vec![with_keys_str(&["r"]), with_help("r", "resume")]),
        reset: new_binding(vec![with_keys_str(&["x"]), with_help("x", "reset")]),
        edit: new_binding(vec![with_keys_str(&["e"]), with_help("e", "edit duration")]),

        add_task: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "add task")]),
        erase: new_binding(vec![with_keys_str(&["backspace"])]),
        up: new_binding(vec![with_keys_str(&["up"]), with_help("↑/↓", "select")]),
        down: new_binding(vec![with_keys_str(&["down"])]),
        toggle_task: new_binding(vec![with_keys_str(&["space"]), with_help("space", "check")]),
        remove_task: new_binding(vec![with_keys_str(&["d", "delete"]), with_help("d", "remove")]),
        leave_list: new_binding(vec![with_keys_str(&["esc"])]),

        clear_history: new_binding(vec![with_keys_str(&["c"]), with_help("c", "clear history")]),
        confirm: new_binding(vec![with_keys_str(&["y"]), with_help("y", "confirm")]),
    }
}

/// The help bindings relevant to one tab.
pub struct TabHelp<'a> {
    /// Bindings to draw from.
    pub map: &'a KeyMap,
    /// Tab being shown.
    pub tab: Tab,
    /// A history clear is awaiting confirmation.
    pub confirming: bool,
}

impl crate::key::KeyMap for TabHelp<'_> {
    fn short_help(&self) -> Vec<&Binding> {
        let m = self.map;
        let mut bindings = match self.tab {
            Tab::Timer => vec![&m.start, &m.pause, &m.resume, &m.reset, &m.edit],
            Tab::Tasks => vec![&m.add_task, &m.up, &m.toggle_task, &m.remove_task],
            Tab::History if self.confirming => vec![&m.confirm],
            Tab::History => vec![&m.clear_history],
        };
        bindings.push(&m.next_tab);
        bindings.push(&m.quit);
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![self.short_help()]
    }
}
