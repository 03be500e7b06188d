//! Key bindings for the duration editor.

use crate::key::{new_binding, with_help, with_keys_str, Binding};

/// KeyMap is the set of key bindings the duration editor responds to.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Commit the edit.
    pub commit: Binding,
    /// Abandon the edit and restore the previous text.
    pub cancel: Binding,
    /// Delete the digit before the caret, or the selection.
    pub delete_character_backward: Binding,
    /// Delete the digit after the caret, or the selection.
    pub delete_character_forward: Binding,
    /// Move the caret one character left.
    pub character_backward: Binding,
    /// Move the caret one character right.
    pub character_forward: Binding,
    /// Extend the selection one character left.
    pub select_backward: Binding,
    /// Extend the selection one character right.
    pub select_forward: Binding,
    /// Select the whole text.
    pub select_all: Binding,
    /// Move to the start.
    pub line_start: Binding,
    /// Move to the end.
    pub line_end: Binding,
    /// Paste from the clipboard.
    pub paste: Binding,
    /// Cut the selection to the clipboard.
    pub cut: Binding,
}

/// Default bindings for the duration editor.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        commit: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "set")]),
        cancel: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "cancel")]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        select_backward: new_binding(vec![with_keys_str(&["shift+left"])]),
        select_forward: new_binding(vec![with_keys_str(&["shift+right"])]),
        select_all: new_binding(vec![with_keys_str(&["ctrl+a"])]),
        line_start: new_binding(vec![with_keys_str(&["home"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
        paste: new_binding(vec![with_keys_str(&["ctrl+v"]), with_help("ctrl+v", "paste")]),
        cut: new_binding(vec![with_keys_str(&["ctrl+x"]), with_help("ctrl+x", "cut")]),
    }
}

impl crate::key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.commit, &self.cancel, &self.paste, &self.cut]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.commit, &self.cancel],
            vec![
                &self.character_backward,
                &self.character_forward,
                &self.select_backward,
                &self.select_forward,
                &self.select_all,
                &self.line_start,
                &self.line_end,
            ],
            vec![
                &self.delete_character_backward,
                &self.delete_character_forward,
                &self.paste,
                &self.cut,
            ],
        ]
    }
}
