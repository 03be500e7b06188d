//! View rendering methods for the duration editor.

use super::model::Model;

impl Model {
    /// Renders the countdown text, highlighting the selection or caret while editing.
    pub fn view(&self) -> String {
        if !self.editing {
            return self.text_style.render(&self.text);
        }

        let selection = self.selection();
        let mut v = String::new();
        for (i, ch) in self.text.chars().enumerate() {
            let s = ch.to_string();
            let highlighted = if selection.is_collapsed() {
                i == self.caret
            } else {
                selection.contains(i)
            };
            if highlighted {
                v.push_str(&self.selection_style.render(&s));
            } else {
                v.push_str(&self.editing_style.render(&s));
            }
        }

        // Caret parked after the last character.
        if selection.is_collapsed() && self.caret >= self.text.chars().count() {
            v.push_str(&self.selection_style.render(" "));
        }
        v
    }

    /// The plain text with the selection marked by brackets, for logs and tests.
    pub fn debug_view(&self) -> String {
        if !self.editing {
            return self.text.clone();
        }
        let selection = self.selection();
        let chars: Vec<char> = self.text.chars().collect();
        let mut v = String::new();
        for i in 0..=chars.len() {
            if i == selection.start {
                v.push('[');
            }
            if i == selection.end {
                v.push(']');
            }
            if let Some(c) = chars.get(i) {
                v.push(*c);
            }
        }
        v
    }
}
