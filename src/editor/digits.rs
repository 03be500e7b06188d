//! Pure digit-buffer transformer behind the duration editor.
//!
//! The editable text is always `MM:SS`. Every edit (typing, deleting, paste,
//! cut) is normalized into an [`EditCommand`] and applied to the underlying
//! four-digit [`DigitBuffer`], never to the text directly. The colon is not
//! part of the buffer; selections over the text are mapped to digit ranges by
//! counting digit characters only.

use std::fmt;

/// Number of digits in the buffer (`MMSS`).
pub const DIGIT_COUNT: usize = 4;
/// Length of the rendered text (`MM:SS`).
pub const TEXT_LEN: usize = 5;
/// Character offset of the colon in the rendered text.
pub const COLON_INDEX: usize = 2;
/// Longest sanitized paste, in characters.
pub const MAX_PASTE_LEN: usize = 5;

/// Exactly four ASCII digits, logically `MMSS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitBuffer([u8; DIGIT_COUNT]);

impl DigitBuffer {
    /// Builds a buffer from the digits in `s`, ignoring everything else.
    ///
    /// Extra digits are dropped and missing ones are filled with `'0'` on the right.
    pub fn from_digits(s: &str) -> Self {
        let mut buf = [b'0'; DIGIT_COUNT];
        for (slot, d) in buf
            .iter_mut()
            .zip(s.bytes().filter(|b| b.is_ascii_digit()))
        {
            *slot = d;
        }
        Self(buf)
    }

    /// Buffer showing `seconds` as minutes and seconds, capped at `99:59`.
    pub fn from_seconds(seconds: u32) -> Self {
        let capped = seconds.min(99 * 60 + 59);
        Self::from_digits(&format!("{:02}{:02}", capped / 60, capped % 60))
    }

    /// The four digits as a string.
    pub fn digits(&self) -> String {
        self.0.iter().map(|&b| char::from(b)).collect()
    }

    /// The buffer rendered as `MM:SS`.
    pub fn render(&self) -> String {
        let d = self.digits();
        format!("{}:{}", &d[..COLON_INDEX], &d[COLON_INDEX..])
    }

    /// Replaces `range` with `inserted` and renormalizes to four digits.
    ///
    /// Returns the new buffer and the digit index just after the last inserted
    /// digit.
    pub fn splice(&self, range: DigitRange, inserted: &str) -> (Self, usize) {
        let current = self.digits();
        let start = range.start.min(DIGIT_COUNT);
        let end = range.end.clamp(start, DIGIT_COUNT);
        let inserted = sanitize_digits(inserted);

        let mut spliced = String::with_capacity(DIGIT_COUNT + inserted.len());
        spliced.push_str(&current[..start]);
        spliced.push_str(&inserted);
        spliced.push_str(&current[end..]);

        let caret = (start + inserted.len()).min(DIGIT_COUNT);
        (Self::from_digits(&spliced), caret)
    }
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self([b'0'; DIGIT_COUNT])
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A selection over the rendered text, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    /// Inclusive start.
    pub start: usize,
    /// Exclusive end.
    pub end: usize,
}

impl SelectionRange {
    /// Creates a selection, ordering the ends and clamping them to the text length.
    pub fn new(a: usize, b: usize) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start: start.min(TEXT_LEN),
            end: end.min(TEXT_LEN),
        }
    }

    /// A collapsed selection (a caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// The whole rendered text.
    pub fn all() -> Self {
        Self::new(0, TEXT_LEN)
    }

    /// Whether the selection is a bare caret.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Maps the selection to digit offsets by counting digits before each end.
    pub fn to_digit_range(&self, text: &str) -> DigitRange {
        let count = |offset: usize| {
            text.chars()
                .take(offset)
                .filter(|c| c.is_ascii_digit())
                .count()
                .min(DIGIT_COUNT)
        };
        DigitRange {
            start: count(self.start),
            end: count(self.end),
        }
    }

    /// Whether the character at `offset` is inside the selection.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// The selected slice of `text`.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let byte_at = |offset: usize| {
            text.char_indices()
                .nth(offset)
                .map(|(i, _)| i)
                .unwrap_or(text.len())
        };
        &text[byte_at(self.start)..byte_at(self.end)]
    }
}

/// A selection expressed in digit offsets `0..=4`, colon excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitRange {
    /// Inclusive start.
    pub start: usize,
    /// Exclusive end.
    pub end: usize,
}

/// Converts a digit index back to a character offset in `MM:SS`.
pub fn digit_to_char_offset(index: usize) -> usize {
    let index = index.min(DIGIT_COUNT);
    if index >= COLON_INDEX {
        index + 1
    } else {
        index
    }
}

/// Keeps digits only, at most four of them.
pub fn sanitize_digits(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit())
        .take(DIGIT_COUNT)
        .collect()
}

/// Keeps digits and the first colon, at most five characters.
///
/// ```rust
/// use focus_flow::editor::digits::sanitize_paste;
///
/// assert_eq!(sanitize_paste("ab1:2cd"), "1:2");
/// assert_eq!(sanitize_paste("12:34:56"), "12:34");
/// ```
pub fn sanitize_paste(s: &str) -> String {
    let mut seen_colon = false;
    s.chars()
        .filter(|&c| {
            if c == ':' {
                let keep = !seen_colon;
                seen_colon = true;
                keep
            } else {
                c.is_ascii_digit()
            }
        })
        .take(MAX_PASTE_LEN)
        .collect()
}

/// The closed set of edits the editor understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace the current selection with digits (typing, paste).
    InsertDigits(String),
    /// Backspace.
    DeleteBackward,
    /// Forward delete.
    DeleteForward,
    /// Remove exactly the selected digits (cut, delete over a selection).
    DeleteRange,
    /// Replace an explicit selection with digits.
    ReplaceRange(SelectionRange, String),
}

/// Result of applying an [`EditCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The new buffer.
    pub buffer: DigitBuffer,
    /// The buffer rendered as `MM:SS`.
    pub text: String,
    /// Caret position in the rendered text.
    pub caret: usize,
}

impl EditOutcome {
    fn at_digit(buffer: DigitBuffer, digit_index: usize) -> Self {
        Self {
            text: buffer.render(),
            buffer,
            caret: digit_to_char_offset(digit_index),
        }
    }
}

/// Applies `cmd` to `text` with the given selection.
///
/// Collapsed backward delete at the start and collapsed forward delete at the
/// end leave the buffer as it was.
///
/// ```rust
/// use focus_flow::editor::digits::{apply, EditCommand, SelectionRange};
///
/// let out = apply("25:00", SelectionRange::all(), &EditCommand::InsertDigits("1".into()));
/// assert_eq!(out.text, "10:00");
/// assert_eq!(out.caret, 1);
/// ```
pub fn apply(text: &str, selection: SelectionRange, cmd: &EditCommand) -> EditOutcome {
    let buffer = DigitBuffer::from_digits(text);
    let range = selection.to_digit_range(text);

    match cmd {
        EditCommand::InsertDigits(inserted) => {
            let (next, caret) = buffer.splice(range, inserted);
            EditOutcome::at_digit(next, caret)
        }
        EditCommand::ReplaceRange(explicit, inserted) => {
            let (next, caret) = buffer.splice(explicit.to_digit_range(text), inserted);
            EditOutcome::at_digit(next, caret)
        }
        EditCommand::DeleteRange => {
            let (next, caret) = buffer.splice(range, "");
            EditOutcome::at_digit(next, caret)
        }
        EditCommand::DeleteBackward if !selection.is_collapsed() => {
            apply(text, selection, &EditCommand::DeleteRange)
        }
        EditCommand::DeleteForward if !selection.is_collapsed() => {
            apply(text, selection, &EditCommand::DeleteRange)
        }
        EditCommand::DeleteBackward => {
            let at = range.start;
            if at == 0 {
                return EditOutcome::at_digit(buffer, at);
            }
            let (next, caret) = buffer.splice(
                DigitRange {
                    start: at - 1,
                    end: at,
                },
                "",
            );
            EditOutcome::at_digit(next, caret)
        }
        EditCommand::DeleteForward => {
            let at = range.start;
            if at >= DIGIT_COUNT {
                return EditOutcome::at_digit(buffer, at);
            }
            let (next, caret) = buffer.splice(
                DigitRange {
                    start: at,
                    end: at + 1,
                },
                "",
            );
            EditOutcome::at_digit(next, caret)
        }
    }
}
