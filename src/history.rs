//! Log of completed focus sessions.

use crate::tasks::{create_id, Task, TaskList};
use crate::timer::CompletionRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Shown when no session has been recorded.
pub const EMPTY_MESSAGE: &str = "No sessions yet. Finish a focus round to see it here.";

const SPAN_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// A finished session with the tasks as they stood when it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Stable identifier.
    pub id: String,
    /// When the session was started.
    pub started_at: DateTime<Local>,
    /// When the countdown reached zero.
    pub ended_at: DateTime<Local>,
    /// Configured session length in seconds.
    pub total_seconds: u32,
    /// Task snapshot at completion.
    pub tasks: Vec<Task>,
    /// Tasks checked off at completion.
    pub completed_count: usize,
    /// Tasks present at completion.
    pub total_tasks: usize,
}

impl SessionRecord {
    /// Builds a record from a completion and the current task list.
    pub fn capture(completion: &CompletionRecord, tasks: &TaskList) -> Self {
        let snapshot = tasks.snapshot();
        Self {
            id: create_id(),
            started_at: completion.started_at,
            ended_at: completion.ended_at,
            total_seconds: completion.total_seconds,
            completed_count: snapshot.iter().filter(|t| t.done).count(),
            total_tasks: snapshot.len(),
            tasks: snapshot,
        }
    }

    /// `"<start> – <end>"` in local time.
    pub fn span(&self) -> String {
        format!(
            "{} – {}",
            self.started_at.format(SPAN_FORMAT),
            self.ended_at.format(SPAN_FORMAT)
        )
    }

    /// One-line summary of the captured tasks.
    pub fn summary(&self) -> String {
        if self.tasks.is_empty() {
            "No tasks captured this round.".to_string()
        } else {
            format!(
                "{} of {} tasks checked off.",
                self.completed_count, self.total_tasks
            )
        }
    }

    /// Span, duration, summary and one line per task.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![self.span(), format_duration(self.total_seconds), self.summary()];
        for task in &self.tasks {
            let mark = if task.done { "[x]" } else { "[ ]" };
            lines.push(format!("  {} {}", mark, task.text));
        }
        lines
    }
}

/// Recorded sessions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    sessions: Vec<SessionRecord>,
}

impl SessionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps sessions loaded from storage.
    pub fn from_sessions(sessions: Vec<SessionRecord>) -> Self {
        Self { sessions }
    }

    /// Records a completion at the front of the log.
    pub fn capture(&mut self, completion: &CompletionRecord, tasks: &TaskList) -> &SessionRecord {
        let record = SessionRecord::capture(completion, tasks);
        log::debug!(
            "captured session {} ({} of {} tasks done)",
            record.id,
            record.completed_count,
            record.total_tasks
        );
        self.sessions.insert(0, record);
        &self.sessions[0]
    }

    /// Drops every session.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// The sessions, newest first.
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Every session rendered, separated by blank lines, or the empty message.
    pub fn render_lines(&self) -> Vec<String> {
        if self.sessions.is_empty() {
            return vec![EMPTY_MESSAGE.to_string()];
        }
        let mut lines = Vec::new();
        for (i, session) in self.sessions.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(session.render_lines());
        }
        lines
    }
}

/// `"N min"` for whole minutes, `"Nm Ss"` otherwise.
///
/// ```rust
/// use focus_flow::history::format_duration;
///
/// assert_eq!(format_duration(1500), "25 min");
/// assert_eq!(format_duration(95), "1m 35s");
/// ```
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if rest == 0 {
        format!("{} min", minutes)
    } else {
        format!("{}m {}s", minutes, rest)
    }
}
