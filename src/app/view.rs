//! Rendering for the Focus Flow application.

use super::keymap::TabHelp;
use super::model::{FocusFlow, Tab};
use crate::display::{progress_bar, tick_progress};
use crate::history::format_duration;
use crate::key::short_help_view;
use crate::tasks::EMPTY_PLACEHOLDER;
use crate::timer::{Scheduler, TimerState};
use lipgloss_extras::prelude::*;

const BAR_WIDTH: usize = 30;

impl<S: Scheduler> FocusFlow<S> {
    /// Renders the whole screen.
    pub fn view(&self) -> String {
        let title_style = Style::new().bold(true).foreground(Color::from("212"));
        let help_style = Style::new().faint(true);

        let mut lines = vec![title_style.render(&self.title), self.tabs_view(), String::new()];
        lines.extend(match self.tab {
            Tab::Timer => self.timer_view(),
            Tab::Tasks => self.tasks_view(),
            Tab::History => self.history_view(),
        });
        lines.push(String::new());
        lines.push(help_style.render(&self.help_view()));
        lines.join("\n")
    }

    /// One-line help for the current tab, or the editor's while editing.
    pub fn help_view(&self) -> String {
        if self.editor.editing() {
            return short_help_view(&self.editor.key_map);
        }
        short_help_view(&TabHelp {
            map: &self.key_map,
            tab: self.tab,
            confirming: self.confirm_clear,
        })
    }

    fn tabs_view(&self) -> String {
        let active = Style::new().bold(true).underline(true);
        let inactive = Style::new().faint(true);
        Tab::ALL
            .iter()
            .map(|&tab| {
                if tab == self.tab {
                    active.render(tab.title())
                } else {
                    inactive.render(tab.title())
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn timer_view(&self) -> Vec<String> {
        let muted = Style::new().faint(true);
        let tick = &self.last_tick;

        let mut lines = vec![
            self.editor.view(),
            progress_bar(tick_progress(tick), BAR_WIDTH),
            muted.render(&format!(
                "{} session • {}",
                format_duration(tick.total_seconds),
                tick.state
            )),
        ];
        if tick.state == TimerState::Complete {
            lines.push(format!(
                "Session complete. Press s to {}.",
                self.controls.start_label.to_lowercase()
            ));
        }
        if let Some(err) = &self.editor.err {
            lines.push(Style::new().foreground(Color::from("196")).render(err));
        }
        lines
    }

    fn tasks_view(&self) -> Vec<String> {
        let muted = Style::new().faint(true);
        let selected = Style::new().reverse(true);
        let done = Style::new().faint(true);

        let prompt = if self.task_cursor.is_none() { "> " } else { "  " };
        let mut lines = vec![format!("{}{}", prompt, self.draft), String::new()];

        if self.tasks.is_empty() {
            lines.push(muted.render(EMPTY_PLACEHOLDER));
            return lines;
        }

        for (i, task) in self.tasks.tasks().iter().enumerate() {
            let mark = if task.done { "[x]" } else { "[ ]" };
            let text = if task.done {
                done.render(&task.text)
            } else {
                task.text.clone()
            };
            let line = format!("{} {}", mark, text);
            if self.task_cursor == Some(i) {
                lines.push(selected.render(&line));
            } else {
                lines.push(line);
            }
        }
        lines.push(String::new());
        lines.push(muted.render(&format!(
            "{} of {} done",
            self.tasks.completed_count(),
            self.tasks.len()
        )));
        lines
    }

    fn history_view(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.confirm_clear {
            lines.push(
                Style::new()
                    .bold(true)
                    .render("Clear all recorded sessions? Press y to confirm."),
            );
            lines.push(String::new());
        }
        lines.extend(self.sessions.render_lines());
        lines
    }
}
