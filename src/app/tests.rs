//! Tests for the Focus Flow application model.

use super::*;
use crate::history::SessionLog;
use crate::storage::{load, MemoryStore, SESSIONS_KEY, SETTINGS_KEY, TASKS_KEY};
use crate::tasks::TaskList;
use crate::timer::{ManualScheduler, TimerState};
use crate::Component;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

fn app() -> FocusFlow<ManualScheduler> {
    FocusFlow::with_scheduler(ManualScheduler::new(), Box::new(MemoryStore::new()))
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn press(app: &mut FocusFlow<ManualScheduler>, c: char) {
    app.update(key(KeyCode::Char(c)));
}

fn type_str(app: &mut FocusFlow<ManualScheduler>, s: &str) {
    for c in s.chars() {
        press(app, c);
    }
}

fn advance(app: &mut FocusFlow<ManualScheduler>, ms: u64) {
    app.engine_mut().advance(ms);
    app.sync();
}

fn add_task(app: &mut FocusFlow<ManualScheduler>, text: &str) {
    type_str(app, text);
    app.update(key(KeyCode::Enter));
}

#[test]
fn test_opens_with_defaults() {
    let app = app();
    assert_eq!(app.engine().total_seconds(), 1500);
    assert_eq!(app.editor().value(), "25:00");
    assert_eq!(app.title(), "Focus Flow");
    assert_eq!(app.tab(), Tab::Timer);
    assert!(app.controls().can_start);
}

#[test]
fn test_opens_with_migrated_settings() {
    let store = MemoryStore::new().with_raw(SETTINGS_KEY, r#"{"lastDurationMinutes":40}"#);
    let app = FocusFlow::with_scheduler(ManualScheduler::new(), Box::new(store));
    assert_eq!(app.engine().total_seconds(), 2400);
    assert_eq!(app.editor().value(), "40:00");
    assert_eq!(app.settings().last_duration_seconds, 2400);
}

#[test]
fn test_timer_keys_drive_engine() {
    let mut app = app();
    press(&mut app, 's');
    assert_eq!(app.engine().state(), TimerState::Running);
    assert_eq!(app.title(), "Focus Flow • 25:00");
    assert!(app.controls().can_pause);

    advance(&mut app, 60_000);
    assert_eq!(app.editor().value(), "24:00");
    assert_eq!(app.title(), "Focus Flow • 24:00");

    press(&mut app, 'p');
    assert_eq!(app.engine().state(), TimerState::Paused);
    assert_eq!(app.title(), "Focus Flow");
    assert!(app.controls().can_resume);

    press(&mut app, 'r');
    assert_eq!(app.engine().state(), TimerState::Running);

    press(&mut app, 'x');
    assert_eq!(app.engine().state(), TimerState::Idle);
    assert_eq!(app.editor().value(), "25:00");
}

#[test]
fn test_frame_messages_reach_engine() {
    let mut app = app();
    press(&mut app, 's');
    app.engine_mut().scheduler_mut().advance(1_000);
    let frame = app
        .engine_mut()
        .scheduler_mut()
        .take_pending()
        .expect("a frame is scheduled while running");
    app.update(frame.into());
    assert_eq!(app.last_tick().remaining_seconds, 1499.0);
    assert_eq!(app.editor().value(), "24:59");
}

#[test]
fn test_completion_is_captured_and_persisted() {
    let mut app = app();
    app.update(key(KeyCode::Tab));
    add_task(&mut app, "write intro");
    app.update(key(KeyCode::Tab));
    app.update(key(KeyCode::Tab));
    assert_eq!(app.tab(), Tab::Timer);

    press(&mut app, 's');
    advance(&mut app, 1_500_000);

    assert_eq!(app.engine().state(), TimerState::Complete);
    assert_eq!(app.title(), "Focus Flow • Done!");
    assert_eq!(app.controls().start_label, "Restart Focus");
    assert_eq!(app.sessions().len(), 1);
    let record = &app.sessions().sessions()[0];
    assert_eq!(record.total_seconds, 1500);
    assert_eq!(record.total_tasks, 1);
    assert_eq!(record.completed_count, 0);

    let stored: SessionLog = load(app.store(), SESSIONS_KEY).unwrap().unwrap();
    assert_eq!(stored.len(), 1);

    advance(&mut app, 10_000);
    assert_eq!(app.sessions().len(), 1);
}

#[test]
fn test_duration_commit_persists_settings() {
    let mut app = app();
    press(&mut app, 'e');
    assert!(app.editor().editing());
    type_str(&mut app, "1000");
    app.update(key(KeyCode::Enter));

    assert!(!app.editor().editing());
    assert_eq!(app.engine().total_seconds(), 600);
    assert_eq!(app.editor().value(), "10:00");
    assert_eq!(app.settings().last_duration_seconds, 600);
    let raw = app.store().load_raw(SETTINGS_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"lastDurationSeconds":600}"#));
}

#[test]
fn test_blurred_edit_is_committed_on_sync() {
    let mut app = app();
    press(&mut app, 's');
    advance(&mut app, 60_000);
    press(&mut app, 'e');
    type_str(&mut app, "1205");

    app.editor_mut().blur();
    app.sync();

    assert!(!app.editor().has_pending_commit());
    assert_eq!(app.engine().total_seconds(), 725);
    assert_eq!(app.engine().state(), TimerState::Idle);
    assert_eq!(app.editor().value(), "12:05");
    assert_eq!(app.settings().last_duration_seconds, 725);
    let raw = app.store().load_raw(SETTINGS_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"lastDurationSeconds":725}"#));
}

#[test]
fn test_editor_owns_keys_while_editing() {
    let mut app = app();
    press(&mut app, 's');
    advance(&mut app, 5_000);
    press(&mut app, 'e');
    assert_eq!(app.engine().state(), TimerState::Paused);

    press(&mut app, 's');
    press(&mut app, 'x');
    app.update(key(KeyCode::Tab));
    assert_eq!(app.engine().state(), TimerState::Paused);
    assert_eq!(app.tab(), Tab::Timer);

    app.update(key(KeyCode::Esc));
    assert!(!app.editor().editing());
    assert_eq!(app.editor().value(), "24:55");
    assert!(app.store().load_raw(SETTINGS_KEY).unwrap().is_none());
}

#[test]
fn test_task_input_and_list() {
    let mut app = app();
    app.update(key(KeyCode::Tab));
    assert_eq!(app.tab(), Tab::Tasks);
    assert!(app.view().contains(crate::tasks::EMPTY_PLACEHOLDER));

    add_task(&mut app, "   ");
    assert!(app.tasks().is_empty());

    add_task(&mut app, "first");
    add_task(&mut app, "second");
    assert_eq!(app.draft(), "");
    assert_eq!(app.tasks().get(0).map(|t| t.text.as_str()), Some("second"));

    type_str(&mut app, "oops");
    app.update(key(KeyCode::Backspace));
    assert_eq!(app.draft(), "oop");

    app.update(key(KeyCode::Down));
    assert_eq!(app.task_cursor(), Some(0));
    app.update(key(KeyCode::Down));
    app.update(key(KeyCode::Down));
    assert_eq!(app.task_cursor(), Some(1));

    press(&mut app, ' ');
    assert!(app.tasks().get(1).is_some_and(|t| t.done));
    assert_eq!(app.draft(), "oop");

    press(&mut app, 'd');
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.task_cursor(), Some(0));

    let stored: TaskList = load(app.store(), TASKS_KEY).unwrap().unwrap();
    assert_eq!(stored, app.tasks().clone());

    app.update(key(KeyCode::Up));
    assert_eq!(app.task_cursor(), None);
}

#[test]
fn test_history_clear_needs_confirmation() {
    let mut app = app();
    press(&mut app, 's');
    advance(&mut app, 1_500_000);
    assert_eq!(app.sessions().len(), 1);

    app.update(Box::new(KeyMsg {
        key: KeyCode::BackTab,
        modifiers: KeyModifiers::SHIFT,
    }));
    assert_eq!(app.tab(), Tab::History);

    press(&mut app, 'c');
    assert!(app.confirming_clear());
    assert!(app.view().contains("Press y to confirm"));
    press(&mut app, 'n');
    assert!(!app.confirming_clear());
    assert_eq!(app.sessions().len(), 1);

    press(&mut app, 'c');
    press(&mut app, 'y');
    assert!(app.sessions().is_empty());
    let stored: SessionLog = load(app.store(), SESSIONS_KEY).unwrap().unwrap();
    assert!(stored.is_empty());

    press(&mut app, 'c');
    assert!(!app.confirming_clear());
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app();
    let cmd = app.update(Box::new(KeyMsg {
        key: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
    }));
    assert!(cmd.is_some());

    press(&mut app, 'e');
    let cmd = app.update(Box::new(KeyMsg {
        key: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
    }));
    assert!(cmd.is_some());
}

#[test]
fn test_help_follows_tab_and_editor() {
    let mut app = app();
    assert!(app.help_view().contains("s start"));
    press(&mut app, 'e');
    assert!(app.help_view().contains("enter set"));
    app.update(key(KeyCode::Esc));
    app.update(key(KeyCode::Tab));
    assert!(app.help_view().contains("enter add task"));
}

#[test]
fn test_view_shows_countdown_and_tabs() {
    let app = app();
    let view = app.view();
    assert!(view.contains("25:00"));
    assert!(view.contains("Timer"));
    assert!(view.contains("History"));
    assert!(view.contains("25 min session"));
}
