//! Tests for the duration editor.

use super::*;
use crate::timer::{Engine, ManualScheduler, TimerState, MAX_SECONDS, MIN_SECONDS};
use crate::Component;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

fn engine(seconds: f64) -> Engine<ManualScheduler> {
    Engine::new(seconds, ManualScheduler::new())
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers,
    })
}

fn type_str(editor: &mut Model, timer: &mut Engine<ManualScheduler>, s: &str) {
    for c in s.chars() {
        editor.update(key(KeyCode::Char(c)), timer);
    }
}

#[test]
fn test_new_shows_duration() {
    let editor = new(1500);
    assert_eq!(editor.value(), "25:00");
    assert!(!editor.editing());
    assert!(!editor.focused());
    assert_eq!(editor.last_committed(), 1500);
}

#[test]
fn test_begin_edit_selects_everything() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    assert!(editor.editing());
    assert_eq!(editor.selection(), SelectionRange::all());
    assert_eq!(editor.debug_view(), "[25:00]");
}

#[test]
fn test_begin_edit_pauses_running_timer() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(60_000);
    let mut editor = new(1500);
    editor.show_remaining(timer.remaining_seconds());
    editor.begin_edit(&mut timer);
    assert_eq!(timer.state(), TimerState::Paused);
    assert_eq!(editor.value(), "24:00");
}

#[test]
fn test_type_over_selection_and_commit() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    type_str(&mut editor, &mut timer, "1205");
    assert_eq!(editor.value(), "12:05");

    editor.update(key(KeyCode::Enter), &mut timer);
    assert!(!editor.editing());
    assert_eq!(
        editor.take_finished(),
        Some(EditEnd::Committed(CommitOutcome::Updated(725)))
    );
    assert_eq!(timer.total_seconds(), 725);
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.remaining_seconds(), 725.0);
    assert_eq!(editor.last_committed(), 725);
}

#[test]
fn test_paste_message_is_sanitized() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.update(PasteMsg("ab1:2cd".to_string()).into(), &mut timer);
    assert_eq!(editor.value(), "12:00");
    assert_eq!(editor.position(), 3);
}

#[test]
fn test_paste_key_returns_clipboard_command() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    let cmd = editor.update(
        key_with(KeyCode::Char('v'), KeyModifiers::CONTROL),
        &mut timer,
    );
    assert!(cmd.is_some());
    assert_eq!(editor.value(), "25:00");
}

#[test]
fn test_paste_error_is_recorded() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.update(PasteErrMsg("no clipboard".to_string()).into(), &mut timer);
    assert_eq!(editor.err.as_deref(), Some("no clipboard"));
    assert_eq!(editor.value(), "25:00");
}

#[test]
fn test_commit_clamps_short_duration() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.insert_digits("0005");
    assert_eq!(editor.value(), "00:05");
    let outcome = editor.commit(&mut timer);
    assert_eq!(outcome, CommitOutcome::Updated(MIN_SECONDS));
    assert_eq!(timer.total_seconds(), MIN_SECONDS);
    assert_eq!(editor.value(), "00:30");
}

#[test]
fn test_commit_clamps_long_duration() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.insert_digits("9959");
    assert_eq!(editor.commit(&mut timer), CommitOutcome::Updated(5400));
    assert_eq!(editor.value(), "90:00");
}

#[test]
fn test_escape_restores_backup() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(12_345);
    let mut editor = new(1500);
    editor.show_remaining(timer.remaining_seconds());
    let before = editor.value();

    editor.begin_edit(&mut timer);
    type_str(&mut editor, &mut timer, "0130");
    assert_ne!(editor.value(), before);
    editor.update(key(KeyCode::Esc), &mut timer);

    assert_eq!(editor.value(), before);
    assert!(!editor.editing());
    assert_eq!(editor.take_finished(), Some(EditEnd::Cancelled));
    assert_eq!(timer.total_ms(), 1_500_000);
}

#[test]
fn test_unchanged_commit_discards_paused_session() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(30_000);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.insert_digits("2500");
    assert_eq!(editor.commit(&mut timer), CommitOutcome::Discarded);
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.remaining_seconds(), 1500.0);
}

#[test]
fn test_unchanged_commit_when_idle() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    assert_eq!(editor.commit(&mut timer), CommitOutcome::Unchanged);
    assert_eq!(editor.value(), "25:00");
}

#[test]
fn test_invalid_commit_reverts_and_resets() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(5_000);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.set_value("");
    assert_eq!(editor.commit(&mut timer), CommitOutcome::Invalid);
    assert_eq!(editor.value(), "25:00");
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.total_seconds(), 1500);
    assert!(editor.take_finished().is_some());
}

#[test]
fn test_backspace_and_delete_keys() {
    let mut timer = engine(1500.0);
    let mut editor = new(1234);
    editor.set_value("12:34");
    editor.begin_edit(&mut timer);

    editor.update(key(KeyCode::End), &mut timer);
    editor.update(key(KeyCode::Backspace), &mut timer);
    assert_eq!(editor.value(), "12:30");
    assert_eq!(editor.position(), 4);

    editor.update(key(KeyCode::Home), &mut timer);
    editor.update(key(KeyCode::Delete), &mut timer);
    assert_eq!(editor.value(), "23:00");
    assert_eq!(editor.position(), 0);

    editor.update(key(KeyCode::Backspace), &mut timer);
    assert_eq!(editor.value(), "23:00");
}

#[test]
fn test_arrow_keys_collapse_and_move() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);

    editor.update(key(KeyCode::Left), &mut timer);
    assert_eq!(editor.selection(), SelectionRange::caret(0));

    editor.update(key(KeyCode::Right), &mut timer);
    editor.update(key(KeyCode::Right), &mut timer);
    editor.update(key(KeyCode::Right), &mut timer);
    assert_eq!(editor.position(), 3);
    assert_eq!(editor.debug_view(), "25:[]00");

    type_str(&mut editor, &mut timer, "4");
    assert_eq!(editor.value(), "25:40");
}

#[test]
fn test_shift_selection_and_delete() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.set_value("12:34");
    editor.begin_edit(&mut timer);
    editor.update(key(KeyCode::Home), &mut timer);
    editor.update(key(KeyCode::Right), &mut timer);
    for _ in 0..3 {
        editor.update(key_with(KeyCode::Right, KeyModifiers::SHIFT), &mut timer);
    }
    assert_eq!(editor.selection(), SelectionRange::new(1, 4));
    assert_eq!(editor.debug_view(), "1[2:3]4");

    editor.update(key(KeyCode::Delete), &mut timer);
    assert_eq!(editor.value(), "14:00");
    assert_eq!(editor.position(), 1);
}

#[test]
fn test_select_all_key() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.update(key(KeyCode::End), &mut timer);
    editor.update(
        key_with(KeyCode::Char('a'), KeyModifiers::CONTROL),
        &mut timer,
    );
    assert_eq!(editor.selection(), SelectionRange::all());
}

#[test]
fn test_non_digit_keys_are_suppressed() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    type_str(&mut editor, &mut timer, "ab-: ");
    assert_eq!(editor.value(), "25:00");
    assert_eq!(editor.selection(), SelectionRange::all());
}

#[test]
fn test_colon_filter() {
    let mut editor = new(1500);
    assert!(!editor.accepts_char(':'));
    editor.set_value("12");
    assert!(editor.accepts_char(':'));
    editor.set_value("");
    assert!(!editor.accepts_char(':'));
    assert!(editor.accepts_char('7'));
    assert!(!editor.accepts_char('x'));
}

#[test]
fn test_cut_deletes_selection() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.set_value("12:34");
    editor.begin_edit(&mut timer);
    editor.set_selection(0, 2);
    editor.update(
        key_with(KeyCode::Char('x'), KeyModifiers::CONTROL),
        &mut timer,
    );
    assert_eq!(editor.value(), "34:00");
    assert_eq!(editor.position(), 0);
}

#[test]
fn test_cut_with_collapsed_selection_is_noop() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.set_selection(2, 2);
    editor.cut();
    assert_eq!(editor.value(), "25:00");
}

#[test]
fn test_keys_ignored_when_not_editing() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    let cmd = editor.update(key(KeyCode::Char('9')), &mut timer);
    assert!(cmd.is_none());
    assert_eq!(editor.value(), "25:00");
    editor.insert_digits("99");
    assert_eq!(editor.value(), "25:00");
}

#[test]
fn test_show_remaining_ignored_while_editing() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.show_remaining(10.0);
    assert_eq!(editor.value(), "25:00");
    editor.cancel();
    editor.show_remaining(10.0);
    assert_eq!(editor.value(), "00:10");
}

#[test]
fn test_component_focus_and_blur() {
    let mut editor = new(1500);
    let cmd = Component::focus(&mut editor);
    assert!(cmd.is_none());
    assert!(editor.focused());
    editor.insert_digits("3");
    Component::blur(&mut editor);
    assert!(!editor.focused());
    assert_eq!(editor.value(), "25:00");
    assert!(editor.has_pending_commit());
    assert!(editor.take_finished().is_none());

    let mut timer = engine(1500.0);
    assert_eq!(
        editor.commit_pending(&mut timer),
        Some(CommitOutcome::Updated(1800))
    );
    assert_eq!(editor.value(), "30:00");
    assert!(!editor.has_pending_commit());
    assert_eq!(editor.commit_pending(&mut timer), None);
}

#[test]
fn test_blur_over_paused_session_commits_through_host() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(60_000);
    let mut editor = new(1500);
    editor.show_remaining(timer.remaining_seconds());
    editor.begin_edit(&mut timer);
    editor.insert_digits("1205");
    Component::blur(&mut editor);

    assert_eq!(editor.value(), "24:00");
    assert_eq!(timer.state(), TimerState::Paused);

    assert_eq!(
        editor.commit_pending(&mut timer),
        Some(CommitOutcome::Updated(725))
    );
    assert_eq!(editor.value(), "12:05");
    assert_eq!(timer.total_seconds(), 725);
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(
        editor.take_finished(),
        Some(EditEnd::Committed(CommitOutcome::Updated(725)))
    );
}

#[test]
fn test_focus_drops_pending_commit() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.insert_digits("1205");
    Component::blur(&mut editor);
    editor.begin_edit(&mut timer);
    assert!(!editor.has_pending_commit());
    assert_eq!(editor.value(), "25:00");

    editor.cancel();
    assert_eq!(timer.total_seconds(), 1500);
    assert_eq!(editor.take_finished(), Some(EditEnd::Cancelled));
}

#[test]
fn test_commit_outside_edit_leaves_timer_alone() {
    let mut timer = engine(1500.0);
    timer.start();
    timer.advance(60_000);
    let mut editor = new(1500);
    editor.show_remaining(timer.remaining_seconds());

    assert_eq!(editor.commit(&mut timer), CommitOutcome::Unchanged);
    assert_eq!(timer.state(), TimerState::Running);
    assert_eq!(timer.total_seconds(), 1500);
    assert_eq!(editor.value(), "24:00");
    assert!(editor.take_finished().is_none());
}

#[test]
fn test_oversized_text_commits_maximum() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    editor.begin_edit(&mut timer);
    editor.set_value("99999999999999999999999");
    assert_eq!(editor.commit(&mut timer), CommitOutcome::Updated(MAX_SECONDS));
    assert_eq!(editor.value(), "90:00");
    assert_eq!(timer.total_seconds(), MAX_SECONDS);
}

#[test]
fn test_new_clamps_duration() {
    assert_eq!(new(6000).value(), "90:00");
    assert_eq!(new(6000).last_committed(), MAX_SECONDS);
    assert_eq!(new(5).value(), "00:30");
}

#[test]
fn test_view_contains_text() {
    let mut timer = engine(1500.0);
    let mut editor = new(1500);
    assert!(editor.view().contains("25:00"));
    editor.begin_edit(&mut timer);
    assert!(editor.view().contains('5'));
}
