//! The Focus Flow application model and its update loop.

use super::keymap::{default_key_map, KeyMap};
use crate::display::{window_title, Controls};
use crate::editor::{self, EditEnd, PasteErrMsg, PasteMsg};
use crate::history::SessionLog;
use crate::key::matches_binding;
use crate::storage::{
    load_or, load_settings, persist, JsonFileStore, Settings, Store, SESSIONS_KEY, SETTINGS_KEY,
    TASKS_KEY,
};
use crate::tasks::TaskList;
use crate::timer::{Engine, FrameMsg, Scheduler, TickEvent, TickScheduler, TimerEvent};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "FOCUS_FLOW_HOME";
/// Data directory used when [`HOME_ENV`] is not set.
pub const DEFAULT_HOME: &str = ".focus-flow";

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Countdown and its controls.
    Timer,
    /// Task list.
    Tasks,
    /// Completed sessions.
    History,
}

impl Tab {
    /// Every tab in display order.
    pub const ALL: [Tab; 3] = [Tab::Timer, Tab::Tasks, Tab::History];

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Timer => "Timer",
            Tab::Tasks => "Tasks",
            Tab::History => "History",
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Timer => Tab::Tasks,
            Tab::Tasks => Tab::History,
            Tab::History => Tab::Timer,
        }
    }

    fn prev(self) -> Self {
        match self {
            Tab::Timer => Tab::History,
            Tab::Tasks => Tab::Timer,
            Tab::History => Tab::Tasks,
        }
    }
}

/// Focus timer with tasks and session history.
///
/// Composes the countdown [`Engine`], the in-place duration editor, the task
/// list and the session log, and persists the latter two plus the settings
/// through a [`Store`]. Engine events are drained after every update.
pub struct FocusFlow<S: Scheduler = TickScheduler> {
    pub(super) engine: Engine<S>,
    pub(super) editor: editor::Model,
    pub(super) tasks: TaskList,
    pub(super) sessions: SessionLog,
    pub(super) settings: Settings,
    pub(super) store: Box<dyn Store + Send>,

    pub(super) tab: Tab,
    /// Text typed into the task input.
    pub(super) draft: String,
    /// Task under the list cursor; `None` while the input has focus.
    pub(super) task_cursor: Option<usize>,
    pub(super) confirm_clear: bool,

    pub(super) last_tick: TickEvent,
    pub(super) title: String,
    pub(super) controls: Controls,

    /// KeyMap encodes the application keybindings.
    pub key_map: KeyMap,
}

impl FocusFlow<TickScheduler> {
    /// Opens the application with a JSON store in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_store(Box::new(JsonFileStore::new(dir)))
    }

    /// Opens the application over an existing store.
    pub fn with_store(store: Box<dyn Store + Send>) -> Self {
        Self::with_scheduler(TickScheduler::new(), store)
    }
}

impl<S: Scheduler> FocusFlow<S> {
    /// Opens the application with a specific frame scheduler.
    pub fn with_scheduler(scheduler: S, mut store: Box<dyn Store + Send>) -> Self {
        let settings = load_settings(&mut *store);
        let tasks: TaskList = load_or(&*store, TASKS_KEY, TaskList::new());
        let sessions: SessionLog = load_or(&*store, SESSIONS_KEY, SessionLog::new());

        let engine = Engine::new(f64::from(settings.last_duration_seconds), scheduler);
        let editor = editor::new(engine.total_seconds());
        let last_tick = engine.snapshot();

        let mut app = Self {
            engine,
            editor,
            tasks,
            sessions,
            settings,
            store,
            tab: Tab::Timer,
            draft: String::new(),
            task_cursor: None,
            confirm_clear: false,
            title: window_title(&last_tick),
            controls: Controls::for_state(last_tick.state),
            last_tick,
            key_map: default_key_map(),
        };
        app.drain_events();
        app
    }

    /// The countdown engine.
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to drive a manual scheduler.
    ///
    /// Call [`FocusFlow::sync`] afterwards so the events are observed.
    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }

    /// The duration editor.
    pub fn editor(&self) -> &editor::Model {
        &self.editor
    }

    /// Mutable access to the editor, e.g. to blur it.
    ///
    /// Call [`FocusFlow::sync`] afterwards so a pending commit is applied.
    pub fn editor_mut(&mut self) -> &mut editor::Model {
        &mut self.editor
    }

    /// The task list.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// The session log.
    pub fn sessions(&self) -> &SessionLog {
        &self.sessions
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The tab on screen.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Text in the task input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Index of the selected task, if the list has focus.
    pub fn task_cursor(&self) -> Option<usize> {
        self.task_cursor
    }

    /// Whether a history clear is awaiting confirmation.
    pub fn confirming_clear(&self) -> bool {
        self.confirm_clear
    }

    /// Window title for the latest tick.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Available timer controls.
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// The latest tick.
    pub fn last_tick(&self) -> TickEvent {
        self.last_tick
    }

    /// The store backing the application.
    pub fn store(&self) -> &dyn Store {
        &*self.store
    }

    /// Processes a message and returns the next command for the runtime.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = self.route(msg);
        self.editor.commit_pending(&mut self.engine);
        self.drain_events();
        cmd.or_else(|| self.engine.take_cmd())
    }

    /// Observes engine events produced outside [`FocusFlow::update`], and
    /// commits an editor blurred through [`FocusFlow::editor_mut`].
    pub fn sync(&mut self) {
        self.editor.commit_pending(&mut self.engine);
        self.drain_events();
    }

    fn route(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<FrameMsg>().is_some() {
            return self.engine.update(msg);
        }
        if msg.downcast_ref::<PasteMsg>().is_some() || msg.downcast_ref::<PasteErrMsg>().is_some()
        {
            return self.editor.update(msg, &mut self.engine);
        }

        let wants_quit = msg
            .downcast_ref::<KeyMsg>()
            .is_some_and(|k| matches_binding(k, &self.key_map.quit));
        if wants_quit {
            return Some(quit());
        }
        if self.editor.editing() {
            return self.editor.update(msg, &mut self.engine);
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if matches_binding(key_msg, &self.key_map.next_tab) {
            self.switch_tab(self.tab.next());
            return None;
        }
        if matches_binding(key_msg, &self.key_map.prev_tab) {
            self.switch_tab(self.tab.prev());
            return None;
        }

        match self.tab {
            Tab::Timer => self.update_timer(key_msg),
            Tab::Tasks => self.update_tasks(key_msg),
            Tab::History => self.update_history(key_msg),
        }
        None
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.confirm_clear = false;
        self.task_cursor = None;
    }

    fn update_timer(&mut self, key_msg: &KeyMsg) {
        let k = &self.key_map;
        if matches_binding(key_msg, &k.start) {
            self.engine.start();
        } else if matches_binding(key_msg, &k.pause) {
            self.engine.pause();
        } else if matches_binding(key_msg, &k.resume) {
            self.engine.resume();
        } else if matches_binding(key_msg, &k.reset) {
            self.engine.reset();
        } else if matches_binding(key_msg, &k.edit) {
            self.editor.begin_edit(&mut self.engine);
        }
    }

    fn update_tasks(&mut self, key_msg: &KeyMsg) {
        match self.task_cursor {
            None => self.update_task_input(key_msg),
            Some(index) => self.update_task_list(key_msg, index),
        }
    }

    fn update_task_input(&mut self, key_msg: &KeyMsg) {
        if matches_binding(key_msg, &self.key_map.add_task) {
            if self.tasks.add(&self.draft).is_some() {
                self.draft.clear();
                persist(&mut *self.store, TASKS_KEY, &self.tasks);
            }
        } else if matches_binding(key_msg, &self.key_map.erase) {
            self.draft.pop();
        } else if matches_binding(key_msg, &self.key_map.down) {
            if !self.tasks.is_empty() {
                self.task_cursor = Some(0);
            }
        } else if let KeyCode::Char(c) = key_msg.key {
            if !key_msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.draft.push(c);
            }
        }
    }

    fn update_task_list(&mut self, key_msg: &KeyMsg, index: usize) {
        let Some(task) = self.tasks.get(index).cloned() else {
            self.task_cursor = None;
            return;
        };

        if matches_binding(key_msg, &self.key_map.up) {
            self.task_cursor = index.checked_sub(1);
        } else if matches_binding(key_msg, &self.key_map.down) {
            self.task_cursor = Some((index + 1).min(self.tasks.len() - 1));
        } else if matches_binding(key_msg, &self.key_map.leave_list) {
            self.task_cursor = None;
        } else if matches_binding(key_msg, &self.key_map.toggle_task) {
            self.tasks.toggle(&task.id, !task.done);
            persist(&mut *self.store, TASKS_KEY, &self.tasks);
        } else if matches_binding(key_msg, &self.key_map.remove_task) {
            self.tasks.remove(&task.id);
            persist(&mut *self.store, TASKS_KEY, &self.tasks);
            self.task_cursor = match self.tasks.len() {
                0 => None,
                len => Some(index.min(len - 1)),
            };
        }
    }

    fn update_history(&mut self, key_msg: &KeyMsg) {
        if self.confirm_clear {
            if matches_binding(key_msg, &self.key_map.confirm) {
                self.sessions.clear();
                persist(&mut *self.store, SESSIONS_KEY, &self.sessions);
            }
            self.confirm_clear = false;
        } else if matches_binding(key_msg, &self.key_map.clear_history) && !self.sessions.is_empty()
        {
            self.confirm_clear = true;
        }
    }

    fn drain_events(&mut self) {
        for event in self.engine.take_events() {
            match event {
                TimerEvent::Tick(tick) => {
                    self.editor.show_remaining(tick.remaining_seconds);
                    self.title = window_title(&tick);
                    self.last_tick = tick;
                }
                TimerEvent::StateChanged(state) => {
                    self.controls = Controls::for_state(state);
                }
                TimerEvent::Completed(record) => {
                    self.sessions.capture(&record, &self.tasks);
                    persist(&mut *self.store, SESSIONS_KEY, &self.sessions);
                }
            }
        }

        if let Some(EditEnd::Committed(outcome)) = self.editor.take_finished() {
            if let Some(seconds) = outcome.persisted_seconds() {
                self.settings = Settings::with_duration(seconds);
                persist(&mut *self.store, SETTINGS_KEY, &self.settings);
            }
        }
    }
}

/// Data directory from [`HOME_ENV`], or [`DEFAULT_HOME`].
pub fn default_home() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME))
}

impl BubbleTeaModel for FocusFlow {
    fn init() -> (Self, Option<Cmd>) {
        let dir = default_home();
        log::debug!("opening focus flow data in {}", dir.display());
        (FocusFlow::new(dir), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
