//! Terminal UI
//!
//! One loop owns the [`App`]: it draws, applies messages coming back from
//! finished commands, and turns key presses into messages. Commands run as
//! spawned tasks and report back through a channel, so several reads can be
//! in flight at once.

pub mod keys;
pub mod view;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use call_client::{CallCenterApi, HttpClient};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tui_input::Input;
use tui_logger::TuiWidgetState;

use crate::app::{App, AppCommand, AppMsg, PageState, View};
use crate::pages::{Effect, Page};

/// Which list of the user page receives cursor keys
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Calls,
    Tasks,
}

/// Cursor positions and the text field being edited
#[derive(Default)]
pub struct Controls {
    pub focus: Focus,
    pub call_cursor: usize,
    pub task_cursor: usize,
    /// Admin tag list, or the tag picker of the user page
    pub tag_cursor: usize,
    /// Admin page: the new-tag field has the keyboard
    pub editing_new_tag: bool,
    pub input: Input,
}

/// Everything the terminal needs besides the page state
pub struct Ui {
    pub app: App,
    /// Shown in the header
    pub backend: String,
    pub controls: Controls,
    pub logger_state: TuiWidgetState,
    pub quit: bool,
}

impl Ui {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            app: App::new(),
            backend: backend.into(),
            controls: Controls::default(),
            logger_state: TuiWidgetState::new(),
            quit: false,
        }
    }

    /// Keep cursors inside their lists and the text field equal to the
    /// draft it edits. Drafts may change underneath (cleared on success,
    /// frozen while loading).
    pub fn sync(&mut self) {
        let draft = keys::active_draft(self).map(str::to_string);
        if let Some(draft) = draft
            && draft != self.controls.input.value()
        {
            self.controls.input = Input::new(draft);
        }

        let (calls, tasks, tags) = match self.app.page() {
            PageState::User(user) => (user.calls.len(), user.tasks.len(), user.tags.len()),
            PageState::Admin(admin) => (0, 0, admin.tags.len()),
        };
        let controls = &mut self.controls;
        controls.call_cursor = controls.call_cursor.min(calls.saturating_sub(1));
        controls.task_cursor = controls.task_cursor.min(tasks.saturating_sub(1));
        controls.tag_cursor = controls.tag_cursor.min(tags.saturating_sub(1));
    }

    /// Apply `msg` and hand back the commands it produced
    pub fn apply(&mut self, msg: AppMsg) -> Vec<AppCommand> {
        if matches!(msg, AppMsg::SwitchView(_)) {
            self.controls = Controls::default();
        }
        let commands = self.app.update(msg);
        self.sync();
        commands
    }
}

/// Take over the terminal and run until the user quits
pub async fn run<C>(api: CallCenterApi<C>, backend: String) -> io::Result<()>
where
    C: HttpClient + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, Arc::new(api), backend).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    api: Arc<CallCenterApi<C>>,
    backend: String,
) -> io::Result<()>
where
    C: HttpClient + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ui = Ui::new(backend);

    spawn_all(&api, &tx, ui.apply(AppMsg::SwitchView(View::default())));
    tracing::info!("Tab switches pages, r reloads, q quits");

    loop {
        while let Ok(msg) = rx.try_recv() {
            spawn_all(&api, &tx, ui.apply(msg));
        }

        terminal.draw(|frame| view::render(frame, &ui))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            for msg in keys::handle_key(&mut ui, key) {
                spawn_all(&api, &tx, ui.apply(msg));
            }
        }

        if ui.quit {
            return Ok(());
        }
    }
}

fn spawn_all<C>(
    api: &Arc<CallCenterApi<C>>,
    tx: &mpsc::UnboundedSender<AppMsg>,
    commands: Vec<AppCommand>,
) where
    C: HttpClient + 'static,
{
    for command in commands {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let msg = command.perform(&*api).await;
            // Receiver is gone only when the UI is shutting down
            let _ = tx.send(msg);
        });
    }
}
