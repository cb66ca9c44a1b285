use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::{AppTab, ContentItem};
use crate::shell::Shell;
use crate::state::{Action, ToastKind};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Terminal-side state around the [`Shell`]: cursor, input mode, spinner.
pub struct DashboardApp {
    pub shell: Shell,
    pub selected: usize,
    pub hook_cursor: usize,
    pub mode: InputMode,
    pub should_quit: bool,
    pub spinner: usize,
    /// Rows shown on the settings tab.
    pub settings: Vec<(String, String)>,
}

impl DashboardApp {
    pub fn new(shell: Shell, settings: Vec<(String, String)>) -> Self {
        Self {
            shell,
            selected: 0,
            hook_cursor: 0,
            mode: InputMode::Normal,
            should_quit: false,
            spinner: 0,
            settings,
        }
    }

    pub fn selected_feed_item(&self) -> Option<&ContentItem> {
        self.shell.state().visible_feed().get(self.selected).copied()
    }

    pub fn selected_saved_item(&self) -> Option<&ContentItem> {
        self.shell.state().filtered_saved().get(self.selected).copied()
    }

    fn list_len(&self) -> usize {
        let state = self.shell.state();
        match state.active_tab {
            AppTab::Feed => state.visible_feed().len(),
            AppTab::Saved => state.filtered_saved().len(),
            AppTab::Settings => 0,
        }
    }

    /// Keeps the cursors inside the current list after anything changed it.
    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        let hooks = self
            .selected_saved_item()
            .and_then(|i| i.hooks.as_ref())
            .map_or(0, |h| h.len());
        if self.hook_cursor >= hooks {
            self.hook_cursor = 0;
        }
    }

    fn select_tab(&mut self, tab: AppTab) {
        self.shell.dispatch(Action::SelectTab(tab));
        self.selected = 0;
        self.hook_cursor = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            InputMode::Search => self.handle_search_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code),
        }
        self.clamp_selection();
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let mut query = self.shell.state().search_query.clone();
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = InputMode::Normal;
                return;
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) => query.push(c),
            _ => return,
        }
        self.shell.dispatch(Action::SearchChanged(query));
        self.selected = 0;
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        let tab = self.shell.state().active_tab;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.select_tab(AppTab::Feed),
            KeyCode::Char('2') => self.select_tab(AppTab::Saved),
            KeyCode::Char('3') => self.select_tab(AppTab::Settings),
            KeyCode::Tab => {
                let next = match tab {
                    AppTab::Feed => AppTab::Saved,
                    AppTab::Saved => AppTab::Settings,
                    AppTab::Settings => AppTab::Feed,
                };
                self.select_tab(next);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.list_len() {
                    self.selected += 1;
                    self.hook_cursor = 0;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                self.hook_cursor = 0;
            }
            KeyCode::Char('/') => {
                if tab != AppTab::Saved {
                    self.select_tab(AppTab::Saved);
                }
                self.mode = InputMode::Search;
            }
            KeyCode::Char('r') if tab == AppTab::Feed => {
                if !self.shell.state().is_loading {
                    self.shell.scrape();
                }
            }
            KeyCode::Char('f') if tab == AppTab::Feed => {
                self.shell.dispatch(Action::CycleSourceFilter);
                self.selected = 0;
            }
            KeyCode::Char('s') | KeyCode::Enter if tab == AppTab::Feed => {
                if let Some(item) = self.selected_feed_item().cloned() {
                    self.shell.save(item);
                }
            }
            KeyCode::Char('d') if tab == AppTab::Saved => {
                if let Some(id) = self.selected_saved_item().map(|i| i.id.clone()) {
                    self.shell.delete(id);
                }
            }
            KeyCode::Char('g') if tab == AppTab::Saved => {
                if let Some(item) = self.selected_saved_item() {
                    if !item.generating_hooks() {
                        let id = item.id.clone();
                        self.shell.generate_hooks(id);
                    }
                }
            }
            KeyCode::Char('n') if tab == AppTab::Saved => {
                let count = self
                    .selected_saved_item()
                    .and_then(|i| i.hooks.as_ref())
                    .map_or(0, |h| h.len());
                if count > 0 {
                    self.hook_cursor = (self.hook_cursor + 1) % count;
                }
            }
            KeyCode::Char('c') if tab == AppTab::Saved => self.copy_selected_hook(),
            _ => {}
        }
    }

    fn copy_selected_hook(&mut self) {
        let Some(text) = self
            .selected_saved_item()
            .and_then(|i| i.hooks.as_ref())
            .and_then(|h| h.get(self.hook_cursor))
            .map(|h| h.text.clone())
        else {
            return;
        };

        let (message, kind) = match copy_to_clipboard(&text) {
            Ok(path) => (format!("Copied to {}", path.display()), ToastKind::Success),
            Err(e) => {
                tracing::warn!("Copy failed: {:#}", e);
                ("Failed to copy hook".to_string(), ToastKind::Error)
            }
        };
        self.shell.dispatch(Action::ShowToast { message, kind });
    }
}

/// Writes `text` to a well-known temp file that editor integrations can pick up.
pub fn copy_to_clipboard(text: &str) -> Result<PathBuf> {
    let path = clipboard_path();
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write clipboard file {}", path.display()))?;
    Ok(path)
}

pub fn clipboard_path() -> PathBuf {
    std::env::temp_dir().join("hookboard_clipboard.txt")
}

enum Wake {
    Input(Event),
    Applied(Action),
    Tick,
    Closed,
}

/// Runs the dashboard until the user quits. Restores the terminal on every exit path.
pub async fn run_dashboard(app: &mut DashboardApp) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(120));

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let wake = tokio::select! {
            ev = events.next() => match ev {
                Some(Ok(ev)) => Wake::Input(ev),
                Some(Err(e)) => return Err(e.into()),
                None => Wake::Closed,
            },
            action = app.shell.recv() => match action {
                Some(action) => Wake::Applied(action),
                None => Wake::Closed,
            },
            _ = tick.tick() => Wake::Tick,
        };

        match wake {
            Wake::Input(Event::Key(key)) => app.handle_key(key),
            Wake::Input(_) => {}
            Wake::Applied(action) => {
                app.shell.dispatch(action);
                app.clamp_selection();
            }
            Wake::Tick => app.spinner = app.spinner.wrapping_add(1),
            Wake::Closed => break,
        }
    }

    Ok(())
}
