//! Application loop for the TUI.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tracing::{debug, info};

use crate::app::context::AppContext;
use crate::app::form::WindowState;
use crate::domain::model::{HostChoice, OsChoice};
use crate::ui::components::choice::{Button, Checkbox, Select, cycle};
use crate::ui::components::preview::Preview;
use crate::ui::components::text_input::{TextField, TextInput, TextInputState};
use crate::ui::components::tid_editor::{EditorOutcome, TidEditor, TidEditorState};

const TICK_RATE: Duration = Duration::from_millis(120);
const WINDOW_TITLE: &str = "ART: Ansible Playbook Generator";
const DESCRIPTION_PLACEHOLDER: &str = "Enter playbook description here...";

/// Primary entry point for running the interactive TUI.
pub struct UiApp {
    context: AppContext,
    filename_input: TextInputState,
    description_input: TextInputState,
    editor: TidEditorState,
    focus: FocusTarget,
    pane: Pane,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            filename_input: TextInputState::single_line(),
            description_input: TextInputState::multi_line(),
            editor: TidEditorState::default(),
            focus: FocusTarget::Filename,
            pane: Pane::Main,
            status: None,
            should_quit: false,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

        info!("form session started");
        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();
        info!("form session ended");

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev);
            }
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(12),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(size);

        let editor_open = self.editor_open();
        let columns = if editor_open {
            vec![
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ]
        } else {
            vec![Constraint::Percentage(45), Constraint::Percentage(55)]
        };
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(layout[0]);

        self.render_form(frame, body[0]);
        if editor_open {
            TidEditor.render(
                frame,
                body[1],
                self.context.form().identifiers(),
                &self.editor,
                self.pane == Pane::ListEditor,
            );
        }

        let preview = self.context.preview().map_err(|err| err.to_string());
        let preview_area = body[body.len() - 1];
        Preview.render(
            preview.as_deref().map_err(String::as_str),
            preview_area,
            frame.buffer_mut(),
        );

        self.render_hints(frame, layout[1]);
        self.render_status(frame, layout[2]);
    }

    fn render_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let main_focused = self.pane == Pane::Main;
        let block = Block::default()
            .title(WINDOW_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if main_focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(inner);

        let state = self.context.form().state();
        let focused = |target: FocusTarget| main_focused && self.focus == target;

        TextInput.render(
            frame,
            rows[0],
            TextField {
                title: "Filename",
                placeholder: self.context.filename_placeholder(),
                buffer: &state.filename,
            },
            &self.filename_input,
            focused(FocusTarget::Filename),
        );
        Select.render(
            frame,
            rows[1],
            "Operating system",
            &OsChoice::ALL,
            state.os,
            focused(FocusTarget::Os),
        );
        Select.render(
            frame,
            rows[2],
            "Hosts",
            &HostChoice::ALL,
            state.hosts,
            focused(FocusTarget::Hosts),
        );
        TextInput.render(
            frame,
            rows[3],
            TextField {
                title: "Description",
                placeholder: DESCRIPTION_PLACEHOLDER,
                buffer: &state.description,
            },
            &self.description_input,
            focused(FocusTarget::Description),
        );
        Checkbox.render(
            frame,
            rows[4],
            "ART Test",
            state.list_editor_open,
            focused(FocusTarget::ArtCheckbox),
        );
        Button.render(
            frame,
            rows[5],
            "Generate YAML",
            focused(FocusTarget::Generate),
        );
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
        let mut spans = vec![
            key("tab"),
            Span::raw(" next field · "),
            key("←/→"),
            Span::raw(" choose · "),
            key("ctrl+g"),
            Span::raw(" generate · "),
        ];
        if self.editor_open() {
            spans.extend([
                key("f2"),
                Span::raw(" switch pane · "),
                key("J/K/d"),
                Span::raw(" move/delete · "),
            ]);
        }
        spans.extend([key("ctrl+q"), Span::raw(" quit")]);
        let hints = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, area);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let message = self.status.as_ref().map(|status| {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(Color::Gray),
                StatusLevel::Success => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            };
            Line::styled(status.text.clone(), style)
        });

        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let line = message.unwrap_or_else(|| {
            Line::styled(
                "Ready · fill in the form and press ctrl+g",
                Style::default().fg(Color::DarkGray),
            )
        });
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Key(_) | Event::Resize(..) | Event::Mouse(_) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
    }

    /// Route a key press to the global shortcuts, then the focused pane.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('g') => {
                    self.generate();
                    return;
                }
                KeyCode::Char('t') => {
                    self.switch_pane();
                    return;
                }
                _ => {}
            }
        }
        if key.code == KeyCode::F(2) {
            self.switch_pane();
            return;
        }

        match self.pane {
            Pane::Main => self.handle_form_key(key),
            Pane::ListEditor => self.handle_editor_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return;
            }
            KeyCode::Esc if !self.focus.takes_text() => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.focus {
            FocusTarget::Filename => {
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                } else {
                    let state = self.context.form_mut().state_mut();
                    self.filename_input.handle_key(&mut state.filename, key);
                }
            }
            FocusTarget::Description => {
                let state = self.context.form_mut().state_mut();
                self.description_input
                    .handle_key(&mut state.description, key);
            }
            FocusTarget::Os => {
                if let Some(forward) = choice_direction(key) {
                    let state = self.context.form_mut().state_mut();
                    state.os = cycle(&OsChoice::ALL, state.os, forward);
                } else if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                }
            }
            FocusTarget::Hosts => {
                if let Some(forward) = choice_direction(key) {
                    let state = self.context.form_mut().state_mut();
                    state.hosts = cycle(&HostChoice::ALL, state.hosts, forward);
                } else if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                }
            }
            FocusTarget::ArtCheckbox => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.toggle_list_editor();
                }
            }
            FocusTarget::Generate => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.generate();
                }
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let list = self.context.form_mut().identifiers_mut();
        match self.editor.handle_key(list, key) {
            EditorOutcome::Added(entry) => {
                self.set_status(StatusLevel::Success, format!("Added {entry}"));
            }
            EditorOutcome::Rejected => {
                self.set_status(StatusLevel::Error, "Test ID cannot be blank");
            }
            EditorOutcome::Applied(command) => {
                debug!(?command, "row command applied");
            }
            EditorOutcome::Leave => self.pane = Pane::Main,
            EditorOutcome::Unchanged | EditorOutcome::Consumed | EditorOutcome::Ignored => {}
        }
    }

    fn toggle_list_editor(&mut self) {
        match self.context.form_mut().toggle_list_editor() {
            WindowState::MainWindowPlusListEditor => {
                self.pane = Pane::ListEditor;
            }
            WindowState::MainWindowOnly => {
                self.pane = Pane::Main;
                let kept = self.context.form().identifiers().len();
                self.set_status(
                    StatusLevel::Info,
                    format!("ART TIDs editor closed ({kept} kept)"),
                );
            }
        }
    }

    fn switch_pane(&mut self) {
        self.pane = match (self.pane, self.editor_open()) {
            (Pane::Main, true) => Pane::ListEditor,
            _ => Pane::Main,
        };
    }

    fn generate(&mut self) {
        match self.context.generate() {
            Ok(outcome) => self.set_status(
                StatusLevel::Success,
                format!(
                    "Wrote {} bytes to {}",
                    outcome.bytes,
                    outcome.path.display()
                ),
            ),
            Err(err) => self.set_status(StatusLevel::Error, err.to_string()),
        }
    }

    fn editor_open(&self) -> bool {
        self.context.form().window_state() == WindowState::MainWindowPlusListEditor
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }

    /// Latest status line text, if one is showing.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn choice_direction(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => Some(true),
        KeyCode::Left | KeyCode::Char('h') => Some(false),
        _ => None,
    }
}

/// Focusable widgets of the main form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Filename,
    Os,
    Hosts,
    Description,
    ArtCheckbox,
    Generate,
}

impl FocusTarget {
    fn takes_text(self) -> bool {
        matches!(self, FocusTarget::Filename | FocusTarget::Description)
    }

    const ORDER: [FocusTarget; 6] = [
        FocusTarget::Filename,
        FocusTarget::Os,
        FocusTarget::Hosts,
        FocusTarget::Description,
        FocusTarget::ArtCheckbox,
        FocusTarget::Generate,
    ];

    fn next(self) -> Self {
        cycle(&Self::ORDER, self, true)
    }

    fn previous(self) -> Self {
        cycle(&Self::ORDER, self, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Main,
    ListEditor,
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(6),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Success,
    Error,
}
