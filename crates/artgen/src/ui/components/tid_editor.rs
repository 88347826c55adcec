//! The "ART TIDs" list editor pane.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::tid_list::{RowCommand, RowCommandKind, TidList, TidRow};
use crate::ui::components::text_input::{TextField, TextInput, TextInputState};

const INPUT_PLACEHOLDER: &str = "Enter ART TID Here:";

/// Which part of the editor receives keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    #[default]
    Input,
    Rows,
}

/// What a key press did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Added(String),
    Rejected,
    Applied(RowCommand),
    /// Boundary move or other command that left the list unchanged.
    Unchanged,
    /// Focus should return to the main form.
    Leave,
    Consumed,
    Ignored,
}

/// Input buffer and row/button cursor for the list editor.
#[derive(Debug, Default, Clone)]
pub struct TidEditorState {
    input: String,
    input_state: TextInputState,
    focus: EditorFocus,
    row: usize,
    button: usize,
}

impl TidEditorState {
    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_row(&self) -> Option<usize> {
        (self.focus == EditorFocus::Rows).then_some(self.row)
    }

    pub fn selected_button(&self) -> RowCommandKind {
        RowCommandKind::ALL[self.button.min(RowCommandKind::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, list: &mut TidList, key: KeyEvent) -> EditorOutcome {
        match self.focus {
            EditorFocus::Input => self.handle_input_key(list, key),
            EditorFocus::Rows => self.handle_row_key(list, key),
        }
    }

    fn handle_input_key(&mut self, list: &mut TidList, key: KeyEvent) -> EditorOutcome {
        match key.code {
            KeyCode::Esc => EditorOutcome::Leave,
            KeyCode::Enter => {
                let text = self.input_state.take(&mut self.input);
                if list.add(text) {
                    let added = list.entries().last().cloned().unwrap_or_default();
                    self.row = list.len() - 1;
                    EditorOutcome::Added(added)
                } else {
                    EditorOutcome::Rejected
                }
            }
            KeyCode::Down | KeyCode::Tab if !list.is_empty() => {
                self.focus = EditorFocus::Rows;
                self.row = self.row.min(list.len() - 1);
                EditorOutcome::Consumed
            }
            _ => {
                if self.input_state.handle_key(&mut self.input, key) {
                    EditorOutcome::Consumed
                } else {
                    EditorOutcome::Ignored
                }
            }
        }
    }

    fn handle_row_key(&mut self, list: &mut TidList, key: KeyEvent) -> EditorOutcome {
        if list.is_empty() {
            self.focus = EditorFocus::Input;
            return self.handle_input_key(list, key);
        }
        self.row = self.row.min(list.len() - 1);

        let shortcut = match key.code {
            KeyCode::Char('K') => Some(RowCommandKind::Up),
            KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => Some(RowCommandKind::Up),
            KeyCode::Char('J') => Some(RowCommandKind::Down),
            KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(RowCommandKind::Down)
            }
            KeyCode::Char('d') | KeyCode::Delete => Some(RowCommandKind::Delete),
            _ => None,
        };
        if let Some(kind) = shortcut {
            return self.press(list, kind);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = EditorFocus::Input;
                EditorOutcome::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.row == 0 {
                    self.focus = EditorFocus::Input;
                } else {
                    self.row -= 1;
                }
                EditorOutcome::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.row = (self.row + 1).min(list.len() - 1);
                EditorOutcome::Consumed
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.button = self.button.saturating_sub(1);
                EditorOutcome::Consumed
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.button = (self.button + 1).min(RowCommandKind::ALL.len() - 1);
                EditorOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let kind = self.selected_button();
                self.press(list, kind)
            }
            _ => EditorOutcome::Ignored,
        }
    }

    /// Press `kind` on the focused row. Rows are rebuilt from the list so the
    /// command always carries the row's current index.
    fn press(&mut self, list: &mut TidList, kind: RowCommandKind) -> EditorOutcome {
        let Some(command) = list.rows().get(self.row).map(|row| row.command(kind)) else {
            return EditorOutcome::Ignored;
        };
        match command.apply(list) {
            Some(index) => {
                self.row = index;
                if list.is_empty() {
                    self.focus = EditorFocus::Input;
                    self.row = 0;
                } else {
                    self.row = self.row.min(list.len() - 1);
                }
                EditorOutcome::Applied(command)
            }
            None => EditorOutcome::Unchanged,
        }
    }
}

/// Renders the list editor pane.
#[derive(Debug, Default)]
pub struct TidEditor;

impl TidEditor {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        list: &TidList,
        state: &TidEditorState,
        focused: bool,
    ) {
        let block = Block::default()
            .title(format!("ART TIDs ({})", list.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        TextInput.render(
            frame,
            layout[0],
            TextField {
                title: "Add (↵)",
                placeholder: INPUT_PLACEHOLDER,
                buffer: &state.input,
            },
            &state.input_state,
            focused && state.focus == EditorFocus::Input,
        );

        let rows = list.rows();
        if rows.is_empty() {
            let empty = Paragraph::new("No test IDs yet").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(empty, layout[1]);
            return;
        }

        let height = layout[1].height as usize;
        let selected = if focused { state.selected_row() } else { None };
        let offset = selected
            .map(|row| row.saturating_sub(height.saturating_sub(1)))
            .unwrap_or(0);
        let width = rows.iter().map(|row| row.entry.chars().count()).max().unwrap_or(0);

        let lines: Vec<Line<'_>> = rows
            .iter()
            .skip(offset)
            .take(height)
            .map(|row| row_line(row, width, selected, state.selected_button()))
            .collect();
        frame.render_widget(Paragraph::new(lines), layout[1]);
    }
}

fn row_line<'a>(
    row: &TidRow<'a>,
    width: usize,
    selected: Option<usize>,
    button: RowCommandKind,
) -> Line<'a> {
    let is_selected = selected == Some(row.index);
    let label_style = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::styled(format!("{:>3}. ", row.index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<width$}", row.entry), label_style),
    ];
    for command in row.commands {
        let style = if is_selected && command.kind() == button {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", command.kind().label()), style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_and_add(state: &mut TidEditorState, list: &mut TidList, text: &str) -> EditorOutcome {
        for ch in text.chars() {
            state.handle_key(list, key(KeyCode::Char(ch)));
        }
        state.handle_key(list, key(KeyCode::Enter))
    }

    #[test]
    fn enter_adds_input_and_clears_buffer() {
        let mut state = TidEditorState::default();
        let mut list = TidList::new();
        assert_eq!(
            type_and_add(&mut state, &mut list, "T1059"),
            EditorOutcome::Added("T1059".into())
        );
        assert!(state.input().is_empty());
        assert_eq!(list.entries(), ["T1059"]);
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut state = TidEditorState::default();
        let mut list = TidList::new();
        assert_eq!(type_and_add(&mut state, &mut list, "  "), EditorOutcome::Rejected);
        assert!(list.is_empty());
    }

    #[test]
    fn buttons_act_on_the_focused_row() {
        let mut state = TidEditorState::default();
        let mut list = TidList::new();
        for tid in ["T1", "T2", "T3"] {
            type_and_add(&mut state, &mut list, tid);
        }

        state.handle_key(&mut list, key(KeyCode::Down));
        assert_eq!(state.focus(), EditorFocus::Rows);
        state.handle_key(&mut list, key(KeyCode::Down));
        assert_eq!(state.selected_row(), Some(2));

        // Up button on "T3".
        let outcome = state.handle_key(&mut list, key(KeyCode::Enter));
        assert_eq!(outcome, EditorOutcome::Applied(RowCommand::bind(RowCommandKind::Up, 2)));
        assert_eq!(list.entries(), ["T1", "T3", "T2"]);
        assert_eq!(state.selected_row(), Some(1));

        // Delete button on the same entry, now at index 1.
        state.handle_key(&mut list, key(KeyCode::Right));
        state.handle_key(&mut list, key(KeyCode::Right));
        assert_eq!(state.selected_button(), RowCommandKind::Delete);
        state.handle_key(&mut list, key(KeyCode::Enter));
        assert_eq!(list.entries(), ["T1", "T2"]);
        assert_eq!(state.selected_row(), Some(1));
    }

    #[test]
    fn boundary_buttons_leave_list_unchanged() {
        let mut state = TidEditorState::default();
        let mut list = TidList::new();
        type_and_add(&mut state, &mut list, "T1");
        type_and_add(&mut state, &mut list, "T2");
        state.handle_key(&mut list, key(KeyCode::Tab));
        state.handle_key(&mut list, key(KeyCode::Up));
        state.handle_key(&mut list, key(KeyCode::Down));
        assert_eq!(state.selected_row(), Some(1));

        assert_eq!(
            state.handle_key(&mut list, key(KeyCode::Char('J'))),
            EditorOutcome::Unchanged
        );
        assert_eq!(list.entries(), ["T1", "T2"]);
    }

    #[test]
    fn deleting_last_entry_returns_focus_to_input() {
        let mut state = TidEditorState::default();
        let mut list = TidList::new();
        type_and_add(&mut state, &mut list, "T1");
        state.handle_key(&mut list, key(KeyCode::Down));
        state.handle_key(&mut list, key(KeyCode::Char('d')));
        assert!(list.is_empty());
        assert_eq!(state.focus(), EditorFocus::Input);
    }

    #[test]
    fn renders_rows_with_buttons() {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let list: TidList = ["T1059.001", "T1105"].into_iter().collect();
        let state = TidEditorState::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                TidEditor.render(frame, area, &list, &state, true);
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("ART TIDs (2)"));
        assert!(rendered.contains("T1059.001"));
        assert!(rendered.contains("[Delete]"));
    }
}
