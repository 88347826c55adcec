//! Editable text field backed by a `String` owned elsewhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Cursor position for a text field. The text itself lives in the form state.
#[derive(Debug, Default, Clone)]
pub struct TextInputState {
    /// Character offset, not byte offset.
    cursor: usize,
    multiline: bool,
}

impl TextInputState {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            cursor: 0,
            multiline: true,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Park the cursor after the last character.
    pub fn move_to_end(&mut self, buffer: &str) {
        self.cursor = buffer.chars().count();
    }

    /// Apply an editing key to `buffer`. Returns `false` when the key is not an edit.
    pub fn handle_key(&mut self, buffer: &mut String, key: KeyEvent) -> bool {
        self.cursor = self.cursor.min(buffer.chars().count());
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(buffer, ch);
            }
            KeyCode::Enter if self.multiline => self.insert(buffer, '\n'),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    buffer.remove(byte_index(buffer, self.cursor));
                }
            }
            KeyCode::Delete => {
                if self.cursor < buffer.chars().count() {
                    buffer.remove(byte_index(buffer, self.cursor));
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(buffer.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.move_to_end(buffer),
            _ => return false,
        }
        true
    }

    /// Clear the buffer and reset the cursor, returning the previous contents.
    pub fn take(&mut self, buffer: &mut String) -> String {
        self.cursor = 0;
        std::mem::take(buffer)
    }

    fn insert(&mut self, buffer: &mut String, ch: char) {
        buffer.insert(byte_index(buffer, self.cursor), ch);
        self.cursor += 1;
    }

    /// Line and column of the cursor within `buffer`.
    fn line_col(&self, buffer: &str) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in buffer.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

fn byte_index(buffer: &str, cursor: usize) -> usize {
    buffer
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(buffer.len())
}

/// Labels and contents for one rendered field.
#[derive(Debug, Clone, Copy)]
pub struct TextField<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub buffer: &'a str,
}

/// Renders a bordered text field with a placeholder.
#[derive(Debug, Default)]
pub struct TextInput;

impl TextInput {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        field: TextField<'_>,
        state: &TextInputState,
        focused: bool,
    ) {
        let TextField {
            title,
            placeholder,
            buffer,
        } = field;
        let block = Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (line, col) = state.line_col(buffer);
        let scroll = (line as u16).saturating_sub(inner.height.saturating_sub(1));

        let paragraph = if buffer.is_empty() {
            Paragraph::new(Line::styled(
                placeholder.to_owned(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let lines: Vec<Line<'_>> = buffer.split('\n').map(Line::raw).collect();
            Paragraph::new(lines).scroll((scroll, 0))
        };
        frame.render_widget(paragraph, inner);

        if focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (col as u16).min(inner.width - 1);
            let y = inner.y + (line as u16 - scroll).min(inner.height - 1);
            frame.set_cursor(x, y);
        }
    }
}
