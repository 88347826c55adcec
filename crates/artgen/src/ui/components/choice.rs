//! Selector, checkbox, and button widgets for the main form.

use std::fmt::Display;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Step through `options` from `current`, wrapping at both ends.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let Some(position) = options.iter().position(|option| *option == current) else {
        return options.first().copied().unwrap_or(current);
    };
    let len = options.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    options[next]
}

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    })
}

/// Single-choice selector showing every option with the active one highlighted.
#[derive(Debug, Default)]
pub struct Select;

impl Select {
    pub fn render<T: Copy + PartialEq + Display>(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: &str,
        options: &[T],
        current: T,
        focused: bool,
    ) {
        let block = Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let mut spans = vec![Span::styled("◀ ", Style::default().fg(Color::DarkGray))];
        for (idx, option) in options.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if *option == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {option} "), style));
        }
        spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

/// One-line checkbox.
#[derive(Debug, Default)]
pub struct Checkbox;

impl Checkbox {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, label: &str, checked: bool, focused: bool) {
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Line::from(vec![
            Span::styled(mark, style),
            Span::raw(" "),
            Span::styled(label.to_owned(), style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Bordered push button.
#[derive(Debug, Default)]
pub struct Button;

impl Button {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, label: &str, focused: bool) {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let paragraph = Paragraph::new(Line::styled(label.to_owned(), style))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::domain::model::{HostChoice, OsChoice};

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(cycle(&OsChoice::ALL, OsChoice::All, true), OsChoice::Linux);
        assert_eq!(cycle(&OsChoice::ALL, OsChoice::Linux, false), OsChoice::All);
        assert_eq!(
            cycle(&HostChoice::ALL, HostChoice::All, true),
            HostChoice::Workstations
        );
    }

    #[test]
    fn select_renders_every_option() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                Select.render(frame, area, "Hosts", &HostChoice::ALL, HostChoice::Servers, true);
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("workstations"));
        assert!(rendered.contains("servers"));
    }
}
