//! Live preview of the document that Generate would write.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Ratatui component displaying the rendered playbook with line numbers.
#[derive(Debug, Default)]
pub struct Preview;

impl Preview {
    pub fn render(&self, document: Result<&str, &str>, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Preview")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let document = match document {
            Ok(document) => document,
            Err(message) => {
                Paragraph::new(message)
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
                return;
            }
        };

        let lines: Vec<Line<'_>> = document
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                let mut spans = vec![Span::styled(
                    format!("{:>3} │ ", idx + 1),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(highlight_line(line));
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Color comments, keys, and list items in a YAML line.
fn highlight_line(line: &str) -> Vec<Span<'_>> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed == "---" {
        return vec![Span::styled(line, Style::default().fg(Color::DarkGray))];
    }

    let (indent, rest) = line.split_at(line.len() - trimmed.len());
    let (marker, rest) = match rest.strip_prefix("- ") {
        Some(stripped) => ("- ", stripped),
        None if rest == "-" => ("-", ""),
        None => ("", rest),
    };

    let mut spans = vec![Span::raw(indent)];
    if !marker.is_empty() {
        spans.push(Span::styled(marker, Style::default().fg(Color::Yellow)));
    }
    match rest.split_once(':') {
        Some((key, value)) if !key.contains(' ') && !key.starts_with('\'') => {
            spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(":"));
            spans.push(Span::styled(value, Style::default().fg(Color::Green)));
        }
        _ => spans.push(Span::styled(rest, Style::default().fg(Color::Green))),
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|span| span.content.to_string()).collect()
    }

    #[test]
    fn splits_keys_from_values() {
        let spans = highlight_line("    name: art-execution-role");
        assert_eq!(texts(&spans), ["    ", "name", ":", " art-execution-role"]);
    }

    #[test]
    fn marks_sequence_items() {
        let spans = highlight_line("  - T1059");
        assert_eq!(texts(&spans), ["  ", "- ", "T1059"]);
    }

    #[test]
    fn comments_are_a_single_span() {
        assert_eq!(highlight_line("# lab run").len(), 1);
    }

    #[test]
    fn renders_error_message() {
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        Preview.render(Err("failed to serialize"), area, &mut buf);
        let rendered: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("failed to serialize"));
    }
}
