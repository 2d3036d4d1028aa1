use ratatui::prelude::*;
use ratatui::widgets::*;
use venuex_core::{Message, EXAMPLE_QUERIES};

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::views::venues::card_lines;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let show_examples = app.session.show_examples();
    let busy = app.session.is_busy();

    let mut constraints = vec![Constraint::Min(0)];
    if show_examples {
        constraints.push(Constraint::Length(EXAMPLE_QUERIES.len() as u16 + 2));
    }
    if busy {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    render_transcript(f, app, chunks[next]);
    next += 1;

    if show_examples {
        render_examples(f, app, chunks[next]);
        next += 1;
    }
    if busy {
        render_loading(f, app, chunks[next]);
        next += 1;
    }
    render_input(f, app, chunks[next]);
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let lines = transcript_lines(app, theme);

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum();
    let bottom = total.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(app.chat_scroll as usize);

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " Sports Venue Assistant ",
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(Line::from(Span::styled(
                    " PgUp/PgDn: Scroll  j/k: Select venue  o: Open  d: Venue page ",
                    Style::default().fg(theme.muted),
                ))),
        );
    f.render_widget(transcript, area);
}

fn transcript_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    let transcript = app.session.transcript();
    let active = transcript.iter().rposition(Message::has_venues);
    let selectable = !app.session.show_examples();

    let mut lines = Vec::new();
    for (i, message) in transcript.iter().enumerate() {
        let name_color = if message.is_user() {
            theme.info
        } else {
            theme.accent
        };
        lines.push(Line::from(vec![
            Span::styled(
                message.sender().display_name(),
                Style::default().fg(name_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.time_label()),
                Style::default().fg(theme.muted),
            ),
        ]));

        for text in message.text().lines() {
            lines.push(emphasis_line(text, theme));
        }

        if message.has_venues() {
            let is_active = selectable && active == Some(i);
            for (j, venue) in message.venues().iter().enumerate() {
                lines.push(Line::from(""));
                lines.extend(card_lines(
                    venue,
                    theme,
                    is_active && j == app.selected_index,
                ));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Renders `**bold**` runs; everything else is plain text.
fn emphasis_line(text: &str, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = text
        .split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            let style = if i % 2 == 1 {
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            Span::styled(part.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

fn render_examples(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let choosing = app.input_mode == InputMode::Normal;

    let items: Vec<ListItem> = EXAMPLE_QUERIES
        .iter()
        .enumerate()
        .map(|(i, example)| {
            let selected = choosing && i == app.selected_index;
            let prefix = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(theme.accent)),
                Span::styled(format!("{:<24}", example.description), style),
                Span::styled(
                    format!("\"{}\"", example.text),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                " Try an example (Esc, then j/k + Enter) ",
                Style::default().fg(theme.accent),
            )),
    );
    f.render_widget(list, area);
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let label = app.session.loading_label().unwrap_or_default();
    let loading = Paragraph::new(Line::from(Span::styled(
        format!(" {}", label),
        Style::default()
            .fg(theme.warning)
            .add_modifier(Modifier::ITALIC),
    )));
    f.render_widget(loading, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let editing = app.input_mode == InputMode::Editing;
    let busy = app.session.is_busy();

    let (title, border) = if busy {
        (" Waiting for the assistant... ", theme.muted)
    } else if editing {
        (" Ask about venues (Enter to send) ", theme.accent)
    } else {
        (" Press i to type ", theme.border)
    };

    let text = if app.session.input().is_empty() && !editing {
        Span::styled(
            "Ask me to find sports venues...",
            Style::default().fg(theme.muted),
        )
    } else {
        Span::styled(app.session.input().to_string(), Style::default().fg(theme.fg))
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(border))),
    );
    f.render_widget(input, area);

    if editing && !busy {
        let width = Line::from(app.session.input()).width() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::THEMES;

    #[test]
    fn test_emphasis_line_bolds_marked_runs() {
        let line = emphasis_line("Found **3** venues for you.", &THEMES[0]);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "3");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(!line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_emphasis_line_plain_text() {
        let line = emphasis_line("Request processed successfully.", &THEMES[0]);
        assert_eq!(line.spans.len(), 1);
    }
}
