use ratatui::prelude::*;
use ratatui::widgets::*;
use venuex_core::{Agent, TaskStatus};

use crate::app::App;
use crate::theme::Theme;
use crate::views::agents::status_color;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    match app.detail_agent() {
        Ok(agent) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(0)])
                .split(area);
            render_header(f, app, &agent, chunks[0]);
            render_tasks(f, app, chunks[1]);
        }
        Err(_) => render_not_found(f, app, area),
    }
}

fn render_not_found(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Agent not found",
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The agent you're looking for doesn't exist.",
            Style::default().fg(theme.muted),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title_bottom(Line::from(Span::styled(
                " Esc: Back ",
                Style::default().fg(theme.muted),
            ))),
    );
    f.render_widget(paragraph, area);
}

fn label<'a>(name: &'a str, value: String, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("{}: ", name), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.fg)),
        Span::raw("   "),
    ]
}

fn render_header(f: &mut Frame, app: &App, agent: &Agent, area: Rect) {
    let theme = app.theme();

    let mut status_line = vec![
        Span::styled("Status: ", Style::default().fg(theme.muted)),
        Span::styled(
            format!("● {}", agent.status),
            Style::default().fg(status_color(agent.status, theme)),
        ),
        Span::raw("   "),
    ];
    status_line.extend(label("Integrations", agent.integrations_label(), theme));

    let mut dates_line = label("Created", agent.created.clone(), theme);
    dates_line.extend(label("Modified", agent.modified.clone(), theme));
    dates_line.extend(label("Last active", agent.last_active.clone(), theme));
    dates_line.extend(label("Runs", agent.runs.to_string(), theme));

    let text = vec![
        Line::from(Span::styled(
            agent.description.clone(),
            Style::default().fg(theme.fg),
        )),
        Line::from(""),
        Line::from(status_line),
        Line::from(dates_line),
    ];

    let header = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(Span::styled(
                format!(" {} ", agent.name),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(header, area);
}

fn render_tasks(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let color = match task.status {
                TaskStatus::Completed => theme.success,
                TaskStatus::Scheduled => theme.info,
                TaskStatus::Failed => theme.error,
            };
            let prefix = if i == app.selected_index { ">" } else { " " };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", prefix), Style::default().fg(theme.accent)),
                Span::styled(format!("{} ", task.status.icon()), Style::default().fg(color)),
                Span::styled(task.title.clone(), Style::default().fg(theme.fg)),
                Span::styled(
                    format!("  {} · {} · {}", task.time, task.integration, task.status),
                    Style::default().fg(theme.muted),
                ),
            ])];
            if let Some(ref description) = task.description {
                lines.push(Line::from(Span::styled(
                    format!("    {}", description),
                    Style::default().fg(theme.muted),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" Tasks ({}) ", app.tasks.len()),
                Style::default().fg(theme.accent),
            ))
            .title_bottom(Line::from(Span::styled(
                " Esc: Back  j/k: Navigate ",
                Style::default().fg(theme.muted),
            ))),
    );
    f.render_widget(list, area);
}
