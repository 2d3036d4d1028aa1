use ratatui::prelude::*;
use ratatui::widgets::*;
use venuex_core::AgentStatus;

use crate::app::App;
use crate::theme::Theme;

pub fn status_color(status: AgentStatus, theme: &Theme) -> Color {
    match status {
        AgentStatus::Running => theme.success,
        AgentStatus::Idle => theme.warning,
        AgentStatus::Error => theme.error,
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Row::new(vec!["Name", "Status", "Integrations", "Last Active", "Runs"])
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .agents
        .iter()
        .enumerate()
        .map(|(i, agent)| {
            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };

            Row::new(vec![
                Cell::from(agent.name.clone()),
                Cell::from(Span::styled(
                    format!("● {}", agent.status),
                    Style::default().fg(status_color(agent.status, theme)),
                )),
                Cell::from(agent.integrations_label()),
                Cell::from(agent.last_active.clone()),
                Cell::from(agent.runs.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" Agents ({}) ", app.agents.len()),
                Style::default().fg(theme.accent),
            ))
            .title_bottom(Line::from(Span::styled(
                " Enter: Details  j/k: Navigate ",
                Style::default().fg(theme.muted),
            ))),
    );

    f.render_widget(table, area);
}
