use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, InputMode, Tab};
use crate::views;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Chat => views::chat::render(f, app, chunks[1]),
        Tab::Venues => views::venues::render(f, app, chunks[1]),
        Tab::Agents if app.open_agent.is_some() => views::agent_details::render(f, app, chunks[1]),
        Tab::Agents => views::agents::render(f, app, chunks[1]),
        Tab::Help => views::help::render(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(theme.muted)),
                Span::raw(tab.label()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " VenueX ",
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                )),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let connection = if app.connected {
        Span::styled("● Connected", Style::default().fg(theme.success))
    } else {
        Span::styled("○ Disconnected", Style::default().fg(theme.error))
    };

    let backend = Span::styled(
        format!(" {} │ {} ", app.backend_url, theme.name),
        Style::default().fg(theme.muted),
    );

    let hint = match app.input_mode {
        InputMode::Editing => " │ Enter:Send Esc:Stop typing",
        InputMode::Searching => " │ Enter:Apply Esc:Clear",
        InputMode::Normal => " │ q:Quit Tab:Switch t:Theme r:Health ?:Help",
    };
    let help_hint = Span::styled(hint, Style::default().fg(theme.muted));

    let status = if let Some(ref msg) = app.status_message {
        Span::styled(format!(" │ {}", truncate(msg, 60)), Style::default().fg(theme.warning))
    } else if let Some(ref err) = app.last_error {
        Span::styled(
            format!(" │ {}", truncate(err, 40)),
            Style::default().fg(theme.error),
        )
    } else {
        Span::raw("")
    };

    let bar = Paragraph::new(Line::from(vec![connection, backend, help_hint, status]))
        .style(Style::default().bg(theme.bg));

    f.render_widget(bar, area);
}

/// Shortens `s` to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
