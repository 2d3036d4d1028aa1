use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::theme::THEMES;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_keybinds(f, app, chunks[0]);
    render_themes(f, app, chunks[1]);
}

fn render_keybinds(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let keybinds = vec![
        ("Navigation", vec![
            ("Tab / BackTab", "Next / Previous tab"),
            ("1-4", "Jump to tab by number"),
            ("j / Down", "Move selection down"),
            ("k / Up", "Move selection up"),
        ]),
        ("Chat", vec![
            ("i", "Start typing a message"),
            ("Enter", "Send message / use example"),
            ("Esc", "Stop typing"),
            ("PgUp / PgDn", "Scroll the conversation"),
            ("o / d", "Open booking / venue page"),
        ]),
        ("Venues", vec![
            ("/", "Search name, area or city"),
            ("b", "Toggle available only"),
            ("s", "Cycle sort: name, rating, distance"),
            ("Enter / o", "Open booking link"),
            ("d", "Open venue page"),
        ]),
        ("General", vec![
            ("Enter / Esc", "Open / close agent details"),
            ("r", "Check backend health"),
            ("t", "Cycle through themes"),
            ("q / Ctrl+C", "Quit"),
        ]),
    ];

    let mut items: Vec<ListItem> = Vec::new();
    for (section, binds) in keybinds {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", section),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))));
        for (key, desc) in binds {
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!("    {:16}", key),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc, Style::default().fg(theme.fg)),
            ])));
        }
        items.push(ListItem::new(Line::from("")));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                " Keyboard Shortcuts ",
                Style::default().fg(theme.accent),
            )),
    );

    f.render_widget(list, area);
}

fn render_themes(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let items: Vec<ListItem> = THEMES
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let current = i == app.theme_index;
            let marker = if current { " *" } else { "  " };
            let style = if current {
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!(" {:<18}", t.name), style),
                Span::styled("■", Style::default().fg(t.accent)),
                Span::styled("■", Style::default().fg(t.success)),
                Span::styled("■", Style::default().fg(t.warning)),
                Span::styled("■", Style::default().fg(t.error)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                " Themes (t to cycle) ",
                Style::default().fg(theme.accent),
            )),
    );

    f.render_widget(list, area);
}
