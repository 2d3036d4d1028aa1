use ratatui::prelude::*;
use ratatui::widgets::*;
use venuex_core::Venue;

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::ui::truncate;

const MAX_SLOTS: usize = 2;
const MAX_AMENITIES: usize = 3;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filter_bar(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_table(f, app, body[0]);
    render_card(f, app, body[1]);
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let searching = app.input_mode == InputMode::Searching;
    let view = app.venue_view();

    let search = if app.filter.search_term.is_empty() && !searching {
        Span::styled(
            "🔍 Search venues, areas, cities... (/)",
            Style::default().fg(theme.muted),
        )
    } else {
        let cursor = if searching { "_" } else { "" };
        Span::styled(
            format!("🔍 {}{}", app.filter.search_term, cursor),
            Style::default().fg(theme.fg),
        )
    };

    let bookable = if app.filter.bookable_only {
        Span::styled("  [b] ☑ Available only", Style::default().fg(theme.success))
    } else {
        Span::styled("  [b] ☐ Available only", Style::default().fg(theme.muted))
    };

    let sort = Span::styled(
        format!("  [s] {}", app.filter.sort_key.label()),
        Style::default().fg(theme.info),
    );

    let mut stats = format!(
        " {} venues • {} bookable ",
        view.stats.total, view.stats.bookable
    );
    if let Some(mean) = view.stats.mean_rating_label() {
        stats = format!("{}• {} ", stats, mean);
    }

    let border = if searching { theme.warning } else { theme.border };
    let bar = Paragraph::new(Line::from(vec![search, bookable, sort])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(stats, Style::default().fg(theme.accent))),
    );
    f.render_widget(bar, area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let view = app.venue_view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" Venues ", Style::default().fg(theme.accent)));

    if view.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No venues found",
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                view.empty_message(),
                Style::default().fg(theme.muted),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Name", "Location", "Rating", "Distance", "Status"])
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = view
        .venues
        .iter()
        .enumerate()
        .map(|(i, venue)| {
            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };
            let status_color = if venue.is_bookable {
                theme.success
            } else {
                theme.warning
            };

            Row::new(vec![
                Cell::from(truncate(&venue.venue_name, 28)),
                Cell::from(venue.location_label().unwrap_or_else(|| "-".to_string())),
                Cell::from(
                    venue
                        .rating
                        .map(|r| format!("★ {:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(
                    venue
                        .distance
                        .map(|d| format!("{:.1} km", d))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(Span::styled(
                    venue.availability_label(),
                    Style::default().fg(status_color),
                )),
            ])
            .style(style)
        })
        .collect();

    let summary = view.summary_line().unwrap_or_default();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(34),
            Constraint::Percentage(26),
            Constraint::Percentage(12),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
        ],
    )
    .header(header)
    .block(
        block.title_bottom(Line::from(Span::styled(
            format!(" {} ", summary),
            Style::default().fg(theme.muted),
        ))),
    );

    f.render_widget(table, area);
}

fn render_card(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let lines = match app.selected_venue() {
        Some(venue) => card_lines(venue, theme, true),
        None => vec![Line::from(Span::styled(
            "  Select a venue to see details",
            Style::default().fg(theme.muted),
        ))],
    };

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(" Details ", Style::default().fg(theme.accent)))
            .title_bottom(Line::from(Span::styled(
                " Enter/o: Open  d: Venue page ",
                Style::default().fg(theme.muted),
            ))),
    );
    f.render_widget(card, area);
}

fn preview_text(items: &[String], hidden: usize, separator: &str) -> String {
    let mut text = items.join(separator);
    if hidden > 0 {
        text.push_str(&format!(" +{}", hidden));
    }
    text
}

/// Card rendering of one venue, shared by the chat transcript and the listing.
pub fn card_lines(venue: &Venue, theme: &Theme, selected: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let marker = if selected { "▶ " } else { "  " };
    let mut title = vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(
            venue.venue_name.clone(),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(rating) = venue.rating {
        title.push(Span::styled(
            format!("  ★ {:.1}", rating),
            Style::default().fg(theme.warning),
        ));
    }
    title.push(Span::styled(
        format!("  [{}]", venue.platform),
        Style::default().fg(theme.secondary),
    ));
    let availability_color = if venue.is_bookable {
        theme.success
    } else {
        theme.warning
    };
    title.push(Span::styled(
        format!("  {}", venue.availability_label()),
        Style::default().fg(availability_color),
    ));
    lines.push(Line::from(title));

    let mut details = Vec::new();
    if let Some(location) = venue.location_label() {
        details.push(format!("📍 {}", location));
    }
    if let Some(ref price) = venue.price_range {
        details.push(format!("💰 {}", price));
    }
    if let Some(distance) = venue.distance {
        details.push(format!("📏 {:.1} km", distance));
    }
    if !details.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", details.join("   ")),
            Style::default().fg(theme.muted),
        )));
    }

    let (slots, hidden) = venue.slots_preview(MAX_SLOTS);
    if !slots.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    🕐 {}", preview_text(slots, hidden, ", ")),
            Style::default().fg(theme.info),
        )));
    }

    let (amenities, hidden) = venue.amenities_preview(MAX_AMENITIES);
    if !amenities.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    ✓ {}", preview_text(amenities, hidden, " · ")),
            Style::default().fg(theme.muted),
        )));
    }

    let action_style = if selected {
        Style::default()
            .fg(theme.bg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent)
    };
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(format!(" {} ", venue.action_label()), action_style),
    ]));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::THEMES;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_card_shows_previews_with_overflow() {
        let mut venue = Venue::new("Shivaji Park Nets", "Playo");
        venue.is_bookable = true;
        venue.available_slots = vec!["6 AM".into(), "7 AM".into(), "6 PM".into(), "8 PM".into()];
        venue.amenities = vec!["Parking".into(), "Floodlights".into(), "Cafe".into(), "Showers".into()];

        let text = text_of(&card_lines(&venue, &THEMES[0], false));
        assert!(text.contains("6 AM, 7 AM +2"));
        assert!(text.contains("Parking · Floodlights · Cafe +1"));
        assert!(text.contains("Book Now"));
        assert!(!text.contains("★"));
    }

    #[test]
    fn test_card_omits_missing_fields() {
        let venue = Venue::new("Bandra Box Cricket", "Playo");
        let lines = card_lines(&venue, &THEMES[0], false);
        let text = text_of(&lines);

        assert_eq!(lines.len(), 2);
        assert!(text.contains("View Details"));
        assert!(text.contains("Check"));
        assert!(!text.contains("📍"));
    }
}
