use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Key bar entries: (key_label, description)
const KEYS: &[(&str, &str)] = &[
    ("P", "Pause "),
    ("↑↓", "Scroll"),
    ("PgUp/PgDn", "Page  "),
    ("Q", "Quit  "),
];

/// Draw the bottom key bar: key in black-on-cyan, description in light-on-dark
pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let bg_fill = " ".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(bg_fill).style(Style::default().bg(Color::Indexed(234))),
        area,
    );

    let mut spans: Vec<Span> = Vec::new();
    for (key, desc) in KEYS {
        let desc = if *key == "P" && app.paused { "Resume" } else { *desc };
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            desc.to_string(),
            Style::default()
                .fg(Color::Indexed(252))  // light gray
                .bg(Color::Indexed(234)), // very dark gray
        ));
    }
    spans.push(Span::styled(
        format!("  every {} ms", app.update_interval_ms),
        Style::default().fg(Color::Indexed(244)).bg(Color::Indexed(234)),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
