use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// One-line header:
///   14:03:22  source: live  cores: 8 (8 measured)  processes: 312
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::White);

    let time = app
        .sampled_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let source = app
        .frequencies
        .tier()
        .map(|t| t.label())
        .unwrap_or("none");

    let mut spans = vec![
        Span::styled(time, value),
        Span::raw("  "),
        Span::styled("source: ", label),
        Span::styled(source, value),
        Span::raw("  "),
        Span::styled("cores: ", label),
        Span::styled(
            format!(
                "{} ({} measured)",
                app.frequencies.len(),
                app.frequencies.measured_count()
            ),
            value,
        ),
    ];

    if app.show_processes {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("processes: ", label));
        spans.push(Span::styled(app.processes.len().to_string(), value));
    }

    if app.paused {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[PAUSED]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
