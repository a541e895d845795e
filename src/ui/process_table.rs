use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::format::truncate_to_width;

/// Width of the PID column including its trailing gap
const PID_COL_WIDTH: usize = 9;

/// Draw the process table: a header row, then `PID  Name` rows from the scroll offset
pub fn draw_process_table(f: &mut Frame, app: &App, area: Rect) {
    if area.height < 2 {
        return;
    }

    let header_area = Rect { height: 1, ..area };
    let header = format!(
        "{:>pid$}  {:<rest$}",
        "PID",
        "Name",
        pid = PID_COL_WIDTH - 2,
        rest = (area.width as usize).saturating_sub(PID_COL_WIDTH)
    );
    f.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    let body_area = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    let name_width = (body_area.width as usize).saturating_sub(PID_COL_WIDTH);

    let lines: Vec<Line> = app
        .processes
        .iter()
        .take(app.visible_process_count())
        .skip(app.scroll_offset)
        .take(body_area.height as usize)
        .map(|p| {
            Line::from(vec![
                Span::styled(
                    format!("{:>width$}  ", p.pid, width = PID_COL_WIDTH - 2),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(truncate_to_width(&p.name, name_width)),
            ])
        })
        .collect();

    if lines.is_empty() {
        f.render_widget(
            Paragraph::new("No processes available.").style(Style::default().fg(Color::DarkGray)),
            body_area,
        );
        return;
    }
    f.render_widget(Paragraph::new(lines), body_area);
}
