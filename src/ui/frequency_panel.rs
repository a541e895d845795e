use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::format::format_core;
use crate::system::CoreFrequency;

use super::MIN_FREQ_COL_WIDTH;

/// Number of frequency columns that fit in `width`
fn column_count(width: u16, cores: usize) -> usize {
    let by_width = (width / MIN_FREQ_COL_WIDTH).max(1) as usize;
    by_width.min(cores.max(1))
}

/// Rows needed for the frequency panel. Cores flow top-to-bottom, then
/// left-to-right (htop style), so core N stays in a predictable place.
pub fn panel_height(app: &App, width: u16, height: u16) -> u16 {
    let cores = app.frequencies.len();
    if cores == 0 {
        return 1;
    }
    let cols = column_count(width, cores);
    let rows = (cores + cols - 1) / cols;

    // Leave room for header, footer and a few process rows
    let reserved = if app.show_processes { 6 } else { 2 };
    let max_rows = height.saturating_sub(reserved).max(1) as usize;
    rows.min(max_rows) as u16
}

/// Draw per-core frequencies:
///   CPU 0   2.40 GHz    CPU 4   1.80 GHz
///   CPU 1   N/A         CPU 5   3.10 GHz
pub fn draw_frequency_panel(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }

    let sample = &app.frequencies;
    if sample.is_empty() {
        f.render_widget(
            Paragraph::new("Per-core frequency is not available on this system.")
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let cols = column_count(area.width, sample.len());
    let rows = area.height as usize;

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
        .split(area);

    let id_width = sample.len().saturating_sub(1).to_string().len();

    for (col, panel) in panels.iter().enumerate() {
        let lines: Vec<Line> = (0..rows)
            .filter_map(|row| {
                let core = col * rows + row;
                sample.get(core).map(|freq| core_line(core, freq, id_width))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), *panel);
    }
}

fn core_line(core: usize, freq: CoreFrequency, id_width: usize) -> Line<'static> {
    let value_style = match freq {
        CoreFrequency::Measured(_) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        CoreFrequency::Unmeasured => Style::default().fg(Color::DarkGray),
    };
    Line::from(vec![
        Span::styled(
            format!("CPU {:<width$} ", core, width = id_width),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{:>9}", format_core(freq)), value_style),
    ])
}
