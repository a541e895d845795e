pub mod footer;
pub mod frequency_panel;
pub mod header;
pub mod process_table;
pub mod text;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

/// Minimum width of one frequency column, e.g. "CPU 127  3.20 GHz"
pub const MIN_FREQ_COL_WIDTH: u16 = 20;

/// Render the complete UI
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();
    let freq_rows = frequency_panel::panel_height(app, size.width, size.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),         // header (time, source, counts)
            Constraint::Length(freq_rows), // per-core frequencies
            Constraint::Min(0),            // process table
            Constraint::Length(1),         // footer (key bar)
        ])
        .split(size);

    header::draw_header(f, app, chunks[0]);
    frequency_panel::draw_frequency_panel(f, app, chunks[1]);
    if app.show_processes {
        process_table::draw_process_table(f, app, chunks[2]);
    }
    footer::draw_footer(f, app, chunks[3]);
}
