use chrono::{DateTime, Local};

use crate::config::FreqtopConfig;
use crate::system::{CoreFrequencySample, ProcessSnapshot};

/// Main application state: the latest samples plus display options
pub struct App {
    pub should_quit: bool,
    pub paused: bool, // p key: freeze/pause updates

    // Latest samples, replaced wholesale on every tick
    pub frequencies: CoreFrequencySample,
    pub processes: ProcessSnapshot,
    pub sampled_at: Option<DateTime<Local>>,

    // Display options
    pub update_interval_ms: u64,
    pub show_processes: bool,
    pub max_processes: usize,
    pub scroll_offset: usize,
}

impl App {
    pub fn new(config: &FreqtopConfig) -> Self {
        Self {
            should_quit: false,
            paused: false,
            frequencies: CoreFrequencySample::empty(),
            processes: ProcessSnapshot::default(),
            sampled_at: None,
            update_interval_ms: config.update_interval_ms,
            show_processes: config.show_processes,
            max_processes: config.max_processes,
            scroll_offset: 0,
        }
    }

    /// Number of process rows eligible for display (after the max_processes cap)
    pub fn visible_process_count(&self) -> usize {
        match self.max_processes {
            0 => self.processes.len(),
            cap => self.processes.len().min(cap),
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let last = self.visible_process_count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + rows).min(last);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    /// Keep the scroll offset inside the current snapshot
    pub fn clamp_scroll(&mut self) {
        let last = self.visible_process_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ProcessRecord;

    fn app_with(n: u32, max_processes: usize) -> App {
        let config = FreqtopConfig {
            max_processes,
            ..FreqtopConfig::default()
        };
        let mut app = App::new(&config);
        app.processes = ProcessSnapshot::from_records(
            (1..=n)
                .map(|pid| ProcessRecord { pid, name: format!("p{}", pid) })
                .collect(),
        );
        app
    }

    #[test]
    fn test_visible_process_count_cap() {
        assert_eq!(app_with(10, 0).visible_process_count(), 10);
        assert_eq!(app_with(10, 4).visible_process_count(), 4);
        assert_eq!(app_with(2, 4).visible_process_count(), 2);
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = app_with(5, 0);
        app.scroll_down(100);
        assert_eq!(app.scroll_offset, 4);
        app.scroll_up(2);
        assert_eq!(app.scroll_offset, 2);
        app.processes = ProcessSnapshot::default();
        app.clamp_scroll();
        assert_eq!(app.scroll_offset, 0);
    }
}
