//! Plain-text frame for `--once` and non-terminal output.

use std::fmt::Write;

use crate::format::format_core;
use crate::system::{CoreFrequencySample, ProcessSnapshot};

/// Render one frame. `max_processes` = 0 prints every process; `None` omits the table.
pub fn render_frame(
    frequencies: &CoreFrequencySample,
    processes: Option<&ProcessSnapshot>,
    max_processes: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== Current frequency per core ===\n");
    if frequencies.is_empty() {
        out.push_str("Per-core frequency is not available on this system.\n");
    } else {
        for (core, freq) in frequencies.iter() {
            let _ = writeln!(out, "CPU {}: {}", core, format_core(freq));
        }
    }

    if let Some(processes) = processes {
        out.push('\n');
        out.push_str("=== Running processes (PID, Name) ===\n");
        let limit = if max_processes == 0 { usize::MAX } else { max_processes };
        for p in processes.iter().take(limit) {
            let _ = writeln!(out, "{}  {}", p.pid, p.name);
        }
    }

    out
}
