use chrono::Local;
use tracing::debug;

use crate::app::App;
use crate::system::{
    host_frequency_sampler, host_process_enumerator, CoreFrequencySample, HostFrequencySampler,
    HostProcessEnumerator, ProcessSnapshot, SourcePaths,
};

/// Drives both samplers once per tick and hands the results to the App
pub struct Collector {
    frequencies: HostFrequencySampler,
    processes: HostProcessEnumerator,
}

impl Collector {
    pub fn new(paths: &SourcePaths) -> Self {
        Self {
            frequencies: host_frequency_sampler(paths),
            processes: host_process_enumerator(paths),
        }
    }

    /// One frequency sample and one process snapshot
    pub fn sample(&self, with_processes: bool) -> (CoreFrequencySample, ProcessSnapshot) {
        let frequencies = self.frequencies.sample();
        let processes = if with_processes {
            self.processes.enumerate()
        } else {
            ProcessSnapshot::default()
        };
        (frequencies, processes)
    }

    /// Replace the App's samples with fresh ones
    pub fn refresh(&self, app: &mut App) {
        if app.paused {
            return; // p key: freeze display
        }

        let (frequencies, processes) = self.sample(app.show_processes);
        debug!(
            cores = frequencies.len(),
            measured = frequencies.measured_count(),
            processes = processes.len(),
            "sampled"
        );

        app.frequencies = frequencies;
        app.processes = processes;
        app.sampled_at = Some(Local::now());
        app.clamp_scroll();
    }
}
