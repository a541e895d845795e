//! sysinfo-backed sources for targets without dedicated readers (macOS, BSDs).
//! There is no descriptor tier here; the sampler sees an empty one.

use anyhow::Result;
use sysinfo::{CpuRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

use crate::system::{CoreReading, ListedProcess, PrimaryFrequencySource, ProcessListSource};

/// Per-CPU frequency as reported by sysinfo
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoCpus;

impl PrimaryFrequencySource for SysinfoCpus {
    fn read_cores(&self) -> Result<Vec<CoreReading>> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_frequency()),
        );
        Ok(sys
            .cpus()
            .iter()
            .enumerate()
            .map(|(core, cpu)| CoreReading::new(core, Some(cpu.frequency() as f64)))
            .collect())
    }
}

/// sysinfo process table; names come with the listing
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProcesses;

impl ProcessListSource for SysinfoProcesses {
    fn list_processes(&self) -> Result<Vec<ListedProcess>> {
        let mut sys = System::new();
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());
        Ok(sys
            .processes()
            .iter()
            .map(|(pid, process)| ListedProcess {
                pid: pid.as_u32(),
                name: Some(process.name().to_string_lossy().into_owned()),
            })
            .collect())
    }
}
