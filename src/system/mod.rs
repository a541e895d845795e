//! System-state sampling: per-core clock frequency and the live process table.
//!
//! The algorithms in [`cpu`] and [`process`] are written once against the four
//! capability traits below. Each target platform supplies one concrete set of
//! sources, chosen at build time:
//!
//! | target  | live tier             | descriptor tier        | process list        | names                    |
//! |---------|-----------------------|------------------------|---------------------|--------------------------|
//! | linux   | cpufreq sysfs         | `/proc/cpuinfo`        | `/proc/<pid>` dirs  | `comm`, then `status`    |
//! | windows | CallNtPowerInformation| CentralProcessor `~MHz`| Toolhelp32 snapshot | snapshot, then image path|
//! | other   | sysinfo               | (none)                 | sysinfo             | sysinfo                  |

pub mod collector;
pub mod cpu;
pub mod process;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(windows)]
pub mod winapi;

#[cfg(not(any(target_os = "linux", windows)))]
pub mod generic;

use anyhow::Result;

pub use cpu::{CoreFrequency, CoreFrequencySample, FrequencySampler, FrequencyTier};
pub use process::{ProcessEnumerator, ProcessRecord, ProcessSnapshot};

/// Highest logical core id accepted from any source. Larger ids are treated
/// as corrupt entries and skipped.
pub const MAX_CORE_ID: usize = 8191;

/// One core's reading as reported by a frequency source.
/// `mhz` is `None` when the core is enumerated but its clock could not be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreReading {
    pub core: usize,
    pub mhz: Option<f64>,
}

impl CoreReading {
    pub fn new(core: usize, mhz: Option<f64>) -> Self {
        Self { core, mhz }
    }
}

/// A process id from a listing. Snapshot-style APIs report the image name in
/// the same pass; directory-style listings leave `name` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedProcess {
    pub pid: u32,
    pub name: Option<String>,
}

/// Per-core live clock interface, enumerated and read in one call.
pub trait PrimaryFrequencySource {
    fn read_cores(&self) -> Result<Vec<CoreReading>>;
}

/// Global static descriptor listing one entry per logical core.
pub trait SecondaryFrequencySource {
    fn read_descriptor(&self) -> Result<Vec<CoreReading>>;
}

/// Point-in-time list of live processes.
pub trait ProcessListSource {
    fn list_processes(&self) -> Result<Vec<ListedProcess>>;
}

/// Per-process display name lookup.
pub trait ProcessNameSource {
    /// Single-line name source. `Ok(None)` when present but empty.
    fn primary_name(&self, pid: u32) -> Result<Option<String>>;

    /// Structured key-value status source carrying a `Name:` field.
    fn status_name(&self, pid: u32) -> Result<Option<String>>;
}

/// Sources that never produce anything. Used where a platform has no
/// descriptor tier or no separate name lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl SecondaryFrequencySource for Unavailable {
    fn read_descriptor(&self) -> Result<Vec<CoreReading>> {
        Ok(Vec::new())
    }
}

impl ProcessNameSource for Unavailable {
    fn primary_name(&self, _pid: u32) -> Result<Option<String>> {
        Ok(None)
    }

    fn status_name(&self, _pid: u32) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Paths the Linux sources read from. Ignored on other targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub sysfs_cpu_root: String,
    pub procfs_root: String,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            sysfs_cpu_root: "/sys/devices/system/cpu".to_string(),
            procfs_root: "/proc".to_string(),
        }
    }
}

#[cfg(target_os = "linux")]
pub type HostFrequencySampler = FrequencySampler<linux::SysfsCpufreq, linux::ProcCpuinfo>;
#[cfg(target_os = "linux")]
pub type HostProcessEnumerator = ProcessEnumerator<linux::ProcDir, linux::ProcDir>;

#[cfg(windows)]
pub type HostFrequencySampler = FrequencySampler<winapi::PowerInformation, winapi::CentralProcessorRegistry>;
#[cfg(windows)]
pub type HostProcessEnumerator = ProcessEnumerator<winapi::ToolhelpSnapshot, winapi::ImageNameLookup>;

#[cfg(not(any(target_os = "linux", windows)))]
pub type HostFrequencySampler = FrequencySampler<generic::SysinfoCpus, Unavailable>;
#[cfg(not(any(target_os = "linux", windows)))]
pub type HostProcessEnumerator = ProcessEnumerator<generic::SysinfoProcesses, Unavailable>;

/// Frequency sampler wired to this host's sources.
#[cfg(target_os = "linux")]
pub fn host_frequency_sampler(paths: &SourcePaths) -> HostFrequencySampler {
    FrequencySampler::new(
        linux::SysfsCpufreq::new(&paths.sysfs_cpu_root),
        linux::ProcCpuinfo::new(&paths.procfs_root),
    )
}

/// Process enumerator wired to this host's sources.
#[cfg(target_os = "linux")]
pub fn host_process_enumerator(paths: &SourcePaths) -> HostProcessEnumerator {
    let proc_dir = linux::ProcDir::new(&paths.procfs_root);
    ProcessEnumerator::new(proc_dir.clone(), proc_dir)
}

#[cfg(windows)]
pub fn host_frequency_sampler(_paths: &SourcePaths) -> HostFrequencySampler {
    FrequencySampler::new(winapi::PowerInformation, winapi::CentralProcessorRegistry)
}

#[cfg(windows)]
pub fn host_process_enumerator(_paths: &SourcePaths) -> HostProcessEnumerator {
    ProcessEnumerator::new(winapi::ToolhelpSnapshot, winapi::ImageNameLookup)
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn host_frequency_sampler(_paths: &SourcePaths) -> HostFrequencySampler {
    FrequencySampler::new(generic::SysinfoCpus, Unavailable)
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn host_process_enumerator(_paths: &SourcePaths) -> HostProcessEnumerator {
    ProcessEnumerator::new(generic::SysinfoProcesses, Unavailable)
}
