//! Linux sources backed by sysfs and procfs.
//!
//! - live tier: `<sysfs>/cpuN/cpufreq/scaling_cur_freq` (kHz)
//! - descriptor tier: `<procfs>/cpuinfo` (`processor` / `cpu MHz` blocks)
//! - process list: numeric directories under `<procfs>`
//! - names: `<procfs>/PID/comm`, then the `Name:` field of `<procfs>/PID/status`
//!
//! Roots are configurable so tests can point the sources at fake trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::trace;

use crate::system::{
    CoreReading, ListedProcess, PrimaryFrequencySource, ProcessListSource, ProcessNameSource,
    SecondaryFrequencySource, MAX_CORE_ID,
};

/// cpufreq sysfs tree
#[derive(Debug, Clone)]
pub struct SysfsCpufreq {
    root: PathBuf,
}

impl SysfsCpufreq {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ids of `cpuN` directories, ascending. Entries like `cpufreq` or `cpuidle` are ignored.
    fn core_ids(&self) -> Result<Vec<usize>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read {}", self.root.display()))?;

        let mut ids: Vec<usize> = entries
            .flatten()
            .filter_map(|e| e.file_name().to_str().and_then(parse_cpu_dir_name))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn current_khz(&self, core: usize) -> Option<i64> {
        let path = self
            .root
            .join(format!("cpu{}", core))
            .join("cpufreq")
            .join("scaling_cur_freq");
        let content = fs::read_to_string(&path).ok()?;
        content.trim().parse::<i64>().ok()
    }
}

impl PrimaryFrequencySource for SysfsCpufreq {
    fn read_cores(&self) -> Result<Vec<CoreReading>> {
        let readings = self
            .core_ids()?
            .into_iter()
            .map(|core| {
                let mhz = self
                    .current_khz(core)
                    .filter(|&khz| khz > 0)
                    .map(|khz| khz as f64 / 1000.0);
                CoreReading::new(core, mhz)
            })
            .collect();
        Ok(readings)
    }
}

/// Core id in `0..=MAX_CORE_ID`, or `None` for anything else
fn parse_core_id(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|&id| id <= MAX_CORE_ID)
}

/// `cpu12` -> 12. Anything else (including `cpu`, `cpufreq`, `cpu1a`,
/// out-of-range ids) -> None.
fn parse_cpu_dir_name(name: &str) -> Option<usize> {
    let digits = name.strip_prefix("cpu")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let id = parse_core_id(digits);
    if id.is_none() {
        trace!(name, "skipping out-of-range cpu directory");
    }
    id
}

/// `/proc/cpuinfo`
#[derive(Debug, Clone)]
pub struct ProcCpuinfo {
    path: PathBuf,
}

impl ProcCpuinfo {
    pub fn new(procfs_root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = procfs_root.into();
        Self {
            path: root.join("cpuinfo"),
        }
    }
}

impl SecondaryFrequencySource for ProcCpuinfo {
    fn read_descriptor(&self) -> Result<Vec<CoreReading>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(parse_cpuinfo(&content))
    }
}

/// Parse `processor` / `cpu MHz` pairs from cpuinfo text.
///
/// Malformed lines are skipped, including processor ids above
/// [`MAX_CORE_ID`]. A malformed `processor` line clears the
/// current core so its `cpu MHz` is not credited to the previous block.
/// Cores whose block has no `cpu MHz` line are not reported.
pub fn parse_cpuinfo(content: &str) -> Vec<CoreReading> {
    let mut current: Option<usize> = None;
    let mut mhz: BTreeMap<usize, f64> = BTreeMap::new();

    for line in content.lines() {
        let (key, value) = match line.split_once(':') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => continue,
        };

        match key {
            "processor" => {
                current = parse_core_id(value);
                if current.is_none() {
                    trace!(line, "skipping malformed processor line");
                }
            }
            "cpu MHz" => match (current, value.parse::<f64>()) {
                (Some(core), Ok(v)) => {
                    mhz.insert(core, v);
                }
                _ => trace!(line, "skipping cpu MHz line"),
            },
            _ => {}
        }
    }

    mhz.into_iter()
        .map(|(core, v)| CoreReading::new(core, Some(v)))
        .collect()
}

/// procfs process directory; serves both the listing and the name lookups.
#[derive(Debug, Clone)]
pub struct ProcDir {
    root: PathBuf,
}

impl ProcDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ProcessListSource for ProcDir {
    fn list_processes(&self) -> Result<Vec<ListedProcess>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read {}", self.root.display()))?;

        let mut out = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(v) => v,
                None => continue,
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let pid: u32 = match name.parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            out.push(ListedProcess { pid, name: None });
        }
        Ok(out)
    }
}

impl ProcessNameSource for ProcDir {
    fn primary_name(&self, pid: u32) -> Result<Option<String>> {
        let path = self.root.join(pid.to_string()).join("comm");
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let first = content.lines().next().unwrap_or("").trim();
        Ok((!first.is_empty()).then(|| first.to_string()))
    }

    fn status_name(&self, pid: u32) -> Result<Option<String>> {
        let path = self.root.join(pid.to_string()).join("status");
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(parse_status_name(&content))
    }
}

/// Value of the first `Name:` line in a status file.
pub fn parse_status_name(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("Name:"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
