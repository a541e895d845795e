//! freqtop configuration persistence (htoprc-style key=value format)
//!
//! Stored at `%APPDATA%/freqtop/freqtoprc` on Windows and
//! `$XDG_CONFIG_HOME/freqtop/freqtoprc` (or `~/.config/freqtop/freqtoprc`) elsewhere.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::system::SourcePaths;

pub const MIN_INTERVAL_MS: u64 = 200;
pub const MAX_INTERVAL_MS: u64 = 10_000;

/// Default config file path for this platform
pub fn default_config_path() -> Option<PathBuf> {
    if cfg!(windows) {
        return std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("freqtop").join("freqtoprc"));
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join("freqtop").join("freqtoprc"))
}

/// Persistable settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqtopConfig {
    pub update_interval_ms: u64,
    pub show_processes: bool,
    /// 0 = no cap
    pub max_processes: usize,
    pub sources: SourcePaths,
}

impl Default for FreqtopConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 1000,
            show_processes: true,
            max_processes: 0,
            sources: SourcePaths::default(),
        }
    }
}

impl FreqtopConfig {
    /// Load config from `path`, returning defaults if the file doesn't exist
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p,
            None => return Self::default(),
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse rc text. Unknown keys and unparsable values are ignored.
    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => {
                    warn!(line, "ignoring config line without '='");
                    continue;
                }
            };
            match key {
                "update_interval_ms" => match value.parse::<u64>() {
                    Ok(v) => cfg.set_interval_ms(v),
                    Err(_) => warn!(value, "invalid update_interval_ms"),
                },
                "show_processes" => cfg.show_processes = value == "1",
                "max_processes" => match value.parse::<usize>() {
                    Ok(v) => cfg.max_processes = v,
                    Err(_) => warn!(value, "invalid max_processes"),
                },
                "sysfs_cpu_root" if !value.is_empty() => cfg.sources.sysfs_cpu_root = value.to_string(),
                "procfs_root" if !value.is_empty() => cfg.sources.procfs_root = value.to_string(),
                _ => {} // Ignore unknown keys
            }
        }

        cfg
    }

    pub fn set_interval_ms(&mut self, ms: u64) {
        self.update_interval_ms = ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);
    }

    pub fn render(&self) -> String {
        let b = |v: bool| if v { "1" } else { "0" };

        let lines = [
            "# freqtop configuration file".to_string(),
            String::new(),
            format!("update_interval_ms={}", self.update_interval_ms),
            format!("show_processes={}", b(self.show_processes)),
            format!("max_processes={}", self.max_processes),
            format!("sysfs_cpu_root={}", self.sources.sysfs_cpu_root),
            format!("procfs_root={}", self.sources.procfs_root),
        ];
        lines.join("\n") + "\n"
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }

        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create config file {}", path.display()))?;
        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults_on_empty() {
        assert_eq!(FreqtopConfig::parse(""), FreqtopConfig::default());
    }

    #[test]
    fn test_parse_values_and_comments() {
        let cfg = FreqtopConfig::parse(
            "# comment\n\nupdate_interval_ms = 2500\nshow_processes=0\nmax_processes=40\nprocfs_root=/host/proc\n",
        );
        assert_eq!(cfg.update_interval_ms, 2500);
        assert!(!cfg.show_processes);
        assert_eq!(cfg.max_processes, 40);
        assert_eq!(cfg.sources.procfs_root, "/host/proc");
        assert_eq!(cfg.sources.sysfs_cpu_root, "/sys/devices/system/cpu");
    }

    #[test]
    fn test_parse_clamps_interval() {
        assert_eq!(FreqtopConfig::parse("update_interval_ms=5").update_interval_ms, MIN_INTERVAL_MS);
        assert_eq!(
            FreqtopConfig::parse("update_interval_ms=999999").update_interval_ms,
            MAX_INTERVAL_MS
        );
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let cfg = FreqtopConfig::parse("bogus\ncolor=3\nmax_processes=lots\nupdate_interval_ms=-1\n");
        assert_eq!(cfg, FreqtopConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("freqtoprc");

        let mut cfg = FreqtopConfig::default();
        cfg.set_interval_ms(750);
        cfg.max_processes = 12;
        cfg.save(&path).unwrap();

        assert_eq!(FreqtopConfig::load(Some(&path)), cfg);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            FreqtopConfig::load(Some(&dir.path().join("absent"))),
            FreqtopConfig::default()
        );
        assert_eq!(FreqtopConfig::load(None), FreqtopConfig::default());
    }
}
