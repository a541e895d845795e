//! Command-line arguments for freqtop.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::config::FreqtopConfig;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `None` disables logging entirely
    pub fn as_level(&self) -> Option<Level> {
        match self {
            Self::Off => None,
            Self::Error => Some(Level::ERROR),
            Self::Warn => Some(Level::WARN),
            Self::Info => Some(Level::INFO),
            Self::Debug => Some(Level::DEBUG),
            Self::Trace => Some(Level::TRACE),
        }
    }
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "freqtop",
    about = "Live per-core CPU frequency and process list in the terminal",
    version
)]
pub struct Args {
    /// Sampling interval in milliseconds (200..=10000)
    #[arg(short = 'i', long)]
    pub interval_ms: Option<u64>,

    /// Print one plain-text frame to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// Hide the process table
    #[arg(long)]
    pub no_processes: bool,

    /// Show at most N processes (0 = all)
    #[arg(short = 'n', long)]
    pub max_processes: Option<usize>,

    /// Config file (default: platform config dir)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum, default_value = "off")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of the file config
    pub fn apply_to(&self, cfg: &mut FreqtopConfig) {
        if let Some(ms) = self.interval_ms {
            cfg.set_interval_ms(ms);
        }
        if self.no_processes {
            cfg.show_processes = false;
        }
        if let Some(n) = self.max_processes {
            cfg.max_processes = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["freqtop"]);
        assert!(!args.once);
        assert_eq!(args.log_level, LogLevel::Off);

        let mut cfg = FreqtopConfig::default();
        args.apply_to(&mut cfg);
        assert_eq!(cfg, FreqtopConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "freqtop",
            "--interval-ms",
            "50",
            "--no-processes",
            "-n",
            "25",
            "--log-level",
            "debug",
        ]);
        let mut cfg = FreqtopConfig::default();
        args.apply_to(&mut cfg);
        assert_eq!(cfg.update_interval_ms, crate::config::MIN_INTERVAL_MS);
        assert!(!cfg.show_processes);
        assert_eq!(cfg.max_processes, 25);
        assert_eq!(args.log_level.as_level(), Some(Level::DEBUG));
    }
}
