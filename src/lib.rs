//! freqtop: live per-core CPU frequency and process list for the terminal.
//!
//! The sampling layer lives in [`system`]: a [`system::FrequencySampler`]
//! that tries the per-core live interface before falling back to the static
//! descriptor, and a [`system::ProcessEnumerator`] that lists processes and
//! resolves their names. Both are total; failures show up as empty or
//! sentinel-filled samples, never as errors.
//!
//! ```no_run
//! use freqtop::system::{host_frequency_sampler, host_process_enumerator, SourcePaths};
//!
//! let paths = SourcePaths::default();
//! let freqs = host_frequency_sampler(&paths).sample();
//! for (core, freq) in freqs.iter() {
//!     println!("CPU {}: {:?}", core, freq.mhz());
//! }
//! let procs = host_process_enumerator(&paths).enumerate();
//! println!("{} processes", procs.len());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod format;
pub mod input;
pub mod system;
pub mod ui;
