use tracing::{debug, trace};

use crate::system::{CoreReading, PrimaryFrequencySource, SecondaryFrequencySource, MAX_CORE_ID};

/// One slot of a frequency sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreFrequency {
    /// Current clock in MHz, always > 0
    Measured(f64),
    /// Core exists (or lies below the highest reported id) but has no reading
    Unmeasured,
}

impl CoreFrequency {
    /// Measured when `mhz` is a finite positive number, otherwise the sentinel.
    pub fn from_mhz(mhz: Option<f64>) -> Self {
        match mhz {
            Some(v) if v.is_finite() && v > 0.0 => Self::Measured(v),
            _ => Self::Unmeasured,
        }
    }

    pub fn mhz(&self) -> Option<f64> {
        match self {
            Self::Measured(v) => Some(*v),
            Self::Unmeasured => None,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Which tier produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTier {
    Live,
    Descriptor,
}

impl FrequencyTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Descriptor => "descriptor",
        }
    }
}

/// Per-core frequencies indexed directly by logical core id.
///
/// The length is always the highest reported core id + 1. Ids that were never
/// reported, or reported without a positive reading, hold
/// [`CoreFrequency::Unmeasured`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoreFrequencySample {
    slots: Vec<CoreFrequency>,
    tier: Option<FrequencyTier>,
}

impl CoreFrequencySample {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from readings in any order. A repeated core id keeps the last
    /// reading; ids above [`MAX_CORE_ID`] are dropped.
    pub fn from_readings(readings: &[CoreReading], tier: FrequencyTier) -> Self {
        let in_range = || readings.iter().filter(|r| r.core <= MAX_CORE_ID);
        let len = match in_range().map(|r| r.core).max().and_then(|max| max.checked_add(1)) {
            Some(len) => len,
            None => return Self::empty(),
        };

        let mut slots = vec![CoreFrequency::Unmeasured; len];
        for reading in in_range() {
            slots[reading.core] = CoreFrequency::from_mhz(reading.mhz);
        }

        Self {
            slots,
            tier: Some(tier),
        }
    }

    pub fn slots(&self) -> &[CoreFrequency] {
        &self.slots
    }

    pub fn get(&self, core: usize) -> Option<CoreFrequency> {
        self.slots.get(core).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn tier(&self) -> Option<FrequencyTier> {
        self.tier
    }

    pub fn measured_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_measured()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, CoreFrequency)> + '_ {
        self.slots.iter().copied().enumerate()
    }
}

/// Tiered per-core frequency sampler. The live source wins when it yields at
/// least one positive reading; otherwise the descriptor is parsed.
pub struct FrequencySampler<P, S> {
    live: P,
    descriptor: S,
}

impl<P, S> FrequencySampler<P, S>
where
    P: PrimaryFrequencySource,
    S: SecondaryFrequencySource,
{
    pub fn new(live: P, descriptor: S) -> Self {
        Self { live, descriptor }
    }

    /// Take one sample. Never fails; an empty sample means no source had data.
    pub fn sample(&self) -> CoreFrequencySample {
        if let Some(sample) = self.sample_live() {
            return sample;
        }
        self.sample_descriptor()
    }

    fn sample_live(&self) -> Option<CoreFrequencySample> {
        let readings = match self.live.read_cores() {
            Ok(r) => r,
            Err(e) => {
                debug!("live frequency tier unavailable: {:#}", e);
                return None;
            }
        };

        let sample = CoreFrequencySample::from_readings(&readings, FrequencyTier::Live);
        if sample.measured_count() == 0 {
            debug!(
                cores = readings.len(),
                "live frequency tier reported no positive readings, falling back"
            );
            return None;
        }

        trace!(
            cores = sample.len(),
            measured = sample.measured_count(),
            "live frequency tier committed"
        );
        Some(sample)
    }

    fn sample_descriptor(&self) -> CoreFrequencySample {
        match self.descriptor.read_descriptor() {
            Ok(readings) => CoreFrequencySample::from_readings(&readings, FrequencyTier::Descriptor),
            Err(e) => {
                debug!("frequency descriptor unavailable: {:#}", e);
                CoreFrequencySample::empty()
            }
        }
    }
}
