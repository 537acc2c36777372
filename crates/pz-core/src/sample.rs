//! Sample types and signal buffers

/// Type alias for signal samples (always f64 for maximum precision)
pub type Sample = f64;

/// Mono signal owned by the caller.
///
/// Grows one sample at a time during live capture and is replaced wholesale
/// on import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    samples: Vec<Sample>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Replace the whole signal (import)
    pub fn replace(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Minimum and maximum sample, `None` for an empty signal
    pub fn range(&self) -> Option<(Sample, Sample)> {
        let first = *self.samples.first()?;
        Some(
            self.samples
                .iter()
                .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
        )
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl From<Vec<Sample>> for Signal {
    fn from(samples: Vec<Sample>) -> Self {
        Self::from_samples(samples)
    }
}

impl AsRef<[Sample]> for Signal {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}
