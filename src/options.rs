use crate::{ensure, Error};

/// Upper bound for [`Options::max_level`]; sizes the per-operation update vector.
pub const MAX_LEVEL_LIMIT: usize = 32;

pub const DEFAULT_MAX_LEVEL: usize = 16;
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Shape parameters of a [`SkipMap`](crate::SkipMap).
///
/// `probability` is the chance that a new entry is promoted one more level;
/// the expected number of entries on level `L` is `len * p^L`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Options {
    pub(crate) max_level: usize,
    pub(crate) probability: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
        }
    }
}

impl Options {
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        ensure!(
            self.max_level >= 1 && self.max_level <= MAX_LEVEL_LIMIT,
            Error::InvalidMaxLevel(self.max_level)
        );
        // NaN fails both comparisons
        ensure!(
            self.probability > 0.0 && self.probability < 1.0,
            Error::InvalidProbability(self.probability)
        );
        Ok(())
    }
}
