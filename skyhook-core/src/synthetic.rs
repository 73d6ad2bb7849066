//! Synthetic altitude series — seeded random walk for demos and benchmarks.
//!
//! Each step moves the altitude by `drift + volatility · z` where `z` is
//! uniform in `[-1, 1]`. Altitudes are floored at zero. The same `SeriesSpec`
//! always produces the same series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::Sample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub start_value: f64,
    pub start_timestamp: i64,
    pub step_ms: i64,
    pub len: usize,
    /// Mean change per step.
    pub drift: f64,
    /// Maximum random change per step, either direction.
    pub volatility: f64,
    pub seed: u64,
}

impl Default for SeriesSpec {
    fn default() -> Self {
        Self {
            start_value: 159_908.0,
            start_timestamp: 0,
            step_ms: 1_000,
            len: 500,
            drift: 0.0,
            volatility: 100.0,
            seed: 42,
        }
    }
}

impl SeriesSpec {
    pub fn generate(&self) -> Vec<Sample> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut value = self.start_value.max(0.0);
        let mut samples = Vec::with_capacity(self.len);

        for i in 0..self.len {
            if i > 0 {
                let z: f64 = rng.gen_range(-1.0..=1.0);
                value = (value + self.drift + self.volatility * z).max(0.0);
            }
            let timestamp = self
                .start_timestamp
                .saturating_add(self.step_ms.saturating_mul(i as i64));
            samples.push(Sample::new(timestamp, value));
        }

        samples
    }
}
