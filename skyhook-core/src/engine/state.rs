//! Mutable engine state and its serializable snapshot.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{Attitude, Decision, Extremes, HoldState, Sample};

/// Trackers that exist only once the first sample has been seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tracking {
    /// Most recent accepted sample ("last coordinates").
    pub last_sample: Sample,
    pub extremes: Extremes,
}

/// State that evolves sample-by-sample. Owned by exactly one engine.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    /// `None` until the first finite altitude is consulted.
    pub tracking: Option<Tracking>,
    pub hold: HoldState,
    /// Sample at which the current payload was latched.
    pub latched_at: Option<Sample>,
    /// Highest altitude seen since the latch, the latch sample included.
    pub latch_peak: Option<f64>,
    /// Attitude computed by the most recent non-seeding consultation.
    pub last_attitude: Option<Attitude>,
    /// Every call to `consult`/`consult_at`, rejected or not.
    pub consultations: u64,
    /// Calls rejected for a non-finite altitude.
    pub rejected: u64,
    pub latches: u64,
    pub jettisons: u64,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.tracking.is_some()
    }

    /// Seed trackers from the first sample.
    pub fn seed(&mut self, sample: Sample) {
        self.tracking = Some(Tracking {
            last_sample: sample,
            extremes: Extremes::seeded(sample.value),
        });
    }

    /// Apply the hold-state side effect of a decision.
    pub fn apply(&mut self, decision: Decision, sample: Sample) {
        match decision {
            Decision::Latch => {
                self.hold = HoldState::Holding;
                self.latched_at = Some(sample);
                self.latch_peak = Some(sample.value);
                self.latches += 1;
            }
            Decision::Jettison => {
                self.hold = HoldState::Empty;
                self.latched_at = None;
                self.latch_peak = None;
                self.jettisons += 1;
            }
            Decision::Idle | Decision::Hold => {}
        }
    }

    /// Raise the since-latch peak to `altitude`. No-op while empty.
    pub fn track_latch_peak(&mut self, altitude: f64) {
        if let Some(peak) = self.latch_peak.as_mut() {
            *peak = peak.max(altitude);
        }
    }
}

/// Point-in-time view of an engine, for reports and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub config: EngineConfig,
    pub hold_state: HoldState,
    pub extremes: Option<Extremes>,
    pub last_sample: Option<Sample>,
    pub last_attitude: Option<Attitude>,
    pub latched_at: Option<Sample>,
    pub latch_peak: Option<f64>,
    pub consultations: u64,
    pub rejected: u64,
    pub latches: u64,
    pub jettisons: u64,
}

impl EngineSnapshot {
    pub fn capture(config: &EngineConfig, state: &EngineState) -> Self {
        Self {
            config: *config,
            hold_state: state.hold,
            extremes: state.tracking.map(|t| t.extremes),
            last_sample: state.tracking.map(|t| t.last_sample),
            last_attitude: state.last_attitude,
            latched_at: state.latched_at,
            latch_peak: state.latch_peak,
            consultations: state.consultations,
            rejected: state.rejected,
            latches: state.latches,
            jettisons: state.jettisons,
        }
    }
}
