//! The Skyhook engine — one altitude sample in, one decision out.
//!
//! Each consultation:
//!
//! 1. First accepted sample: seed extremes and last coordinates, answer `Idle`.
//! 2. Otherwise compute the attitude from the stored sample to the new one.
//! 3. Widen the running extremes with the new altitude.
//! 4. Holding → raise the since-latch peak, then the jettison policy.
//!    Empty → latch policy.
//! 5. Store the new sample as the last coordinates.
//!
//! Consulting takes `&mut self`, so concurrent use of one engine has to go
//! through the caller's own lock. Engines share no state with each other.

pub mod clock;
pub mod policy;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use policy::{decide_jettison, decide_latch};
pub use state::{EngineSnapshot, EngineState, Tracking};

use tracing::{debug, trace, warn};

use crate::attitude;
use crate::config::{EngineConfig, FeeSchedule, InitializationError};
use crate::costs::CostModel;
use crate::domain::{Attitude, Costs, Decision, Extremes, HoldState, Response, Sample};

/// Attitude-based latch/jettison engine.
#[derive(Debug)]
pub struct Skyhook<C: Clock = SystemClock> {
    config: EngineConfig,
    costs: CostModel,
    state: EngineState,
    clock: C,
}

impl Skyhook<SystemClock> {
    /// Build an engine from a `{ buy, sell }` fee schedule, stamping samples
    /// with wall-clock time.
    ///
    /// Fails with [`InitializationError`] if either fee is missing,
    /// non-finite, or outside `[0, 100)`.
    pub fn new(fees: FeeSchedule) -> Result<Self, InitializationError> {
        let config = EngineConfig::try_from(fees)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Skyhook<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        debug!(
            buy_fee_pct = config.buy_fee_pct(),
            sell_fee_pct = config.sell_fee_pct(),
            "skyhook engine initialized"
        );
        Self {
            config,
            costs: CostModel::from_config(&config),
            state: EngineState::new(),
            clock,
        }
    }

    /// Consult the engine with an altitude observed now (per the engine clock).
    pub fn consult(&mut self, altitude: f64) -> Response {
        let now = self.clock.now_millis();
        self.consult_at(Sample::new(now, altitude))
    }

    /// Consult the engine with a caller-timestamped sample.
    ///
    /// A timestamp earlier than the stored sample's is clamped up to it, so the
    /// stored timestamp never decreases. A non-finite altitude leaves all
    /// trackers untouched and answers with the resting decision for the
    /// current hold state.
    pub fn consult_at(&mut self, sample: Sample) -> Response {
        self.state.consultations += 1;

        if !sample.value.is_finite() {
            self.state.rejected += 1;
            warn!(
                timestamp = sample.timestamp,
                altitude = sample.value,
                "ignoring non-finite altitude"
            );
            return Response::new(self.state.hold.resting_decision());
        }

        let Some(mut tracking) = self.state.tracking else {
            self.state.seed(sample);
            trace!(altitude = sample.value, "seeded trackers");
            return Response::new(Decision::Idle);
        };

        let sample = Sample::new(
            sample.timestamp.max(tracking.last_sample.timestamp),
            sample.value,
        );
        let attitude = attitude::calc_attitude(&tracking.last_sample, &sample);
        tracking.extremes.register(sample.value);

        let decision = match self.state.hold {
            HoldState::Holding => {
                self.state.track_latch_peak(sample.value);
                let latch_peak = self.state.latch_peak.unwrap_or(sample.value);
                policy::decide_jettison(
                    &attitude,
                    sample.value,
                    latch_peak,
                    &tracking.extremes,
                    &self.costs,
                )
            }
            HoldState::Empty => policy::decide_latch(&attitude),
        };
        let peak = tracking.extremes.highest;
        tracking.last_sample = sample;

        self.state.tracking = Some(tracking);
        self.state.last_attitude = Some(attitude);
        self.state.apply(decision, sample);

        if decision.is_transition() {
            debug!(
                %decision,
                altitude = sample.value,
                degrees = attitude.degrees,
                peak,
                "hold state changed"
            );
        } else {
            trace!(%decision, altitude = sample.value, degrees = attitude.degrees);
        }

        Response::new(decision)
    }

    /// Attitude from `p` to `q`. Independent of engine state.
    pub fn calc_attitude(p: &Sample, q: &Sample) -> Attitude {
        attitude::calc_attitude(p, q)
    }

    /// Buy/sell cost at `altitude` under this engine's fees.
    pub fn calc_costs(&self, altitude: f64) -> Costs {
        self.costs.calc_costs(altitude)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.costs
    }

    pub fn hold_state(&self) -> HoldState {
        self.state.hold
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Running extremes, once seeded.
    pub fn extremes(&self) -> Option<Extremes> {
        self.state.tracking.map(|t| t.extremes)
    }

    /// The stored "last coordinates".
    pub fn last_sample(&self) -> Option<Sample> {
        self.state.tracking.map(|t| t.last_sample)
    }

    pub fn last_attitude(&self) -> Option<Attitude> {
        self.state.last_attitude
    }

    pub fn latched_at(&self) -> Option<Sample> {
        self.state.latched_at
    }

    /// Highest altitude since the current latch.
    pub fn latch_peak(&self) -> Option<f64> {
        self.state.latch_peak
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(&self.config, &self.state)
    }
}
