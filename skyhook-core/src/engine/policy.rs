//! Latch/jettison decision policy.
//!
//! # Latch (payload not held)
//! Latch on any climb (positive radians). Level or diving attitude stays `Idle`.
//!
//! # Jettison (payload held)
//! - Level or climbing: `Hold`. Never release while the altitude is still rising.
//! - Diving: jettison when the drawdown from the highest altitude seen since
//!   the latch exceeds the round-trip cost (`buy_cost + sell_cost`) evaluated
//!   at the all-time peak (`extremes.highest`). Otherwise `Hold`.
//!
//! Measuring the drawdown from the since-latch peak keeps a fresh latch below
//! an old high from being dropped on its first small dip. Both functions are
//! pure; the engine applies the state change.

use crate::costs::CostModel;
use crate::domain::{Attitude, Decision, Extremes};

/// Decision while no payload is held: `Latch` or `Idle`.
pub fn decide_latch(attitude: &Attitude) -> Decision {
    if attitude.is_climbing() {
        Decision::Latch
    } else {
        Decision::Idle
    }
}

/// Decision while a payload is held: `Jettison` or `Hold`.
///
/// `latch_peak` is the highest altitude since the latch.
pub fn decide_jettison(
    attitude: &Attitude,
    altitude: f64,
    latch_peak: f64,
    extremes: &Extremes,
    costs: &CostModel,
) -> Decision {
    if !attitude.is_diving() {
        return Decision::Hold;
    }

    let threshold = costs.round_trip(extremes.highest);
    let drawdown = latch_peak - altitude;

    if drawdown > threshold {
        Decision::Jettison
    } else {
        Decision::Hold
    }
}
