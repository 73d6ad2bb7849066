//! Attitude — the trend angle between two time-stamped samples.
//!
//! `radians = atan2(Δvalue, Δtime)`, `degrees = round2(radians · 180/π)`.
//!
//! The time axis is milliseconds. When two samples share a timestamp (or the
//! second is earlier than the first) the time delta is treated as zero and the
//! angle is pinned: +90° for a rise, −90° for a fall, 0° when level. This is
//! the same result `atan2` gives for a positive-zero denominator, stated here
//! so it does not depend on signed-zero handling.

use std::f64::consts::FRAC_PI_2;

use crate::domain::{Attitude, Sample};

/// Round to two decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute the attitude from `p` to `q`.
pub fn calc_attitude(p: &Sample, q: &Sample) -> Attitude {
    let dy = q.value - p.value;
    let dx = q.timestamp.saturating_sub(p.timestamp);

    let radians = if dx <= 0 {
        if dy > 0.0 {
            FRAC_PI_2
        } else if dy < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        dy.atan2(dx as f64)
    };

    Attitude {
        radians,
        degrees: round2(radians.to_degrees()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: i64 = 1_000;

    #[test]
    fn cruise_is_level() {
        let a = calc_attitude(&Sample::new(ANCHOR, 159_908.0), &Sample::new(ANCHOR, 159_908.0));
        assert_eq!(a.degrees, 0.0);
        assert_eq!(a.radians, 0.0);
    }

    #[test]
    fn same_tick_gain_is_vertical_climb() {
        let a = calc_attitude(&Sample::new(ANCHOR, 159_908.0), &Sample::new(ANCHOR, 159_990.0));
        assert_eq!(a.degrees, 90.0);
        assert_eq!(a.radians, FRAC_PI_2);
    }

    #[test]
    fn same_tick_loss_is_vertical_dive() {
        let a = calc_attitude(&Sample::new(ANCHOR, 159_908.0), &Sample::new(ANCHOR, 159_808.0));
        assert_eq!(a.degrees, -90.0);
    }

    #[test]
    fn unit_rise_over_unit_time_is_45_degrees() {
        let a = calc_attitude(&Sample::new(0, 10.0), &Sample::new(1, 11.0));
        assert_eq!(a.degrees, 45.0);
        assert!((a.radians - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn degrees_rounded_to_two_places() {
        // atan2(1, 3) = 18.4349...°
        let a = calc_attitude(&Sample::new(0, 0.0), &Sample::new(3, 1.0));
        assert_eq!(a.degrees, 18.43);
    }

    #[test]
    fn tiny_slope_reports_zero_degrees_but_climbs() {
        // 1e-6 over 1s → ~5.7e-8 degrees, which rounds to 0.00.
        let a = calc_attitude(&Sample::new(0, 100.0), &Sample::new(1_000, 100.000_001));
        assert_eq!(a.degrees, 0.0);
        assert!(a.radians > 0.0);
        assert!(a.is_climbing());
    }

    #[test]
    fn slow_rise_per_second_is_climbing() {
        let a = calc_attitude(&Sample::new(0, 159_908.0), &Sample::new(1_000, 159_908.05));
        assert_eq!(a.degrees, 0.0);
        assert!(a.radians > 0.0);
        assert!(a.is_climbing());
    }

    #[test]
    fn backwards_time_is_treated_as_same_tick() {
        let a = calc_attitude(&Sample::new(5_000, 10.0), &Sample::new(4_000, 12.0));
        assert_eq!(a.degrees, 90.0);
        let a = calc_attitude(&Sample::new(5_000, 10.0), &Sample::new(4_000, 10.0));
        assert_eq!(a.degrees, 0.0);
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let a = calc_attitude(&Sample::new(i64::MIN, 0.0), &Sample::new(i64::MAX, 1.0));
        assert!(a.degrees >= 0.0);
    }
}
