//! Time/altitude samples and the values derived from them.

use serde::{Deserialize, Serialize};

/// A time/altitude pair. `timestamp` is in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Trend angle between two samples.
///
/// `degrees` is rounded to two decimal places for reporting; `radians` is left
/// unrounded. Direction is read from `radians`, so a slow rise that rounds to
/// 0.00° still counts as climbing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub radians: f64,
    pub degrees: f64,
}

impl Attitude {
    pub fn is_climbing(&self) -> bool {
        self.radians > 0.0
    }

    pub fn is_diving(&self) -> bool {
        self.radians < 0.0
    }

    pub fn is_level(&self) -> bool {
        self.radians == 0.0
    }
}

/// Running bounds over every altitude accepted since initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub highest: f64,
    pub lowest: f64,
}

impl Extremes {
    /// Bounds collapsed onto a single seed value.
    pub fn seeded(altitude: f64) -> Self {
        Self {
            highest: altitude,
            lowest: altitude,
        }
    }

    /// Widen the bounds to include `altitude`. Never narrows them.
    pub fn register(&mut self, altitude: f64) {
        if altitude > self.highest {
            self.highest = altitude;
        }
        if altitude < self.lowest {
            self.lowest = altitude;
        }
    }

    /// Distance between the bounds.
    pub fn span(&self) -> f64 {
        self.highest - self.lowest
    }
}

/// Proportional buy/sell costs evaluated at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    pub buy_cost: f64,
    pub sell_cost: f64,
}

impl Costs {
    /// Cost of acquiring and then releasing at the same altitude.
    pub fn round_trip(&self) -> f64 {
        self.buy_cost + self.sell_cost
    }
}
