//! Cost model — proportional buy/sell fees.
//!
//! `buy_cost = altitude · buy_fee_pct / 100`, `sell_cost = altitude · sell_fee_pct / 100`.
//! Linear and stateless; the fee percentages come from a validated `EngineConfig`.

use crate::config::EngineConfig;
use crate::domain::Costs;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Buy fee in percent (0.25 = 0.25%).
    pub buy_fee_pct: f64,
    /// Sell fee in percent.
    pub sell_fee_pct: f64,
}

impl CostModel {
    pub fn new(buy_fee_pct: f64, sell_fee_pct: f64) -> Self {
        Self {
            buy_fee_pct,
            sell_fee_pct,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.buy_fee_pct(), config.sell_fee_pct())
    }

    pub fn frictionless() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Buy and sell cost at `altitude`.
    pub fn calc_costs(&self, altitude: f64) -> Costs {
        Costs {
            buy_cost: altitude * (self.buy_fee_pct / 100.0),
            sell_cost: altitude * (self.sell_fee_pct / 100.0),
        }
    }

    /// Combined buy + sell cost at `altitude`.
    pub fn round_trip(&self, altitude: f64) -> f64 {
        self.calc_costs(altitude).round_trip()
    }
}

impl From<&EngineConfig> for CostModel {
    fn from(config: &EngineConfig) -> Self {
        Self::from_config(config)
    }
}
