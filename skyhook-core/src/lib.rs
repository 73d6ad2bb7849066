//! Skyhook Core — attitude-based latch/jettison decisions over a scalar stream.
//!
//! This crate contains the decision engine and the pieces around it:
//! - Domain types (samples, attitude, extremes, costs, decisions)
//! - Attitude calculator (trend angle between two samples)
//! - Proportional buy/sell cost model
//! - Latch/jettison policy and the stateful `Skyhook` engine
//! - Fee configuration loading and validation
//! - Replay harness and synthetic altitude series

pub mod attitude;
pub mod config;
pub mod costs;
pub mod domain;
pub mod engine;
pub mod replay;
pub mod synthetic;

pub use attitude::calc_attitude;
pub use config::{ConfigError, EngineConfig, FeeSchedule, FeeSide, InitializationError};
pub use costs::CostModel;
pub use domain::{Attitude, Costs, Decision, Extremes, HoldState, Response, Sample};
pub use engine::{Clock, EngineSnapshot, ManualClock, Skyhook, SystemClock};
