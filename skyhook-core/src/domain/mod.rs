//! Domain types: samples, attitude angles, extremes, costs, decisions.

pub mod decision;
pub mod sample;

pub use decision::{Decision, HoldState, Response};
pub use sample::{Attitude, Costs, Extremes, Sample};
