//! Replay — drive an engine through a recorded altitude series.
//!
//! Samples are consulted in order with their own timestamps (`consult_at`),
//! so replays are deterministic. The report keeps every step, the completed
//! latch→jettison round trips, and a summary.
//!
//! CSV format: header `timestamp,value`, one sample per row, timestamps in
//! milliseconds.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{Attitude, Decision, Extremes, HoldState, Sample};
use crate::engine::{Clock, Skyhook};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("open sample file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("sample CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("write sample CSV: {0}")]
    Write(#[from] io::Error),
}

/// One consulted sample and what the engine said about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub index: usize,
    pub sample: Sample,
    /// `None` for the seeding sample and for rejected samples.
    pub attitude: Option<Attitude>,
    pub decision: Decision,
    pub hold_state: HoldState,
}

/// A completed latch → jettison pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub entry: Sample,
    pub exit: Sample,
    /// `exit.value - entry.value`.
    pub gross_change: f64,
    /// Buy cost at entry plus sell cost at exit.
    pub costs: f64,
    pub net_change: f64,
}

impl RoundTrip {
    pub fn duration_millis(&self) -> i64 {
        self.exit.timestamp - self.entry.timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub latches: u64,
    pub jettisons: u64,
    pub rejected: u64,
    pub final_hold_state: HoldState,
    pub extremes: Option<Extremes>,
    /// Sum of `net_change` over completed round trips.
    pub net_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub config: EngineConfig,
    pub config_fingerprint: String,
    pub summary: ReplaySummary,
    pub round_trips: Vec<RoundTrip>,
    /// Latch sample of a payload still held at the end of the series.
    pub open_latch: Option<Sample>,
    pub steps: Vec<ReplayStep>,
}

impl ReplayReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Consult `engine` with every sample in order and report the outcome.
///
/// The engine keeps its state afterwards; replaying into a fresh engine gives
/// a self-contained report.
pub fn replay<C: Clock>(engine: &mut Skyhook<C>, samples: &[Sample]) -> ReplayReport {
    let mut steps = Vec::with_capacity(samples.len());
    let mut round_trips = Vec::new();
    let costs = *engine.cost_model();

    for (index, &sample) in samples.iter().enumerate() {
        let measured = engine.is_initialized() && sample.value.is_finite();
        let entry = engine.latched_at();

        let decision = engine.consult_at(sample).decision;
        let stored = engine.last_sample().unwrap_or(sample);

        if decision == Decision::Jettison {
            if let Some(entry) = entry {
                let gross_change = stored.value - entry.value;
                let trip_costs =
                    costs.calc_costs(entry.value).buy_cost + costs.calc_costs(stored.value).sell_cost;
                round_trips.push(RoundTrip {
                    entry,
                    exit: stored,
                    gross_change,
                    costs: trip_costs,
                    net_change: gross_change - trip_costs,
                });
            }
        }

        steps.push(ReplayStep {
            index,
            sample: if measured { stored } else { sample },
            attitude: if measured { engine.last_attitude() } else { None },
            decision,
            hold_state: engine.hold_state(),
        });
    }

    let snapshot = engine.snapshot();
    let summary = ReplaySummary {
        steps: steps.len(),
        latches: steps.iter().filter(|s| s.decision == Decision::Latch).count() as u64,
        jettisons: steps
            .iter()
            .filter(|s| s.decision == Decision::Jettison)
            .count() as u64,
        rejected: steps
            .iter()
            .filter(|s| !s.sample.value.is_finite())
            .count() as u64,
        final_hold_state: snapshot.hold_state,
        extremes: snapshot.extremes,
        net_change: round_trips.iter().map(|t| t.net_change).sum(),
    };

    info!(
        steps = summary.steps,
        latches = summary.latches,
        jettisons = summary.jettisons,
        net_change = summary.net_change,
        "replay complete"
    );

    ReplayReport {
        config: *engine.config(),
        config_fingerprint: engine.config().fingerprint(),
        summary,
        round_trips,
        open_latch: engine.latched_at(),
        steps,
    }
}

/// Parse `timestamp,value` rows.
pub fn read_samples_csv<R: io::Read>(reader: R) -> Result<Vec<Sample>, ReplayError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = Vec::new();
    for row in rdr.deserialize() {
        let sample: Sample = row?;
        samples.push(sample);
    }
    Ok(samples)
}

pub fn read_samples_file(path: &Path) -> Result<Vec<Sample>, ReplayError> {
    let file = std::fs::File::open(path).map_err(|source| ReplayError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_samples_csv(io::BufReader::new(file))
}

/// Write samples as `timestamp,value` rows with a header.
pub fn write_samples_csv<W: io::Write>(writer: W, samples: &[Sample]) -> Result<(), ReplayError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}
