//! Decision labels and payload hold state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the engine advises after consulting one altitude sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// No payload held and no reason to take one.
    Idle,
    /// Payload held; keep it.
    Hold,
    /// Acquire the payload.
    Latch,
    /// Release the payload.
    Jettison,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Hold => "HOLD",
            Self::Latch => "LATCH",
            Self::Jettison => "JETTISON",
        }
    }

    /// True for decisions that change the hold state.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Latch | Self::Jettison)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a payload is currently held. Engines start `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldState {
    #[default]
    Empty,
    Holding,
}

impl HoldState {
    pub fn is_holding(&self) -> bool {
        matches!(self, Self::Holding)
    }

    /// The decision reported when nothing changes in this state.
    pub fn resting_decision(&self) -> Decision {
        match self {
            Self::Empty => Decision::Idle,
            Self::Holding => Decision::Hold,
        }
    }
}

/// Value returned from a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub decision: Decision,
}

impl Response {
    pub fn new(decision: Decision) -> Self {
        Self { decision }
    }
}

impl From<Decision> for Response {
    fn from(decision: Decision) -> Self {
        Self::new(decision)
    }
}
