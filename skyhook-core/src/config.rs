//! Fee configuration and engine construction parameters.
//!
//! A `FeeSchedule` is the loose `{ buy, sell }` input as handed to the engine
//! (either field may be absent). `EngineConfig` is the validated, immutable
//! form. Fees are percentages: `0.25` means 0.25%.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Fees at or above this percentage are rejected.
pub const MAX_FEE_PCT: f64 = 100.0;

/// Which side of the fee schedule an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeSide {
    Buy,
    Sell,
}

impl fmt::Display for FeeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

/// Construction failed; no engine was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitializationError {
    #[error("insufficient initialization parameters: missing {0} fee")]
    MissingFee(FeeSide),
    #[error("{side} fee must be a finite number, got {value}")]
    NonFiniteFee { side: FeeSide, value: f64 },
    #[error("{side} fee must be in [0, 100), got {value}")]
    FeeOutOfRange { side: FeeSide, value: f64 },
}

/// Errors loading a fee schedule from disk or text.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read fee config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse fee config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] InitializationError),
}

/// Unvalidated `{ buy, sell }` fee percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeeSchedule {
    #[serde(default)]
    pub buy: Option<f64>,
    #[serde(default)]
    pub sell: Option<f64>,
}

impl FeeSchedule {
    pub fn new(buy: f64, sell: f64) -> Self {
        Self {
            buy: Some(buy),
            sell: Some(sell),
        }
    }

    /// Parse a schedule from TOML text without validating it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Validated fee percentages, fixed for the lifetime of an engine.
///
/// Only `TryFrom<FeeSchedule>` builds one, deserialization included, so every
/// instance holds finite fees in `[0, 100)`. Serialized as `{ buy, sell }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeeSchedule", into = "FeeSchedule")]
pub struct EngineConfig {
    buy_fee_pct: f64,
    sell_fee_pct: f64,
}

impl EngineConfig {
    /// Validate both fees. Each must be present, finite, and in `[0, 100)`.
    pub fn new(buy_fee_pct: f64, sell_fee_pct: f64) -> Result<Self, InitializationError> {
        Self::try_from(FeeSchedule::new(buy_fee_pct, sell_fee_pct))
    }

    /// Buy fee in percent (0.25 = 0.25%).
    pub fn buy_fee_pct(&self) -> f64 {
        self.buy_fee_pct
    }

    /// Sell fee in percent.
    pub fn sell_fee_pct(&self) -> f64 {
        self.sell_fee_pct
    }

    /// Parse and validate a TOML fee schedule (`buy = 0.25`, `sell = 0.25`).
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let schedule = FeeSchedule::from_toml(content)?;
        Ok(Self::try_from(schedule)?)
    }

    /// Load and validate a TOML fee schedule from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Deterministic identity of this fee configuration: BLAKE3 hex of the
    /// canonical JSON form.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).expect("EngineConfig must serialize");
        blake3::hash(&json).to_hex().to_string()
    }
}

impl From<EngineConfig> for FeeSchedule {
    fn from(config: EngineConfig) -> Self {
        Self::new(config.buy_fee_pct, config.sell_fee_pct)
    }
}

impl TryFrom<FeeSchedule> for EngineConfig {
    type Error = InitializationError;

    fn try_from(schedule: FeeSchedule) -> Result<Self, Self::Error> {
        let buy = validate_fee(FeeSide::Buy, schedule.buy)?;
        let sell = validate_fee(FeeSide::Sell, schedule.sell)?;
        Ok(Self {
            buy_fee_pct: buy,
            sell_fee_pct: sell,
        })
    }
}

fn validate_fee(side: FeeSide, fee: Option<f64>) -> Result<f64, InitializationError> {
    let value = fee.ok_or(InitializationError::MissingFee(side))?;
    if !value.is_finite() {
        return Err(InitializationError::NonFiniteFee { side, value });
    }
    if !(0.0..MAX_FEE_PCT).contains(&value) {
        return Err(InitializationError::FeeOutOfRange { side, value });
    }
    // -0.0 passes the range check; store it as 0.0.
    Ok(if value == 0.0 { 0.0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fees_present_validates() {
        let config = EngineConfig::try_from(FeeSchedule::new(0.25, 0.1)).unwrap();
        assert_eq!(config.buy_fee_pct(), 0.25);
        assert_eq!(config.sell_fee_pct(), 0.1);
    }

    #[test]
    fn missing_fees_are_rejected() {
        let err = EngineConfig::try_from(FeeSchedule::default()).unwrap_err();
        assert_eq!(err, InitializationError::MissingFee(FeeSide::Buy));

        let only_buy = FeeSchedule {
            buy: Some(0.25),
            sell: None,
        };
        let err = EngineConfig::try_from(only_buy).unwrap_err();
        assert_eq!(err, InitializationError::MissingFee(FeeSide::Sell));
        assert!(err.to_string().contains("insufficient initialization parameters"));
    }

    #[test]
    fn non_finite_fees_are_rejected() {
        let err = EngineConfig::new(f64::NAN, 0.25).unwrap_err();
        assert!(matches!(
            err,
            InitializationError::NonFiniteFee { side: FeeSide::Buy, .. }
        ));
        let err = EngineConfig::new(0.25, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            InitializationError::NonFiniteFee { side: FeeSide::Sell, .. }
        ));
    }

    #[test]
    fn fee_range_is_enforced() {
        assert!(EngineConfig::new(0.0, 0.0).is_ok());
        assert!(EngineConfig::new(99.99, 0.5).is_ok());
        assert!(matches!(
            EngineConfig::new(-0.1, 0.25),
            Err(InitializationError::FeeOutOfRange { side: FeeSide::Buy, .. })
        ));
        assert!(matches!(
            EngineConfig::new(0.25, 100.0),
            Err(InitializationError::FeeOutOfRange { side: FeeSide::Sell, .. })
        ));
    }

    #[test]
    fn from_toml_parses_schedule() {
        let config = EngineConfig::from_toml("buy = 0.25\nsell = 0.5\n").unwrap();
        assert_eq!(config.buy_fee_pct(), 0.25);
        assert_eq!(config.sell_fee_pct(), 0.5);
    }

    #[test]
    fn from_toml_missing_key_is_initialization_error() {
        let err = EngineConfig::from_toml("buy = 0.25\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(InitializationError::MissingFee(FeeSide::Sell))
        ));
    }

    #[test]
    fn from_toml_rejects_non_numeric_fee() {
        let err = EngineConfig::from_toml("buy = \"cheap\"\nsell = 0.25\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fees.toml");
        std::fs::write(&path, "buy = 0.1\nsell = 0.2\n").unwrap();
        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config, EngineConfig::new(0.1, 0.2).unwrap());
    }

    #[test]
    fn from_file_missing_path_is_read_error() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/fees.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn fingerprint_is_deterministic_and_fee_sensitive() {
        let a = EngineConfig::new(0.25, 0.25).unwrap();
        let b = EngineConfig::new(0.25, 0.25).unwrap();
        let c = EngineConfig::new(0.25, 0.3).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn serializes_as_fee_schedule() {
        let config = EngineConfig::new(0.25, 0.5).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"buy":0.25,"sell":0.5}"#);
        let deser: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, config);
    }

    #[test]
    fn deserialization_validates_fees() {
        let out_of_range = serde_json::from_str::<EngineConfig>(r#"{"buy":250.0,"sell":-3.0}"#);
        assert!(out_of_range.is_err());

        let missing = serde_json::from_str::<EngineConfig>(r#"{"buy":0.25}"#);
        assert!(missing.is_err());

        let raw_fields =
            serde_json::from_str::<EngineConfig>(r#"{"buy_fee_pct":0.25,"sell_fee_pct":0.25}"#);
        assert!(raw_fields.is_err());
    }

    #[test]
    fn fingerprint_hashes_canonical_json() {
        let config = EngineConfig::new(0.25, 0.25).unwrap();
        let json = serde_json::to_vec(&config).unwrap();
        assert_eq!(config.fingerprint(), blake3::hash(&json).to_hex().to_string());
    }

    #[test]
    fn negative_zero_fee_is_normalized() {
        let neg = EngineConfig::new(-0.0, 0.25).unwrap();
        let pos = EngineConfig::new(0.0, 0.25).unwrap();
        assert!(neg.buy_fee_pct().is_sign_positive());
        assert_eq!(neg.fingerprint(), pos.fingerprint());
    }
}
