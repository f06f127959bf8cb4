//! Score band and prediction report data structures

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted credit-score category.
///
/// The ordinal codes are fixed independently of class frequency in the
/// training data: Poor = 0, Standard = 1, Good = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Poor,
    Standard,
    Good,
}

/// Upper bound of the gauge axis.
pub const GAUGE_AXIS_MAX: f64 = 150.0;

impl ScoreBand {
    /// All bands, in ordinal-code order
    pub const ALL: [ScoreBand; 3] = [ScoreBand::Poor, ScoreBand::Standard, ScoreBand::Good];

    /// Fixed ordinal code used as the classifier target
    pub fn code(self) -> usize {
        match self {
            ScoreBand::Poor => 0,
            ScoreBand::Standard => 1,
            ScoreBand::Good => 2,
        }
    }

    /// Decode a classifier output back into a band
    pub fn from_code(code: usize) -> Result<Self> {
        match code {
            0 => Ok(ScoreBand::Poor),
            1 => Ok(ScoreBand::Standard),
            2 => Ok(ScoreBand::Good),
            other => bail!("unknown score band code: {}", other),
        }
    }

    /// Parse a dataset label value
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Poor" => Some(ScoreBand::Poor),
            "Standard" => Some(ScoreBand::Standard),
            "Good" => Some(ScoreBand::Good),
            _ => None,
        }
    }

    /// Label as it appears in the dataset and in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Poor => "Poor",
            ScoreBand::Standard => "Standard",
            ScoreBand::Good => "Good",
        }
    }

    /// Midpoint of the band on the 0-150 gauge axis (`code * 50 + 25`)
    pub fn gauge_position(self) -> f64 {
        (self.code() * 50 + 25) as f64
    }

    /// Band range on the gauge axis
    pub fn gauge_range(self) -> (f64, f64) {
        let start = (self.code() * 50) as f64;
        (start, start + 50.0)
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prediction report produced for one scored customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier
    pub report_id: String,

    /// Predicted credit-score category
    pub band: ScoreBand,

    /// Position of the gauge bar and threshold marker
    pub gauge_position: f64,

    /// Report generation timestamp
    pub timestamp: DateTime<Utc>,

    /// Occupation of the scored customer
    pub occupation: String,
}

impl ScoreReport {
    /// Create a new report for a predicted band
    pub fn new(band: ScoreBand) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            band,
            gauge_position: band.gauge_position(),
            timestamp: Utc::now(),
            occupation: String::new(),
        }
    }

    /// Attach the scored customer's occupation
    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = occupation.into();
        self
    }

    /// The user-facing success message
    pub fn message(&self) -> String {
        format!("Predicted Credit Score Category: {}", self.band)
    }
}
