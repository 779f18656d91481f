//! Decibel conversion and related level statistics

use serde::{Deserialize, Serialize};

use crate::core::matrix::Matrix;
use crate::error::{MfccError, Result};

/// Parameters of the power → dB conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecibelScale {
    /// Power mapped to 0 dB
    pub reference: f64,
    /// Floor applied to power before the logarithm
    pub amin: f64,
    /// Dynamic range kept below the peak, `None` keeps everything
    pub top_db: Option<f64>,
}

impl Default for DecibelScale {
    fn default() -> Self {
        Self {
            reference: 1.0,
            amin: 1e-10,
            top_db: Some(80.0),
        }
    }
}

impl DecibelScale {
    pub fn validate(&self) -> Result<()> {
        if !(self.amin > 0.0) {
            return Err(MfccError::configuration("amin must be strictly positive"));
        }
        if !(self.reference > 0.0) {
            return Err(MfccError::configuration("reference power must be positive"));
        }
        if let Some(top_db) = self.top_db {
            if !(top_db >= 0.0) {
                return Err(MfccError::configuration("top_db must be non-negative"));
            }
        }
        Ok(())
    }
}

/// `10 * log10(max(power, amin))`
pub fn power_to_db_scalar(power: f64, amin: f64) -> f64 {
    10.0 * power.max(amin).log10()
}

/// Convert a power spectrogram to decibels, relative to `scale.reference`.
///
/// With `top_db` set, every value is floored at `max - top_db` where `max`
/// is the peak of the whole matrix.
pub fn power_to_db(power: &Matrix, scale: &DecibelScale) -> Matrix {
    let ref_db = power_to_db_scalar(scale.reference.abs(), scale.amin);
    let mut db = power.map(|p| power_to_db_scalar(p, scale.amin) - ref_db);

    if let Some(top_db) = scale.top_db {
        let floor = db.max() - top_db;
        db = db.map(|v| v.max(floor));
    }

    db
}

/// Per-frame energy in dB from a `[bin × frame]` power spectrogram
pub fn frame_energy_db(power: &Matrix, amin: f64) -> Vec<f64> {
    (0..power.cols())
        .map(|frame| {
            let total: f64 = (0..power.rows()).map(|bin| power.get(bin, frame)).sum();
            power_to_db_scalar(total, amin)
        })
        .collect()
}
