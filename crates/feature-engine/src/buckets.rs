//! BMI Computation and Range Bucketing

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the underweight band
const BMI_UNDERWEIGHT_MAX: f64 = 18.5;
/// Upper bound (inclusive) of the healthy band
const BMI_HEALTHY_MAX: f64 = 25.0;
/// Upper bound (inclusive) of the overweight band
const BMI_OVERWEIGHT_MAX: f64 = 29.9;

/// Catch-all age bucket for ages outside 18-60
pub const AGE_BUCKET_OTHER: u8 = 4;

/// Discretized BMI band.
///
/// `Unknown` is kept apart from the numeric codes so a not-a-number BMI can
/// never be fed to the model by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum BmiBucket {
    /// Band code in 0..=3
    Valid(u8),
    /// BMI was not-a-number
    Unknown,
}

impl BmiBucket {
    /// Band code, or `None` for `Unknown`
    pub fn code(&self) -> Option<u8> {
        match self {
            BmiBucket::Valid(code) => Some(*code),
            BmiBucket::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BmiBucket::Unknown)
    }
}

/// Map an age in years to its bucket.
///
/// | age   | bucket |
/// |-------|--------|
/// | 18-28 | 0      |
/// | 29-39 | 1      |
/// | 40-50 | 2      |
/// | 51-60 | 3      |
/// | other | 4      |
///
/// Ages outside 18-60 (minors, seniors) land in the catch-all bucket; this
/// is not a validation failure.
pub fn age_bucket(age: u32) -> u8 {
    match age {
        18..=28 => 0,
        29..=39 => 1,
        40..=50 => 2,
        51..=60 => 3,
        _ => AGE_BUCKET_OTHER,
    }
}

/// Map a BMI value to its band. Each band includes its upper bound.
pub fn bmi_bucket(bmi: f64) -> BmiBucket {
    if bmi.is_nan() {
        BmiBucket::Unknown
    } else if bmi <= BMI_UNDERWEIGHT_MAX {
        BmiBucket::Valid(0)
    } else if bmi <= BMI_HEALTHY_MAX {
        BmiBucket::Valid(1)
    } else if bmi <= BMI_OVERWEIGHT_MAX {
        BmiBucket::Valid(2)
    } else {
        BmiBucket::Valid(3)
    }
}

/// Body-mass index: weight (kg) over height (m) squared.
///
/// A non-positive or non-finite height is undefined and yields NaN, which
/// [`bmi_bucket`] reports as [`BmiBucket::Unknown`].
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 || !height_cm.is_finite() {
        return f64::NAN;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}
