//! Feature Vector Assembly

use crate::buckets::{age_bucket, bmi_bucket, compute_bmi, BmiBucket};
use crate::patient::PatientInput;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features handed to the model
pub const FEATURE_DIMENSION: usize = 4;

/// Everything derived from one [`PatientInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Raw body-mass index
    pub bmi: f64,
    pub bmi_bucket: BmiBucket,
    pub age_bucket: u8,
    /// 1 = Male
    pub sex_flag: u8,
    /// 1 = smoker
    pub smoker_flag: u8,
}

impl DerivedFeatures {
    /// Assemble the model input, refusing an undefined BMI
    pub fn feature_vector(&self) -> Result<FeatureVector, FeatureError> {
        let bmi = self
            .bmi_bucket
            .code()
            .ok_or(FeatureError::UndefinedBmi { bmi: self.bmi })?;

        Ok(FeatureVector {
            bmi,
            age: self.age_bucket,
            sex: self.sex_flag,
            smoker: self.smoker_flag,
        })
    }
}

/// Model input in training column order: bmi, age, sex, smoker.
///
/// Column order is part of the model contract; reordering the fields is a
/// breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub bmi: u8,
    pub age: u8,
    pub sex: u8,
    pub smoker: u8,
}

impl FeatureVector {
    /// Positional tuple form
    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (self.bmi, self.age, self.sex, self.smoker)
    }

    /// Values as model-ready floats, in column order
    pub fn values(&self) -> [f32; FEATURE_DIMENSION] {
        [
            self.bmi as f32,
            self.age as f32,
            self.sex as f32,
            self.smoker as f32,
        ]
    }
}

/// Derive BMI, buckets and flags from raw input. Never fails; an undefined
/// BMI shows up as [`BmiBucket::Unknown`].
pub fn derive_features(input: &PatientInput) -> DerivedFeatures {
    let bmi = compute_bmi(input.height_cm, input.weight_kg);
    let derived = DerivedFeatures {
        bmi,
        bmi_bucket: bmi_bucket(bmi),
        age_bucket: age_bucket(input.age),
        sex_flag: input.sex.flag(),
        smoker_flag: input.smoker.flag(),
    };

    debug!(
        "Derived features: bmi={:.2}, bmi_bucket={:?}, age_bucket={}, sex={}, smoker={}",
        derived.bmi, derived.bmi_bucket, derived.age_bucket, derived.sex_flag, derived.smoker_flag
    );

    derived
}

/// Build the model input for one patient
pub fn build_feature_vector(input: &PatientInput) -> Result<FeatureVector, FeatureError> {
    derive_features(input).feature_vector()
}
