//! Patient Feature Engineering
//!
//! Turns raw patient attributes into the fixed-order feature vector the
//! medical cost model was trained on. Everything here is pure: no I/O, no
//! shared state, safe to call from any number of threads.

mod buckets;
mod features;
mod patient;

pub use buckets::{age_bucket, bmi_bucket, compute_bmi, BmiBucket};
pub use features::{
    build_feature_vector, derive_features, DerivedFeatures, FeatureVector, FEATURE_DIMENSION,
};
pub use patient::{PatientInput, Sex, Smoker};

use thiserror::Error;

/// Errors during feature derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// BMI could not be bucketed (not-a-number)
    #[error("BMI {bmi} is undefined and cannot be bucketed")]
    UndefinedBmi { bmi: f64 },
}
