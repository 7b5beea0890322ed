//! Range Checking for Patient Input

use crate::error::ValidationError;
use feature_engine::PatientInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Allowed input domains (inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Age valid range (years)
    pub age_range: (u32, u32),
    /// Height valid range (cm)
    pub height_range: (f64, f64),
    /// Weight valid range (kg)
    pub weight_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (1, 120),
            height_range: (100.0, 250.0),
            weight_range: (30.0, 200.0),
        }
    }
}

/// Result of validating one input
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// Every failure found
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// First failure, if any
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Validator for patient intake data
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Numeric fields checked per input
    const FIELDS: usize = 3;

    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field, value });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate age
    pub fn validate_age(&self, age: u32) -> Result<(), ValidationError> {
        let (min, max) = self.config.age_range;
        self.validate_range("age", age as f64, (min as f64, max as f64))
    }

    /// Validate height
    pub fn validate_height(&self, height_cm: f64) -> Result<(), ValidationError> {
        self.validate_range("height_cm", height_cm, self.config.height_range)
    }

    /// Validate weight
    pub fn validate_weight(&self, weight_kg: f64) -> Result<(), ValidationError> {
        self.validate_range("weight_kg", weight_kg, self.config.weight_range)
    }

    /// Check every field and collect all failures
    pub fn validate_patient(&self, input: &PatientInput) -> ValidationResult {
        let errors: Vec<ValidationError> = [
            self.validate_age(input.age),
            self.validate_height(input.height_cm),
            self.validate_weight(input.weight_kg),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            ValidationResult::valid(Self::FIELDS)
        } else {
            debug!("Rejected patient input: {} field(s) out of domain", errors.len());
            ValidationResult::invalid(errors, Self::FIELDS)
        }
    }

    /// Check every field, returning the first failure
    pub fn check(&self, input: &PatientInput) -> Result<(), ValidationError> {
        self.validate_patient(input).into_result()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
