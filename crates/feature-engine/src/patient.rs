//! Patient Input Types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex as collected by the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Model encoding (1 = Male)
    pub fn flag(&self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smoking status as collected by the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Smoker {
    Yes,
    No,
}

impl Smoker {
    /// Model encoding (1 = Yes)
    pub fn flag(&self) -> u8 {
        match self {
            Smoker::Yes => 1,
            Smoker::No => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Smoker::Yes => "Yes",
            Smoker::No => "No",
        }
    }
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw patient attributes for a single request.
///
/// Domain bounds (age 1-120, height 100-250 cm, weight 30-200 kg) are
/// enforced by the caller before the pipeline runs; nothing in this crate
/// re-validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in whole years
    pub age: u32,
    pub sex: Sex,
    /// Height in centimetres
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    pub smoker: Smoker,
}

impl Default for PatientInput {
    /// The intake form's initial values
    fn default() -> Self {
        Self {
            age: 25,
            sex: Sex::Male,
            height_cm: 170.0,
            weight_kg: 70.0,
            smoker: Smoker::Yes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(Sex::Male.flag(), 1);
        assert_eq!(Sex::Female.flag(), 0);
        assert_eq!(Smoker::Yes.flag(), 1);
        assert_eq!(Smoker::No.flag(), 0);
    }

    #[test]
    fn test_deserialize_wire_form() {
        let json = r#"{"age":25,"sex":"Male","height_cm":170,"weight_kg":70.5,"smoker":"No"}"#;
        let input: PatientInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.age, 25);
        assert_eq!(input.sex, Sex::Male);
        assert_eq!(input.height_cm, 170.0);
        assert_eq!(input.weight_kg, 70.5);
        assert_eq!(input.smoker, Smoker::No);
    }

    #[test]
    fn test_rejects_unknown_sex() {
        let json = r#"{"age":25,"sex":"Other","height_cm":170,"weight_kg":70,"smoker":"No"}"#;
        assert!(serde_json::from_str::<PatientInput>(json).is_err());
    }
}
