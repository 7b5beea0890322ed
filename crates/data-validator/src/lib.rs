//! Patient Input Validation
//!
//! Enforces the intake form's input domains before any feature derivation
//! happens. The feature pipeline itself never re-checks these bounds.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
