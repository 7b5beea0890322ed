//! Profile Summary and Report Formatting

use chrono::{DateTime, Utc};
use feature_engine::{FeatureVector, PatientInput};
use inference_engine::CostEstimate;
use serde::Serialize;
use uuid::Uuid;

/// Shown under every report
pub const DISCLAIMER: &str =
    "This tool is for informational purposes only and does not constitute medical advice.";

/// Human-readable profile, as displayed next to the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// e.g. "25 yrs"
    pub age: String,
    /// BMI to one decimal
    pub bmi: String,
    pub sex: String,
    pub smoker: String,
}

impl ProfileSummary {
    pub fn new(input: &PatientInput, bmi: f64) -> Self {
        Self {
            age: format!("{} yrs", input.age),
            bmi: format!("{:.1}", bmi),
            sex: input.sex.to_string(),
            smoker: input.smoker.to_string(),
        }
    }
}

/// Prediction result returned to the form
#[derive(Debug, Clone, Serialize)]
pub struct MedicalReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub profile: ProfileSummary,
    pub features: FeatureVector,
    /// Estimated annual medical cost
    pub annual_cost: f64,
    /// e.g. "$12,345.67"
    pub annual_cost_display: String,
    pub disclaimer: &'static str,
}

impl MedicalReport {
    pub fn new(profile: ProfileSummary, features: FeatureVector, estimate: &CostEstimate) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            profile,
            features,
            annual_cost: estimate.annual_cost,
            annual_cost_display: format_currency(estimate.annual_cost),
            disclaimer: DISCLAIMER,
        }
    }
}

/// Format as dollars with thousands separators and two decimals.
///
/// Negative amounts keep the sign after the currency symbol ("$-12.50").
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("${}{}.{:02}", sign, grouped, fraction)
}
