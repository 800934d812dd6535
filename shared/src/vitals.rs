//! Vital-sign measurement helpers for the clinical data-entry widgets
//!
//! Provides client-side computation for:
//! - Unit conversion between metric and imperial measurements
//! - Glucose unit conversion
//! - BMI calculation
//! - Blood-pressure classification
//! - Plausibility ranges for pulse and respiratory rate
//!
//! All arithmetic uses `Decimal` so displayed values survive round trips
//! through the data-entry forms without float drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Centimeters per inch (exact)
fn cm_per_inch() -> Decimal {
    Decimal::new(254, 2)
}

/// Kilograms per pound (exact, international avoirdupois)
fn kg_per_pound() -> Decimal {
    Decimal::new(45359237, 8)
}

/// mg/dL per mmol/L for glucose (molar mass of glucose / 10)
fn glucose_factor() -> Decimal {
    Decimal::new(18016, 3)
}

// ============================================================================
// Length
// ============================================================================

/// Convert centimeters to inches
pub fn cm_to_inches(cm: Decimal) -> Decimal {
    cm / cm_per_inch()
}

/// Convert inches to centimeters
pub fn inches_to_cm(inches: Decimal) -> Decimal {
    inches * cm_per_inch()
}

/// Height in feet and remaining inches, as displayed by the height widget
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeetInches {
    pub feet: i64,
    pub inches: Decimal,
}

/// Split a height in centimeters into whole feet plus remaining inches
pub fn cm_to_feet_inches(cm: Decimal) -> FeetInches {
    let total_inches = cm_to_inches(cm);
    let feet = (total_inches / Decimal::from(12)).trunc();
    let inches = total_inches - feet * Decimal::from(12);
    FeetInches {
        feet: feet.to_i64().unwrap_or(0),
        inches,
    }
}

/// Combine feet and inches back into centimeters
pub fn feet_inches_to_cm(value: FeetInches) -> Decimal {
    inches_to_cm(Decimal::from(value.feet) * Decimal::from(12) + value.inches)
}

// ============================================================================
// Weight
// ============================================================================

/// Convert kilograms to pounds
pub fn kg_to_pounds(kg: Decimal) -> Decimal {
    kg / kg_per_pound()
}

/// Convert pounds to kilograms
pub fn pounds_to_kg(pounds: Decimal) -> Decimal {
    pounds * kg_per_pound()
}

// ============================================================================
// Temperature
// ============================================================================

/// Convert degrees Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(celsius: Decimal) -> Decimal {
    celsius * Decimal::from(9) / Decimal::from(5) + Decimal::from(32)
}

/// Convert degrees Fahrenheit to Celsius
pub fn fahrenheit_to_celsius(fahrenheit: Decimal) -> Decimal {
    (fahrenheit - Decimal::from(32)) * Decimal::from(5) / Decimal::from(9)
}

// ============================================================================
// Glucose
// ============================================================================

/// Convert blood glucose from mmol/L to mg/dL
pub fn mmol_l_to_mg_dl(mmol_l: Decimal) -> Decimal {
    mmol_l * glucose_factor()
}

/// Convert blood glucose from mg/dL to mmol/L
pub fn mg_dl_to_mmol_l(mg_dl: Decimal) -> Decimal {
    mg_dl / glucose_factor()
}

// ============================================================================
// Derived Measurements
// ============================================================================

/// Body mass index from weight in kilograms and height in centimeters.
///
/// Returns `None` for non-positive height.
pub fn bmi(weight_kg: Decimal, height_cm: Decimal) -> Option<Decimal> {
    if height_cm <= Decimal::ZERO {
        return None;
    }
    let height_m = height_cm / Decimal::from(100);
    Some((weight_kg / (height_m * height_m)).round_dp(1))
}

/// Blood-pressure category per the 2017 ACC/AHA bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
    HypertensiveCrisis,
}

/// Classify a systolic/diastolic reading in mmHg
pub fn classify_blood_pressure(systolic: u32, diastolic: u32) -> BloodPressureCategory {
    if systolic > 180 || diastolic > 120 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::HypertensionStage2
    } else if systolic >= 130 || diastolic >= 80 {
        BloodPressureCategory::HypertensionStage1
    } else if systolic >= 120 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

/// True if a resting adult pulse is within the expected 60-100 bpm band
pub fn pulse_in_normal_range(bpm: u32) -> bool {
    (60..=100).contains(&bpm)
}

/// True if an adult respiratory rate is within the expected 12-20 band
pub fn respiratory_rate_in_normal_range(breaths_per_min: u32) -> bool {
    (12..=20).contains(&breaths_per_min)
}
