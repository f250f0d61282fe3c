use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::fields::Field;

/// A single form-control value: either a JSON number or the string a form
/// control produced (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseIssue {
    Blank,
    NotANumber,
    /// A well-formed number too large in magnitude for a decimal.
    Overflow { negative: bool },
}

impl FieldValue {
    /// Parse into a decimal. Numeric zero is a value like any other.
    pub(crate) fn parse(&self) -> Result<Decimal, ParseIssue> {
        let text = match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.trim().to_string(),
        };
        if text.is_empty() {
            return Err(ParseIssue::Blank);
        }
        if !is_numeric_literal(&text) {
            return Err(ParseIssue::NotANumber);
        }
        if let Ok(d) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
            return Ok(d);
        }
        // Syntactically a number, but beyond what a decimal holds exactly.
        let approx: f64 = text.parse().map_err(|_| ParseIssue::NotANumber)?;
        match Decimal::from_f64(approx) {
            Some(d) if approx.is_finite() => Ok(d),
            _ => Err(ParseIssue::Overflow {
                negative: approx.is_sign_negative(),
            }),
        }
    }
}

/// Plain decimal or scientific notation: `[+-]digits[.digits][(e|E)[+-]digits]`.
fn is_numeric_literal(text: &str) -> bool {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = !(int.is_empty() && frac.is_empty()) && all_digits(int) && all_digits(frac);
    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e);
        !e.is_empty() && all_digits(e)
    });
    mantissa_ok && exponent_ok
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

/// The eleven raw form values as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFormData {
    pub age: Option<FieldValue>,
    pub sex: Option<FieldValue>,
    #[serde(rename = "chestPainType", alias = "chestPain")]
    pub chest_pain_type: Option<FieldValue>,
    #[serde(rename = "restingBP")]
    pub resting_bp: Option<FieldValue>,
    pub cholesterol: Option<FieldValue>,
    #[serde(rename = "fastingBloodSugarHigh", alias = "fastingBS")]
    pub fasting_blood_sugar_high: Option<FieldValue>,
    #[serde(rename = "restingECG")]
    pub resting_ecg: Option<FieldValue>,
    #[serde(rename = "maxHeartRate", alias = "maxHR")]
    pub max_heart_rate: Option<FieldValue>,
    #[serde(rename = "exerciseInducedAngina", alias = "exerciseAngina")]
    pub exercise_induced_angina: Option<FieldValue>,
    #[serde(rename = "stDepression", alias = "oldpeak")]
    pub st_depression: Option<FieldValue>,
    #[serde(rename = "stSlope")]
    pub st_slope: Option<FieldValue>,
}

impl RawFormData {
    /// A blank form: every field present as an empty string.
    pub fn empty() -> Self {
        let mut form = Self::default();
        for field in Field::ALL {
            form.set(field, "");
        }
        form
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder-style [`RawFormData::set`].
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    fn slot(&self, field: Field) -> &Option<FieldValue> {
        match field {
            Field::Age => &self.age,
            Field::Sex => &self.sex,
            Field::ChestPainType => &self.chest_pain_type,
            Field::RestingBp => &self.resting_bp,
            Field::Cholesterol => &self.cholesterol,
            Field::FastingBloodSugarHigh => &self.fasting_blood_sugar_high,
            Field::RestingEcg => &self.resting_ecg,
            Field::MaxHeartRate => &self.max_heart_rate,
            Field::ExerciseInducedAngina => &self.exercise_induced_angina,
            Field::StDepression => &self.st_depression,
            Field::StSlope => &self.st_slope,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<FieldValue> {
        match field {
            Field::Age => &mut self.age,
            Field::Sex => &mut self.sex,
            Field::ChestPainType => &mut self.chest_pain_type,
            Field::RestingBp => &mut self.resting_bp,
            Field::Cholesterol => &mut self.cholesterol,
            Field::FastingBloodSugarHigh => &mut self.fasting_blood_sugar_high,
            Field::RestingEcg => &mut self.resting_ecg,
            Field::MaxHeartRate => &mut self.max_heart_rate,
            Field::ExerciseInducedAngina => &mut self.exercise_induced_angina,
            Field::StDepression => &mut self.st_depression,
            Field::StSlope => &mut self.st_slope,
        }
    }
}
