//! The eleven clinical fields collected by the assessment form, and the
//! fixed catalog of form metadata (labels, input kinds, bounds, options)
//! the validator's range checks are derived from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::CardioRiskError;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "sex")]
    Sex,
    #[serde(rename = "chestPainType", alias = "chestPain")]
    ChestPainType,
    #[serde(rename = "restingBP")]
    RestingBp,
    #[serde(rename = "cholesterol")]
    Cholesterol,
    #[serde(rename = "fastingBloodSugarHigh", alias = "fastingBS")]
    FastingBloodSugarHigh,
    #[serde(rename = "restingECG")]
    RestingEcg,
    #[serde(rename = "maxHeartRate", alias = "maxHR")]
    MaxHeartRate,
    #[serde(rename = "exerciseInducedAngina", alias = "exerciseAngina")]
    ExerciseInducedAngina,
    #[serde(rename = "stDepression", alias = "oldpeak")]
    StDepression,
    #[serde(rename = "stSlope")]
    StSlope,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Sex,
        Field::ChestPainType,
        Field::RestingBp,
        Field::Cholesterol,
        Field::FastingBloodSugarHigh,
        Field::RestingEcg,
        Field::MaxHeartRate,
        Field::ExerciseInducedAngina,
        Field::StDepression,
        Field::StSlope,
    ];

    /// Wire name used in form payloads and error maps.
    pub fn key(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Sex => "sex",
            Field::ChestPainType => "chestPainType",
            Field::RestingBp => "restingBP",
            Field::Cholesterol => "cholesterol",
            Field::FastingBloodSugarHigh => "fastingBloodSugarHigh",
            Field::RestingEcg => "restingECG",
            Field::MaxHeartRate => "maxHeartRate",
            Field::ExerciseInducedAngina => "exerciseInducedAngina",
            Field::StDepression => "stDepression",
            Field::StSlope => "stSlope",
        }
    }

    /// Key the original web form used for this field, where it differs.
    fn legacy_key(self) -> Option<&'static str> {
        match self {
            Field::ChestPainType => Some("chestPain"),
            Field::FastingBloodSugarHigh => Some("fastingBS"),
            Field::MaxHeartRate => Some("maxHR"),
            Field::ExerciseInducedAngina => Some("exerciseAngina"),
            Field::StDepression => Some("oldpeak"),
            _ => None,
        }
    }

    /// Human-readable label, without the form's decorative glyph.
    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Sex => "Sex",
            Field::ChestPainType => "Chest Pain Type",
            Field::RestingBp => "Resting Blood Pressure",
            Field::Cholesterol => "Cholesterol Level",
            Field::FastingBloodSugarHigh => "Fasting Blood Sugar",
            Field::RestingEcg => "Resting ECG",
            Field::MaxHeartRate => "Max Heart Rate",
            Field::ExerciseInducedAngina => "Exercise Induced Angina",
            Field::StDepression => "ST Depression",
            Field::StSlope => "ST Slope",
        }
    }

    /// Every field is a whole number except ST depression.
    pub fn is_integer(self) -> bool {
        !matches!(self, Field::StDepression)
    }

    pub fn descriptor(self) -> FieldDescriptor {
        build_descriptor(self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = CardioRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s || f.legacy_key() == Some(s))
            .ok_or_else(|| CardioRiskError::InvalidInput {
                field: s.to_string(),
                reason: "Unknown field name.".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Number,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Form metadata for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: Field,
    pub label: String,
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Decimal>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<SelectOption>,
}

impl FieldDescriptor {
    /// Inclusive `(min, max)` bounds, present only for numeric inputs.
    pub fn bounds(&self) -> Option<(Decimal, Decimal)> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        }
    }
}

/// The full catalog, in form order.
pub fn field_catalog() -> Vec<FieldDescriptor> {
    Field::ALL.iter().map(|f| f.descriptor()).collect()
}

fn number(field: Field, placeholder: &str, min: Decimal, max: Decimal) -> FieldDescriptor {
    FieldDescriptor {
        field,
        label: field.label().to_string(),
        kind: InputKind::Number,
        placeholder: Some(placeholder.to_string()),
        min: Some(min),
        max: Some(max),
        step: None,
        options: Vec::new(),
    }
}

fn select(field: Field, options: &[(&str, &str)]) -> FieldDescriptor {
    FieldDescriptor {
        field,
        label: field.label().to_string(),
        kind: InputKind::Select,
        placeholder: None,
        min: None,
        max: None,
        step: None,
        options: options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

fn build_descriptor(field: Field) -> FieldDescriptor {
    match field {
        Field::Age => number(field, "Enter your age", dec!(1), dec!(120)),
        Field::Sex => select(field, &[("1", "Male"), ("0", "Female")]),
        Field::ChestPainType => select(
            field,
            &[
                ("0", "Typical Angina"),
                ("1", "Atypical Angina"),
                ("2", "Non-Anginal Pain"),
                ("3", "Asymptomatic"),
            ],
        ),
        Field::RestingBp => number(field, "mmHg", dec!(80), dec!(200)),
        Field::Cholesterol => number(field, "mg/dl", dec!(100), dec!(600)),
        Field::FastingBloodSugarHigh => {
            select(field, &[("0", "≤ 120 mg/dl"), ("1", "> 120 mg/dl")])
        }
        Field::RestingEcg => select(
            field,
            &[
                ("0", "Normal"),
                ("1", "ST-T Wave Abnormality"),
                ("2", "Left Ventricular Hypertrophy"),
            ],
        ),
        Field::MaxHeartRate => number(field, "bpm", dec!(60), dec!(220)),
        Field::ExerciseInducedAngina => select(field, &[("0", "No"), ("1", "Yes")]),
        Field::StDepression => FieldDescriptor {
            step: Some(dec!(0.1)),
            ..number(field, "0.0 - 10.0", dec!(0), dec!(10))
        },
        Field::StSlope => select(
            field,
            &[("0", "Upsloping"), ("1", "Flat"), ("2", "Downsloping")],
        ),
    }
}
