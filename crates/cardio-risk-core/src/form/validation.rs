use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::raw::{ParseIssue, RawFormData};
use crate::fields::Field;
use crate::{CardioRiskError, CardioRiskResult};

/// Key of the aggregate message set whenever any field is missing.
pub const GENERAL_KEY: &str = "general";
const GENERAL_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IssueKind {
    /// Absent, blank, or not a usable number.
    Missing,
    /// Present but outside the catalog bounds.
    OutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: Field,
    #[serde(flatten)]
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn to_error(&self) -> CardioRiskError {
        match &self.kind {
            IssueKind::Missing => CardioRiskError::MissingField {
                field: self.field.key().to_string(),
            },
            IssueKind::OutOfRange { value, min, max } => CardioRiskError::OutOfRange {
                field: self.field.key().to_string(),
                value: *value,
                min: *min,
                max: *max,
            },
        }
    }
}

/// Outcome of validating one submitted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Field key → message, plus `general` when anything is missing.
    pub errors: BTreeMap<String, String>,
    pub missing_fields: Vec<Field>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let mut errors: BTreeMap<String, String> = issues
            .iter()
            .map(|i| (i.field.key().to_string(), i.message.clone()))
            .collect();
        let missing_fields: Vec<Field> = issues
            .iter()
            .filter(|i| i.kind == IssueKind::Missing)
            .map(|i| i.field)
            .collect();
        if !missing_fields.is_empty() {
            errors.insert(GENERAL_KEY.to_string(), GENERAL_MESSAGE.to_string());
        }
        Self {
            is_valid: issues.is_empty(),
            errors,
            missing_fields,
            issues,
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(field.key()).map(String::as_str)
    }

    pub fn general_error(&self) -> Option<&str> {
        self.errors.get(GENERAL_KEY).map(String::as_str)
    }

    pub fn into_result(self) -> CardioRiskResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CardioRiskError::ValidationFailed(Box::new(self)))
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid {
            return write!(f, "all fields valid");
        }
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Check every field for presence, parseability and catalog bounds.
///
/// Select fields are only checked for presence; their option codes are
/// checked when the form is converted.
pub fn validate_form(raw: &RawFormData) -> ValidationReport {
    let issues: Vec<ValidationIssue> = Field::ALL
        .iter()
        .filter_map(|&field| check_field(raw, field))
        .collect();

    let report = ValidationReport::from_issues(issues);
    if !report.is_valid {
        let fields: Vec<&str> = report.issues.iter().map(|i| i.field.key()).collect();
        debug!(?fields, "form validation failed");
    }
    report
}

fn check_field(raw: &RawFormData, field: Field) -> Option<ValidationIssue> {
    let missing = |message: String| ValidationIssue {
        field,
        kind: IssueKind::Missing,
        message,
    };

    let value = match raw.get(field).map(|v| v.parse()) {
        None | Some(Err(ParseIssue::Blank)) => {
            return Some(missing(format!("{} is required", field.label())))
        }
        Some(Err(ParseIssue::NotANumber)) => {
            return Some(missing(format!("{} must be a number", field.label())))
        }
        // Too large to hold: saturate so the range check reports it.
        Some(Err(ParseIssue::Overflow { negative: true })) => Decimal::MIN,
        Some(Err(ParseIssue::Overflow { negative: false })) => Decimal::MAX,
        Some(Ok(value)) => value,
    };

    if field.is_integer() && !value.fract().is_zero() {
        return Some(missing(format!("{} must be a whole number", field.label())));
    }

    let (min, max) = field.descriptor().bounds()?;
    if value < min || value > max {
        return Some(ValidationIssue {
            field,
            kind: IssueKind::OutOfRange { value, min, max },
            message: range_message(field, min, max),
        });
    }
    None
}

fn range_message(field: Field, min: Decimal, max: Decimal) -> String {
    let (subject, unit) = match field {
        Field::RestingBp => ("Blood pressure", " mmHg"),
        Field::Cholesterol => ("Cholesterol", " mg/dl"),
        Field::MaxHeartRate => ("Max heart rate", " bpm"),
        other => (other.label(), ""),
    };
    format!("{} must be between {} and {}{}", subject, min, max, unit)
}
