use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::raw::{ParseIssue, RawFormData};
use crate::clinical::{ChestPainType, ClinicalInput, RestingEcg, Sex, StSlope};
use crate::fields::Field;
use crate::{CardioRiskError, CardioRiskResult};

/// Convert a validated form into a typed [`ClinicalInput`].
///
/// ST depression keeps its fractional part; every other field must be a
/// whole number. Anything that cannot be represented is reported as an
/// explicit error rather than a sentinel value.
pub fn process_form_data(raw: &RawFormData) -> CardioRiskResult<ClinicalInput> {
    Ok(ClinicalInput {
        age: whole(raw, Field::Age)?,
        sex: code::<Sex>(raw, Field::Sex)?,
        chest_pain_type: code::<ChestPainType>(raw, Field::ChestPainType)?,
        resting_bp: whole(raw, Field::RestingBp)?,
        cholesterol: whole(raw, Field::Cholesterol)?,
        fasting_blood_sugar_high: flag(raw, Field::FastingBloodSugarHigh)?,
        resting_ecg: code::<RestingEcg>(raw, Field::RestingEcg)?,
        max_heart_rate: whole(raw, Field::MaxHeartRate)?,
        exercise_induced_angina: flag(raw, Field::ExerciseInducedAngina)?,
        st_depression: decimal(raw, Field::StDepression)?,
        st_slope: code::<StSlope>(raw, Field::StSlope)?,
    })
}

fn conversion_error(field: Field, reason: impl Into<String>) -> CardioRiskError {
    CardioRiskError::Conversion {
        field: field.key().to_string(),
        reason: reason.into(),
    }
}

fn decimal(raw: &RawFormData, field: Field) -> CardioRiskResult<Decimal> {
    let value = raw.get(field).ok_or_else(|| CardioRiskError::MissingField {
        field: field.key().to_string(),
    })?;
    match value.parse() {
        Ok(d) => Ok(d),
        Err(ParseIssue::Blank) => Err(CardioRiskError::MissingField {
            field: field.key().to_string(),
        }),
        Err(ParseIssue::NotANumber) => Err(conversion_error(field, "Not a number.")),
        Err(ParseIssue::Overflow { .. }) => Err(conversion_error(field, "Number too large.")),
    }
}

fn whole(raw: &RawFormData, field: Field) -> CardioRiskResult<u32> {
    let d = decimal(raw, field)?;
    if !d.fract().is_zero() {
        return Err(conversion_error(field, format!("{} is not a whole number.", d)));
    }
    d.to_u32()
        .ok_or_else(|| conversion_error(field, format!("{} is not a non-negative integer.", d)))
}

fn code<T>(raw: &RawFormData, field: Field) -> CardioRiskResult<T>
where
    T: TryFrom<u8, Error = CardioRiskError>,
{
    let n = whole(raw, field)?;
    let code = u8::try_from(n)
        .map_err(|_| conversion_error(field, format!("{} is not a valid option code.", n)))?;
    T::try_from(code)
}

fn flag(raw: &RawFormData, field: Field) -> CardioRiskResult<bool> {
    match whole(raw, field)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(conversion_error(field, format!("{} is not 0 or 1.", other))),
    }
}
