use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::fields::Field;
use crate::{CardioRiskError, CardioRiskResult};

// ---------------------------------------------------------------------------
// Categorical codes
// ---------------------------------------------------------------------------

/// Implements the numeric-code round trip shared by every categorical field.
macro_rules! coded_enum {
    ($name:ident, $field:expr, { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl $name {
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = CardioRiskError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(CardioRiskError::Conversion {
                        field: $field.key().to_string(),
                        reason: format!("{} is not a valid option code.", other),
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sex {
    Female,
    Male,
}

coded_enum!(Sex, Field::Sex, { Female = 0, Male = 1 });

/// Chest pain category. Code 0 is the most angina-like presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

coded_enum!(ChestPainType, Field::ChestPainType, {
    TypicalAngina = 0,
    AtypicalAngina = 1,
    NonAnginalPain = 2,
    Asymptomatic = 3,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LvHypertrophy,
}

coded_enum!(RestingEcg, Field::RestingEcg, {
    Normal = 0,
    StTAbnormality = 1,
    LvHypertrophy = 2,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

coded_enum!(StSlope, Field::StSlope, {
    Upsloping = 0,
    Flat = 1,
    Downsloping = 2,
});

// ---------------------------------------------------------------------------
// ClinicalInput
// ---------------------------------------------------------------------------

/// One assessment's typed measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalInput {
    /// Years, domain [1, 120]
    pub age: u32,
    pub sex: Sex,
    #[serde(rename = "chestPainType", alias = "chestPain")]
    pub chest_pain_type: ChestPainType,
    /// mmHg, domain [80, 200]
    #[serde(rename = "restingBP")]
    pub resting_bp: u32,
    /// mg/dl, domain [100, 600]
    pub cholesterol: u32,
    /// Fasting blood sugar above 120 mg/dl
    #[serde(rename = "fastingBloodSugarHigh", alias = "fastingBS")]
    pub fasting_blood_sugar_high: bool,
    #[serde(rename = "restingECG")]
    pub resting_ecg: RestingEcg,
    /// bpm, domain [60, 220]
    #[serde(rename = "maxHeartRate", alias = "maxHR")]
    pub max_heart_rate: u32,
    #[serde(rename = "exerciseInducedAngina", alias = "exerciseAngina")]
    pub exercise_induced_angina: bool,
    /// Oldpeak, domain [0, 10]
    #[serde(rename = "stDepression", alias = "oldpeak")]
    pub st_depression: Decimal,
    #[serde(rename = "stSlope")]
    pub st_slope: StSlope,
}

impl ClinicalInput {
    /// Confirm every numeric measurement lies inside its declared domain.
    ///
    /// Reports the first offending field in form order.
    pub fn check_domain(&self) -> CardioRiskResult<()> {
        check_whole(Field::Age, self.age, 1, 120)?;
        check_whole(Field::RestingBp, self.resting_bp, 80, 200)?;
        check_whole(Field::Cholesterol, self.cholesterol, 100, 600)?;
        check_whole(Field::MaxHeartRate, self.max_heart_rate, 60, 220)?;

        if self.st_depression < Decimal::ZERO || self.st_depression > dec!(10) {
            return Err(CardioRiskError::InvalidInput {
                field: Field::StDepression.key().into(),
                reason: format!("{} is outside [0, 10].", self.st_depression),
            });
        }
        Ok(())
    }
}

fn check_whole(field: Field, value: u32, lo: u32, hi: u32) -> CardioRiskResult<()> {
    if value < lo || value > hi {
        return Err(CardioRiskError::InvalidInput {
            field: field.key().into(),
            reason: format!("{} is outside [{}, {}].", value, lo, hi),
        });
    }
    Ok(())
}
