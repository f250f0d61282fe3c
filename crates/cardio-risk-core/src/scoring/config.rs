use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Weight;
use crate::{CardioRiskError, CardioRiskResult};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-feature weights of the linear risk score.
///
/// The default table sums to 1.30 rather than 1 so that no single maxed-out
/// feature saturates the logistic transform on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub age: Weight,
    pub sex: Weight,
    pub chest_pain: Weight,
    #[serde(rename = "restingBP")]
    pub resting_bp: Weight,
    pub cholesterol: Weight,
    #[serde(rename = "fastingBS")]
    pub fasting_bs: Weight,
    #[serde(rename = "restingECG")]
    pub resting_ecg: Weight,
    #[serde(rename = "maxHR")]
    pub max_hr: Weight,
    pub exercise_angina: Weight,
    pub oldpeak: Weight,
    pub st_slope: Weight,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            age: dec!(0.15),
            sex: dec!(0.12),
            chest_pain: dec!(0.18),
            resting_bp: dec!(0.08),
            cholesterol: dec!(0.10),
            fasting_bs: dec!(0.06),
            resting_ecg: dec!(0.07),
            max_hr: dec!(0.13),
            exercise_angina: dec!(0.16),
            oldpeak: dec!(0.14),
            st_slope: dec!(0.11),
        }
    }
}

impl Weights {
    pub fn total(&self) -> Decimal {
        self.named().iter().map(|(_, w)| *w).sum()
    }

    fn named(&self) -> [(&'static str, Weight); 11] {
        [
            ("age", self.age),
            ("sex", self.sex),
            ("chestPain", self.chest_pain),
            ("restingBP", self.resting_bp),
            ("cholesterol", self.cholesterol),
            ("fastingBS", self.fasting_bs),
            ("restingECG", self.resting_ecg),
            ("maxHR", self.max_hr),
            ("exerciseAngina", self.exercise_angina),
            ("oldpeak", self.oldpeak),
            ("stSlope", self.st_slope),
        ]
    }
}

// ---------------------------------------------------------------------------
// Reference ranges
// ---------------------------------------------------------------------------

/// Min–max reference range used to rescale a continuous measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub lo: Decimal,
    pub hi: Decimal,
}

impl ReferenceRange {
    pub const fn new(lo: Decimal, hi: Decimal) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.lo && value <= self.hi
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRanges {
    pub age: ReferenceRange,
    #[serde(rename = "restingBP")]
    pub resting_bp: ReferenceRange,
    pub cholesterol: ReferenceRange,
    #[serde(rename = "maxHR")]
    pub max_hr: ReferenceRange,
    pub oldpeak: ReferenceRange,
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            age: ReferenceRange::new(dec!(20), dec!(80)),
            resting_bp: ReferenceRange::new(dec!(80), dec!(200)),
            cholesterol: ReferenceRange::new(dec!(100), dec!(600)),
            max_hr: ReferenceRange::new(dec!(60), dec!(220)),
            oldpeak: ReferenceRange::new(dec!(0), dec!(6)),
        }
    }
}

impl ReferenceRanges {
    fn named(&self) -> [(&'static str, ReferenceRange); 5] {
        [
            ("age", self.age),
            ("restingBP", self.resting_bp),
            ("cholesterol", self.cholesterol),
            ("maxHR", self.max_hr),
            ("oldpeak", self.oldpeak),
        ]
    }
}

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

/// Read-only configuration handed to a [`super::RiskEngine`] at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub ranges: ReferenceRanges,
}

impl ScoringConfig {
    pub fn validate(&self) -> CardioRiskResult<()> {
        for (name, weight) in self.weights.named() {
            if weight < Decimal::ZERO {
                return Err(CardioRiskError::InvalidConfig {
                    parameter: format!("weights.{}", name),
                    reason: format!("Weight must be non-negative, got {}.", weight),
                });
            }
        }
        for (name, range) in self.ranges.named() {
            if range.hi <= range.lo {
                return Err(CardioRiskError::InvalidConfig {
                    parameter: format!("ranges.{}", name),
                    reason: format!(
                        "Upper bound {} must exceed lower bound {}.",
                        range.hi, range.lo
                    ),
                });
            }
        }
        Ok(())
    }
}
