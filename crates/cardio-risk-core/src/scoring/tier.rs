use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Percentage, Score};

/// Score at which the logistic curve crosses 50%.
const SIGMOID_MIDPOINT: Decimal = dec!(0.5);
/// Logistic steepness.
const SIGMOID_STEEPNESS: Decimal = dec!(10);

const MODERATE_FLOOR: Percentage = 30;
const HIGH_FLOOR: Percentage = 60;

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Tier a rounded percentage. Boundary values belong to the higher tier.
    pub fn from_percentage(percentage: Percentage) -> Self {
        if percentage < MODERATE_FLOOR {
            RiskLevel::Low
        } else if percentage < HIGH_FLOOR {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Moderate => "Moderate risk - Follow-up recommended",
            Self::High => "High risk - Consultation advised",
        }
    }

    /// Gauge colour used by renderers (RGB).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (74, 222, 128),     // green-400
            Self::Moderate => (250, 204, 21), // yellow-400
            Self::High => (248, 113, 113),   // red-400
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low Risk"),
            Self::Moderate => write!(f, "Moderate Risk"),
            Self::High => write!(f, "High Risk"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logistic transform
// ---------------------------------------------------------------------------

/// Taylor series exp(x) with range reduction for |x| > 2.
/// exp(x) = exp(x/2)^2 when |x| > 2, then Taylor with 25 terms.
fn exp_decimal(x: Decimal) -> Decimal {
    let two = dec!(2);

    if x > two || x < -two {
        let half = exp_decimal(x / two);
        return half * half;
    }

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1u32..=25 {
        term = term * x / Decimal::from(n);
        sum += term;
    }
    sum
}

/// Logistic squash of a raw score: 1 / (1 + e^(-10 (score - 0.5))).
pub fn sigmoid(score: Score) -> Decimal {
    let exponent = -SIGMOID_STEEPNESS * (score - SIGMOID_MIDPOINT);
    // Past ±60 the rounded percentage is already 0 or 100; keeps exp inside Decimal range.
    let exponent = exponent.clamp(dec!(-60), dec!(60));
    Decimal::ONE / (Decimal::ONE + exp_decimal(exponent))
}

/// Map a raw score to a whole percentage in 0..=100, rounding halves up.
pub fn sigmoid_percentage(score: Score) -> Percentage {
    let pct = (sigmoid(score) * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // The logistic output is strictly inside (0, 1), so this never clamps.
    pct.to_u8().unwrap_or(100).min(100)
}
