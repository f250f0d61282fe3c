use serde::{Deserialize, Serialize};

use super::factors::{Impact, RiskFactor, BLOOD_PRESSURE, CHOLESTEROL};
use crate::types::Percentage;

/// Percentages strictly above this trigger the clinical-referral advice.
const REFERRAL_THRESHOLD: Percentage = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub icon: String,
    pub text: String,
}

impl Recommendation {
    fn new(icon: &str, text: &str) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.to_string(),
        }
    }
}

/// Evaluate the fixed rule list. Rules are independent; nothing is de-duplicated.
pub(crate) fn derive_recommendations(
    percentage: Percentage,
    factors: &[RiskFactor],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if percentage > REFERRAL_THRESHOLD {
        recs.push(Recommendation::new(
            "🚨",
            "Consult a cardiologist immediately for comprehensive evaluation",
        ));
        recs.push(Recommendation::new(
            "💊",
            "Consider medication management under medical supervision",
        ));
    }

    if factors.iter().any(|f| f.is(BLOOD_PRESSURE, Impact::High)) {
        recs.push(Recommendation::new(
            "🥗",
            "Adopt a low-sodium DASH diet to manage blood pressure",
        ));
    }

    if factors.iter().any(|f| f.name == CHOLESTEROL) {
        recs.push(Recommendation::new(
            "🏃",
            "Increase physical activity to 150 minutes/week moderate exercise",
        ));
        recs.push(Recommendation::new(
            "🐟",
            "Include omega-3 rich foods and reduce saturated fats",
        ));
    }

    recs.push(Recommendation::new(
        "🚭",
        "Avoid smoking and limit alcohol consumption",
    ));
    recs.push(Recommendation::new(
        "😴",
        "Maintain 7-8 hours of quality sleep per night",
    ));
    recs.push(Recommendation::new(
        "🧘",
        "Practice stress management techniques like meditation",
    ));

    recs
}
