use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::{ReferenceRange, ScoringConfig};
use super::factors::{banded, Impact, RiskFactor, BLOOD_PRESSURE, CHOLESTEROL};
use super::recommendations::{derive_recommendations, Recommendation};
use super::tier::{sigmoid_percentage, RiskLevel};
use crate::clinical::{ChestPainType, ClinicalInput, RestingEcg, Sex, StSlope};
use crate::types::{Percentage, Score, Weight};
use crate::CardioRiskResult;

/// Each chest-pain category code adds this fraction of the chest-pain weight.
const CHEST_PAIN_STEP: Decimal = dec!(0.33);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub risk_percentage: Percentage,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
}

/// One feature's share of the raw score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub feature: String,
    /// Feature value on the weight's scale (0–1 for in-range values).
    pub normalized: Decimal,
    pub weight: Weight,
    pub contribution: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub raw_score: Score,
    pub contributions: Vec<Contribution>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Deterministic rule-based scorer. Holds its configuration immutably, so a
/// single engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: ScoringConfig,
}

struct Evaluation {
    raw_score: Score,
    contributions: Vec<Contribution>,
    factors: Vec<RiskFactor>,
}

impl Evaluation {
    fn add(&mut self, feature: &str, normalized: Decimal, weight: Weight) {
        let contribution = normalized * weight;
        trace!(feature, %normalized, %weight, %contribution, "score contribution");
        self.raw_score += contribution;
        self.contributions.push(Contribution {
            feature: feature.to_string(),
            normalized,
            weight,
            contribution,
        });
    }

    fn flag(&mut self, name: &str, impact: Impact, value: impl Into<String>) {
        self.factors.push(RiskFactor::new(name, impact, value));
    }
}

/// Linear min–max rescale against a reference range. Not clamped.
pub fn normalize(value: Decimal, range: &ReferenceRange) -> Decimal {
    (value - range.lo) / (range.hi - range.lo)
}

impl RiskEngine {
    pub fn new(config: ScoringConfig) -> CardioRiskResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one assessment.
    ///
    /// Fails with `InvalidInput` naming the field when a measurement lies
    /// outside its declared domain; never returns a partial result.
    pub fn calculate_risk(&self, input: &ClinicalInput) -> CardioRiskResult<RiskResult> {
        input.check_domain()?;

        let eval = self.evaluate(input);
        let risk_percentage = sigmoid_percentage(eval.raw_score);
        let risk_level = RiskLevel::from_percentage(risk_percentage);
        let recommendations = derive_recommendations(risk_percentage, &eval.factors);

        debug!(
            raw_score = %eval.raw_score,
            risk_percentage,
            %risk_level,
            factors = eval.factors.len(),
            "risk calculated"
        );

        Ok(RiskResult {
            risk_percentage,
            risk_level,
            risk_factors: eval.factors,
            recommendations,
        })
    }

    /// The eleven weighted contributions behind a score, in evaluation order.
    pub fn score_breakdown(&self, input: &ClinicalInput) -> CardioRiskResult<ScoreBreakdown> {
        input.check_domain()?;
        let eval = self.evaluate(input);
        Ok(ScoreBreakdown {
            raw_score: eval.raw_score,
            contributions: eval.contributions,
        })
    }

    /// Notes for continuous values outside their normalization reference range,
    /// whose contribution is therefore outside [0, weight].
    pub fn reference_range_warnings(&self, input: &ClinicalInput) -> Vec<String> {
        let ranges = &self.config.ranges;
        let checks = [
            ("age", Decimal::from(input.age), &ranges.age),
            ("restingBP", Decimal::from(input.resting_bp), &ranges.resting_bp),
            ("cholesterol", Decimal::from(input.cholesterol), &ranges.cholesterol),
            ("maxHeartRate", Decimal::from(input.max_heart_rate), &ranges.max_hr),
            ("stDepression", input.st_depression, &ranges.oldpeak),
        ];

        checks
            .iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(name, value, range)| {
                format!(
                    "{} = {} is outside the reference range [{}, {}]; its contribution is not clamped.",
                    name,
                    value.normalize(),
                    range.lo,
                    range.hi
                )
            })
            .collect()
    }

    fn evaluate(&self, input: &ClinicalInput) -> Evaluation {
        let w = &self.config.weights;
        let r = &self.config.ranges;
        let mut eval = Evaluation {
            raw_score: Decimal::ZERO,
            contributions: Vec::with_capacity(11),
            factors: Vec::new(),
        };

        // 1. Age
        eval.add("age", normalize(Decimal::from(input.age), &r.age), w.age);
        if let Some(impact) = banded(input.age, 55, 45) {
            eval.flag("Age", impact, format!("{} years", input.age));
        }

        // 2. Sex
        let male = input.sex == Sex::Male;
        eval.add("sex", indicator(male), w.sex);
        if male {
            eval.flag("Sex", Impact::Medium, "Male");
        }

        // 3. Chest pain: scored as rising with the code, flagged for the two
        // lowest (most angina-like) codes.
        let cp_code = input.chest_pain_type.code();
        eval.add(
            "chestPainType",
            Decimal::from(cp_code) * CHEST_PAIN_STEP,
            w.chest_pain,
        );
        if matches!(
            input.chest_pain_type,
            ChestPainType::TypicalAngina | ChestPainType::AtypicalAngina
        ) {
            eval.flag("Chest Pain", Impact::High, "Angina symptoms");
        }

        // 4. Resting blood pressure
        eval.add(
            "restingBP",
            normalize(Decimal::from(input.resting_bp), &r.resting_bp),
            w.resting_bp,
        );
        if let Some(impact) = banded(input.resting_bp, 140, 120) {
            eval.flag(BLOOD_PRESSURE, impact, format!("{} mmHg", input.resting_bp));
        }

        // 5. Cholesterol
        eval.add(
            "cholesterol",
            normalize(Decimal::from(input.cholesterol), &r.cholesterol),
            w.cholesterol,
        );
        if let Some(impact) = banded(input.cholesterol, 240, 200) {
            eval.flag(CHOLESTEROL, impact, format!("{} mg/dl", input.cholesterol));
        }

        // 6. Fasting blood sugar
        eval.add(
            "fastingBloodSugarHigh",
            indicator(input.fasting_blood_sugar_high),
            w.fasting_bs,
        );
        if input.fasting_blood_sugar_high {
            eval.flag("Blood Sugar", Impact::Medium, "> 120 mg/dl");
        }

        // 7. Resting ECG: both abnormal categories are reported the same way.
        let ecg_code = input.resting_ecg.code();
        eval.add(
            "restingECG",
            Decimal::from(ecg_code) / dec!(2),
            w.resting_ecg,
        );
        if input.resting_ecg != RestingEcg::Normal {
            eval.flag("ECG", Impact::Medium, "Abnormal");
        }

        // 8. Max heart rate, inverted: lower peak rate means higher risk.
        eval.add(
            "maxHeartRate",
            Decimal::ONE - normalize(Decimal::from(input.max_heart_rate), &r.max_hr),
            w.max_hr,
        );
        if input.max_heart_rate < 120 {
            eval.flag(
                "Max Heart Rate",
                Impact::Medium,
                format!("{} bpm", input.max_heart_rate),
            );
        }

        // 9. Exercise-induced angina
        eval.add(
            "exerciseInducedAngina",
            indicator(input.exercise_induced_angina),
            w.exercise_angina,
        );
        if input.exercise_induced_angina {
            eval.flag("Exercise Angina", Impact::High, "Present");
        }

        // 10. ST depression
        eval.add(
            "stDepression",
            normalize(input.st_depression, &r.oldpeak),
            w.oldpeak,
        );
        if let Some(impact) = banded(input.st_depression, dec!(2), dec!(1)) {
            eval.flag(
                "ST Depression",
                impact,
                input.st_depression.normalize().to_string(),
            );
        }

        // 11. ST slope
        let slope_share = match input.st_slope {
            StSlope::Downsloping => Decimal::ONE,
            StSlope::Flat => dec!(0.5),
            StSlope::Upsloping => Decimal::ZERO,
        };
        eval.add("stSlope", slope_share, w.st_slope);
        match input.st_slope {
            StSlope::Downsloping => eval.flag("ST Slope", Impact::High, "Downsloping"),
            StSlope::Flat => eval.flag("ST Slope", Impact::Medium, "Flat"),
            StSlope::Upsloping => {}
        }

        eval
    }
}

fn indicator(present: bool) -> Decimal {
    if present {
        Decimal::ONE
    } else {
        Decimal::ZERO
    }
}

/// Score with the default weight table.
pub fn calculate_risk(input: &ClinicalInput) -> CardioRiskResult<RiskResult> {
    RiskEngine::default().calculate_risk(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardioRiskError;
    use pretty_assertions::assert_eq;

    fn high_risk_input() -> ClinicalInput {
        ClinicalInput {
            age: 60,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::TypicalAngina,
            resting_bp: 150,
            cholesterol: 260,
            fasting_blood_sugar_high: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 100,
            exercise_induced_angina: true,
            st_depression: dec!(2.5),
            st_slope: StSlope::Downsloping,
        }
    }

    fn low_risk_input() -> ClinicalInput {
        ClinicalInput {
            age: 25,
            sex: Sex::Female,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_bp: 110,
            cholesterol: 150,
            fasting_blood_sugar_high: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 180,
            exercise_induced_angina: false,
            st_depression: dec!(0),
            st_slope: StSlope::Upsloping,
        }
    }

    fn factor_tags(result: &RiskResult) -> Vec<(&str, Impact)> {
        result
            .risk_factors
            .iter()
            .map(|f| (f.name.as_str(), f.impact))
            .collect()
    }

    #[test]
    fn test_normalize_is_unclamped() {
        let range = ReferenceRange::new(dec!(0), dec!(6));
        assert_eq!(normalize(dec!(3), &range), dec!(0.5));
        assert!(normalize(dec!(9), &range) > Decimal::ONE);
        assert!(normalize(dec!(-1), &range) < Decimal::ZERO);
    }

    #[test]
    fn test_high_risk_scenario() {
        let result = calculate_risk(&high_risk_input()).unwrap();

        // 0.1 + 0.12 + 0 + 0.04667 + 0.032 + 0.0975 + 0.16 + 0.05833 + 0.11 = 0.7245
        assert_eq!(result.risk_percentage, 90);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            factor_tags(&result),
            vec![
                ("Age", Impact::High),
                ("Sex", Impact::Medium),
                ("Chest Pain", Impact::High),
                ("Blood Pressure", Impact::High),
                ("Cholesterol", Impact::High),
                ("Max Heart Rate", Impact::Medium),
                ("Exercise Angina", Impact::High),
                ("ST Depression", Impact::High),
                ("ST Slope", Impact::High),
            ]
        );
        assert_eq!(result.recommendations.len(), 8);
        assert_eq!(result.recommendations[0].icon, "🚨");
        assert_eq!(result.recommendations[2].icon, "🥗");
    }

    #[test]
    fn test_low_risk_scenario() {
        let result = calculate_risk(&low_risk_input()).unwrap();
        assert_eq!(result.risk_percentage, 8);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.risk_factors.is_empty());
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_factor_display_values() {
        let result = calculate_risk(&high_risk_input()).unwrap();
        let values: Vec<&str> = result.risk_factors.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(
            values,
            vec![
                "60 years",
                "Male",
                "Angina symptoms",
                "150 mmHg",
                "260 mg/dl",
                "100 bpm",
                "Present",
                "2.5",
                "Downsloping",
            ]
        );
    }

    #[test]
    fn test_blood_pressure_boundary_is_strict() {
        let at_140 = ClinicalInput {
            resting_bp: 140,
            ..low_risk_input()
        };
        let at_141 = ClinicalInput {
            resting_bp: 141,
            ..low_risk_input()
        };
        let bp = |input: &ClinicalInput| {
            calculate_risk(input)
                .unwrap()
                .risk_factors
                .into_iter()
                .find(|f| f.name == "Blood Pressure")
                .map(|f| f.impact)
        };
        assert_eq!(bp(&at_140), Some(Impact::Medium));
        assert_eq!(bp(&at_141), Some(Impact::High));
        assert_eq!(
            bp(&ClinicalInput {
                resting_bp: 120,
                ..low_risk_input()
            }),
            None
        );
    }

    #[test]
    fn test_age_bands() {
        let age = |age: u32| {
            calculate_risk(&ClinicalInput { age, ..low_risk_input() })
                .unwrap()
                .risk_factors
                .into_iter()
                .find(|f| f.name == "Age")
                .map(|f| f.impact)
        };
        assert_eq!(age(45), None);
        assert_eq!(age(46), Some(Impact::Medium));
        assert_eq!(age(55), Some(Impact::Medium));
        assert_eq!(age(56), Some(Impact::High));
    }

    #[test]
    fn test_chest_pain_score_and_flag_disagree_on_severity() {
        // Category 3 adds the most score yet raises no flag; category 0 adds
        // nothing yet is flagged high.
        let engine = RiskEngine::default();
        let asymptomatic = engine.score_breakdown(&low_risk_input()).unwrap();
        let typical = engine
            .score_breakdown(&ClinicalInput {
                chest_pain_type: ChestPainType::TypicalAngina,
                ..low_risk_input()
            })
            .unwrap();
        assert_eq!(asymptomatic.contributions[2].contribution, dec!(0.1782));
        assert_eq!(typical.contributions[2].contribution, Decimal::ZERO);
        assert!(asymptomatic.raw_score > typical.raw_score);

        let flagged = calculate_risk(&ClinicalInput {
            chest_pain_type: ChestPainType::AtypicalAngina,
            ..low_risk_input()
        })
        .unwrap();
        assert_eq!(factor_tags(&flagged), vec![("Chest Pain", Impact::High)]);
        let unflagged = calculate_risk(&ClinicalInput {
            chest_pain_type: ChestPainType::NonAnginalPain,
            ..low_risk_input()
        })
        .unwrap();
        assert!(unflagged.risk_factors.is_empty());
    }

    #[test]
    fn test_st_depression_above_reference_range_is_not_clamped() {
        let engine = RiskEngine::default();
        let input = ClinicalInput {
            st_depression: dec!(9),
            ..low_risk_input()
        };
        let breakdown = engine.score_breakdown(&input).unwrap();
        let st = &breakdown.contributions[9];
        assert_eq!(st.feature, "stDepression");
        assert_eq!(st.normalized, dec!(1.5));
        assert_eq!(st.contribution, dec!(0.21));
        assert_eq!(engine.reference_range_warnings(&input).len(), 1);
    }

    #[test]
    fn test_breakdown_sums_to_raw_score() {
        let breakdown = RiskEngine::default()
            .score_breakdown(&high_risk_input())
            .unwrap();
        assert_eq!(breakdown.contributions.len(), 11);
        let total: Decimal = breakdown.contributions.iter().map(|c| c.contribution).sum();
        assert_eq!(total, breakdown.raw_score);
        assert!((breakdown.raw_score - dec!(0.7245)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_ecg_abnormal_categories_report_identically() {
        let engine = RiskEngine::default();
        for ecg in [RestingEcg::StTAbnormality, RestingEcg::LvHypertrophy] {
            let result = engine
                .calculate_risk(&ClinicalInput {
                    resting_ecg: ecg,
                    ..low_risk_input()
                })
                .unwrap();
            assert_eq!(
                result.risk_factors,
                vec![RiskFactor::new("ECG", Impact::Medium, "Abnormal")]
            );
        }
    }

    #[test]
    fn test_out_of_domain_input_is_rejected() {
        let input = ClinicalInput {
            cholesterol: 700,
            ..low_risk_input()
        };
        match calculate_risk(&input) {
            Err(CardioRiskError::InvalidInput { field, .. }) => assert_eq!(field, "cholesterol"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let engine = RiskEngine::default();
        let a = serde_json::to_string(&engine.calculate_risk(&high_risk_input()).unwrap()).unwrap();
        let b = serde_json::to_string(&engine.calculate_risk(&high_risk_input()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_config_changes_score() {
        let mut config = ScoringConfig::default();
        config.weights.sex = Decimal::ZERO;
        let engine = RiskEngine::new(config).unwrap();
        let default = calculate_risk(&high_risk_input()).unwrap();
        let custom = engine.calculate_risk(&high_risk_input()).unwrap();
        assert!(custom.risk_percentage < default.risk_percentage);
        // Factor derivation does not depend on weights.
        assert_eq!(custom.risk_factors, default.risk_factors);
    }

    fn factor(input: ClinicalInput, name: &str) -> Option<RiskFactor> {
        calculate_risk(&input)
            .unwrap()
            .risk_factors
            .into_iter()
            .find(|f| f.name == name)
    }

    #[test]
    fn test_blood_sugar_factor() {
        let flagged = factor(
            ClinicalInput {
                fasting_blood_sugar_high: true,
                ..low_risk_input()
            },
            "Blood Sugar",
        )
        .unwrap();
        assert_eq!(flagged.impact, Impact::Medium);
        assert_eq!(flagged.value, "> 120 mg/dl");
        assert_eq!(factor(low_risk_input(), "Blood Sugar"), None);
    }

    #[test]
    fn test_st_depression_bands() {
        let band = |st_depression: Decimal| {
            factor(
                ClinicalInput {
                    st_depression,
                    ..low_risk_input()
                },
                "ST Depression",
            )
            .map(|f| (f.impact, f.value))
        };
        assert_eq!(band(dec!(1)), None);
        assert_eq!(band(dec!(1.1)), Some((Impact::Medium, "1.1".to_string())));
        assert_eq!(band(dec!(2)), Some((Impact::Medium, "2".to_string())));
        assert_eq!(band(dec!(2.1)), Some((Impact::High, "2.1".to_string())));
    }

    #[test]
    fn test_max_heart_rate_boundary() {
        let hr = |max_heart_rate: u32| {
            factor(
                ClinicalInput {
                    max_heart_rate,
                    ..low_risk_input()
                },
                "Max Heart Rate",
            )
        };
        let flagged = hr(119).unwrap();
        assert_eq!(flagged.impact, Impact::Medium);
        assert_eq!(flagged.value, "119 bpm");
        assert_eq!(hr(120), None);
    }

    #[test]
    fn test_flat_slope_scores_half_weight() {
        let input = ClinicalInput {
            st_slope: StSlope::Flat,
            ..low_risk_input()
        };
        let flat = factor(input.clone(), "ST Slope").unwrap();
        assert_eq!(flat.impact, Impact::Medium);
        assert_eq!(flat.value, "Flat");

        let slope = &RiskEngine::default().score_breakdown(&input).unwrap().contributions[10];
        assert_eq!(slope.feature, "stSlope");
        assert_eq!(slope.normalized, dec!(0.5));
        assert_eq!(slope.contribution, dec!(0.055));
    }

    #[test]
    fn test_cholesterol_bands_drive_diet_advice() {
        let chol = |cholesterol: u32| {
            calculate_risk(&ClinicalInput {
                cholesterol,
                ..low_risk_input()
            })
            .unwrap()
        };
        assert!(factor_tags(&chol(200)).is_empty());

        let medium = chol(201);
        assert_eq!(factor_tags(&medium), vec![("Cholesterol", Impact::Medium)]);
        assert_eq!(medium.risk_factors[0].value, "201 mg/dl");
        assert!(medium
            .recommendations
            .iter()
            .any(|r| r.text == "Include omega-3 rich foods and reduce saturated fats"));

        assert_eq!(factor_tags(&chol(240)), vec![("Cholesterol", Impact::Medium)]);
        assert_eq!(factor_tags(&chol(241)), vec![("Cholesterol", Impact::High)]);
    }
}
