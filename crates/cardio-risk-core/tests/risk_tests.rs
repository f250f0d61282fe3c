use cardio_risk_core::clinical::{ChestPainType, RestingEcg, Sex, StSlope};
use cardio_risk_core::fields::Field;
use cardio_risk_core::form::{self, RawFormData};
use cardio_risk_core::scoring::{self, Impact, RiskEngine, RiskLevel};
use cardio_risk_core::{CardioRiskError, ClinicalInput};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn form_from(values: [&str; 11]) -> RawFormData {
    Field::ALL
        .iter()
        .zip(values)
        .fold(RawFormData::empty(), |form, (field, value)| form.with(*field, value))
}

/// The high-risk reference patient, as a form would submit it.
fn high_risk_form() -> RawFormData {
    form_from(["60", "1", "0", "150", "260", "0", "0", "100", "1", "2.5", "2"])
}

/// All values at the low-risk end.
fn clean_form() -> RawFormData {
    form_from(["25", "0", "3", "110", "150", "0", "0", "180", "0", "0", "0"])
}

fn clean_input() -> ClinicalInput {
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

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_missing_age_reports_field_and_general() {
    let report = form::validate_form(&high_risk_form().with(Field::Age, ""));
    assert!(!report.is_valid);
    assert!(report.errors.contains_key("age"));
    assert!(report.errors.contains_key("general"));
}

#[test]
fn test_resting_bp_range_check() {
    let bad = form::validate_form(&high_risk_form().with(Field::RestingBp, "250"));
    assert!(bad.errors.contains_key("restingBP"));

    let good = form::validate_form(&high_risk_form().with(Field::RestingBp, "150"));
    assert!(!good.errors.contains_key("restingBP"));
    assert!(good.is_valid);
}

#[test]
fn test_every_blank_field_is_listed() {
    let report = form::validate_form(&RawFormData::empty());
    assert_eq!(report.missing_fields, Field::ALL.to_vec());
    assert_eq!(report.errors.len(), 12);
}

#[test]
fn test_legacy_form_payload_validates() {
    let json = serde_json::json!({
        "age": "60", "sex": "1", "chestPain": "0", "restingBP": "150",
        "cholesterol": "260", "fastingBS": "0", "restingECG": "0", "maxHR": "100",
        "exerciseAngina": "1", "oldpeak": "2.5", "stSlope": "2"
    });
    let raw: RawFormData = serde_json::from_value(json).unwrap();
    assert_eq!(raw, high_risk_form());
    assert!(form::validate_form(&raw).is_valid);
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_high_risk_scenario_end_to_end() {
    let output = cardio_risk_core::assessment::assess(&high_risk_form()).unwrap();
    let result = &output.result;

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.risk_percentage, 90);

    let tags: Vec<(&str, Impact)> = result
        .risk_factors
        .iter()
        .map(|f| (f.name.as_str(), f.impact))
        .collect();
    assert_eq!(
        tags,
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

    let texts: Vec<&str> = result.recommendations.iter().map(|r| r.text.as_str()).collect();
    assert!(texts.contains(&"Consult a cardiologist immediately for comprehensive evaluation"));
    assert!(texts.contains(&"Consider medication management under medical supervision"));
    assert!(texts.contains(&"Adopt a low-sodium DASH diet to manage blood pressure"));
}

#[test]
fn test_clean_scenario_end_to_end() {
    let output = cardio_risk_core::assessment::assess(&clean_form()).unwrap();
    assert_eq!(output.result.risk_level, RiskLevel::Low);
    assert!(output.result.risk_factors.is_empty());
    assert_eq!(output.result.recommendations.len(), 3);
}

#[test]
fn test_form_and_typed_paths_agree() {
    let via_form = form::process_form_data(&clean_form()).unwrap();
    assert_eq!(via_form, clean_input());
    assert_eq!(
        scoring::calculate_risk(&via_form).unwrap(),
        scoring::calculate_risk(&clean_input()).unwrap()
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_percentage_bounded_and_tier_consistent_across_domain() {
    let engine = RiskEngine::default();
    for age in [1u32, 20, 45, 80, 120] {
        for bp in [80u32, 140, 200] {
            for st in [dec!(0), dec!(2), dec!(6), dec!(10)] {
                for slope in [StSlope::Upsloping, StSlope::Flat, StSlope::Downsloping] {
                    let input = ClinicalInput {
                        age,
                        resting_bp: bp,
                        st_depression: st,
                        st_slope: slope,
                        max_heart_rate: 60,
                        exercise_induced_angina: true,
                        ..clean_input()
                    };
                    let result = engine.calculate_risk(&input).unwrap();
                    assert!(result.risk_percentage <= 100);
                    assert_eq!(
                        result.risk_level,
                        RiskLevel::from_percentage(result.risk_percentage)
                    );
                }
            }
        }
    }
}

#[test]
fn test_raising_a_risk_input_never_lowers_percentage() {
    let engine = RiskEngine::default();
    let mut previous = 0u8;
    for chol in (100u32..=600).step_by(25) {
        let input = ClinicalInput {
            cholesterol: chol,
            ..clean_input()
        };
        let pct = engine.calculate_risk(&input).unwrap().risk_percentage;
        assert!(pct >= previous);
        previous = pct;
    }
}

#[test]
fn test_identical_input_gives_identical_output() {
    let engine = RiskEngine::default();
    let input = form::process_form_data(&high_risk_form()).unwrap();
    let first = serde_json::to_vec(&engine.calculate_risk(&input).unwrap()).unwrap();
    let second = serde_json::to_vec(&engine.calculate_risk(&input).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = RiskEngine::default();
    let input = form::process_form_data(&high_risk_form()).unwrap();
    let expected = engine.calculate_risk(&input).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.calculate_risk(&input).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_resting_bp_140_is_medium_and_141_is_high() {
    let impact = |bp: u32| {
        scoring::calculate_risk(&ClinicalInput {
            resting_bp: bp,
            ..clean_input()
        })
        .unwrap()
        .risk_factors
        .into_iter()
        .find(|f| f.name == "Blood Pressure")
        .map(|f| f.impact)
    };
    assert_eq!(impact(140), Some(Impact::Medium));
    assert_eq!(impact(141), Some(Impact::High));
}

#[test]
fn test_bypassing_validation_is_an_explicit_error() {
    let input = ClinicalInput {
        max_heart_rate: 30,
        ..clean_input()
    };
    match scoring::calculate_risk(&input) {
        Err(CardioRiskError::InvalidInput { field, .. }) => assert_eq!(field, "maxHeartRate"),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_result_serializes_with_wire_names() {
    let result = scoring::calculate_risk(&clean_input()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["riskLevel"], "Low Risk");
    assert!(json["riskPercentage"].is_u64());
    assert!(json["riskFactors"].as_array().unwrap().is_empty());
    assert_eq!(json["recommendations"][0]["icon"], "🚭");
}
