use clap::Args;
use serde_json::Value;
use tracing::debug;

use cardio_risk_core::fields::Field;
use cardio_risk_core::form::{self, RawFormData};
use cardio_risk_core::scoring::{RiskEngine, ScoringConfig};
use cardio_risk_core::ClinicalInput;

use crate::input;

/// Raw form values, as a form control would submit them
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormArgs {
    /// Path to JSON/YAML form file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Age in years (1-120)
    #[arg(long)]
    pub age: Option<String>,

    /// Sex: 0 = female, 1 = male
    #[arg(long)]
    pub sex: Option<String>,

    /// Chest pain type: 0 typical angina, 1 atypical, 2 non-anginal, 3 asymptomatic
    #[arg(long, alias = "chest-pain")]
    pub chest_pain_type: Option<String>,

    /// Resting blood pressure in mmHg (80-200)
    #[arg(long)]
    pub resting_bp: Option<String>,

    /// Cholesterol in mg/dl (100-600)
    #[arg(long)]
    pub cholesterol: Option<String>,

    /// Fasting blood sugar > 120 mg/dl: 0 or 1
    #[arg(long, alias = "fasting-bs")]
    pub fasting_blood_sugar_high: Option<String>,

    /// Resting ECG: 0 normal, 1 ST-T abnormality, 2 LV hypertrophy
    #[arg(long)]
    pub resting_ecg: Option<String>,

    /// Maximum heart rate in bpm (60-220)
    #[arg(long, alias = "max-hr")]
    pub max_heart_rate: Option<String>,

    /// Exercise-induced angina: 0 or 1
    #[arg(long, alias = "exercise-angina")]
    pub exercise_induced_angina: Option<String>,

    /// ST depression / oldpeak (0-10)
    #[arg(long, alias = "oldpeak")]
    pub st_depression: Option<String>,

    /// ST slope: 0 upsloping, 1 flat, 2 downsloping
    #[arg(long)]
    pub st_slope: Option<String>,
}

/// Typed clinical input read from a file or stdin
#[derive(Args)]
pub struct InputArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

impl FormArgs {
    fn into_form(self) -> RawFormData {
        let flags = [
            (Field::Age, self.age),
            (Field::Sex, self.sex),
            (Field::ChestPainType, self.chest_pain_type),
            (Field::RestingBp, self.resting_bp),
            (Field::Cholesterol, self.cholesterol),
            (Field::FastingBloodSugarHigh, self.fasting_blood_sugar_high),
            (Field::RestingEcg, self.resting_ecg),
            (Field::MaxHeartRate, self.max_heart_rate),
            (Field::ExerciseInducedAngina, self.exercise_induced_angina),
            (Field::StDepression, self.st_depression),
            (Field::StSlope, self.st_slope),
        ];
        let mut raw = RawFormData::default();
        for (field, value) in flags {
            if let Some(v) = value {
                raw.set(field, v);
            }
        }
        raw
    }
}

fn read_form(args: FormArgs) -> Result<RawFormData, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_structured(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Ok(args.into_form())
    }
}

fn read_clinical(args: InputArgs) -> Result<ClinicalInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_structured(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input <file.json> or stdin required".into())
    }
}

fn build_engine(config: Option<&str>) -> Result<RiskEngine, Box<dyn std::error::Error>> {
    let config: ScoringConfig = match config {
        Some(path) => {
            debug!(path, "loading scoring configuration");
            input::file::read_structured(path)?
        }
        None => ScoringConfig::default(),
    };
    Ok(RiskEngine::new(config)?)
}

pub fn run_assess(args: FormArgs, config: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = build_engine(config)?;
    let raw = read_form(args)?;
    let result = engine.assess(&raw)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: FormArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = read_form(args)?;
    let report = form::validate_form(&raw);
    Ok(serde_json::to_value(report)?)
}

pub fn run_score(args: InputArgs, config: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = build_engine(config)?;
    let clinical = read_clinical(args)?;
    let result = engine.score(&clinical)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_breakdown(
    args: InputArgs,
    config: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = build_engine(config)?;
    let clinical = read_clinical(args)?;
    let breakdown = engine.score_breakdown(&clinical)?;
    Ok(serde_json::to_value(breakdown)?)
}
