use napi::Result as NapiResult;
use napi_derive::napi;

use cardio_risk_core::form::RawFormData;
use cardio_risk_core::ClinicalInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_form(form_json: String) -> NapiResult<String> {
    let raw: RawFormData = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let report = cardio_risk_core::form::validate_form(&raw);
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn process_form_data(form_json: String) -> NapiResult<String> {
    let raw: RawFormData = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let input = cardio_risk_core::form::process_form_data(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&input).map_err(to_napi_error)
}

#[napi]
pub fn field_catalog() -> NapiResult<String> {
    serde_json::to_string(&cardio_risk_core::fields::field_catalog()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score a typed input; returns the bare result record.
#[napi]
pub fn calculate_risk(input_json: String) -> NapiResult<String> {
    let input: ClinicalInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = cardio_risk_core::scoring::calculate_risk(&input).map_err(to_napi_error)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn score_breakdown(input_json: String) -> NapiResult<String> {
    let input: ClinicalInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let breakdown = cardio_risk_core::RiskEngine::default()
        .score_breakdown(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

/// Validate, convert and score a raw form in one call.
#[napi]
pub fn assess(form_json: String) -> NapiResult<String> {
    let raw: RawFormData = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let output = cardio_risk_core::assessment::assess(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
