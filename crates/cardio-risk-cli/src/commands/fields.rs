use serde_json::Value;

use cardio_risk_core::fields::field_catalog;

pub fn run_fields() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(field_catalog())?)
}
