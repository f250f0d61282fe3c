//! End-to-end assessment: raw form → validation → conversion → scoring.

use std::time::Instant;

use tracing::warn;

use crate::clinical::ClinicalInput;
use crate::form::{process_form_data, validate_form, RawFormData};
use crate::scoring::{RiskEngine, RiskResult};
use crate::types::{with_metadata, ComputationOutput};
use crate::CardioRiskResult;

const METHODOLOGY: &str =
    "Weighted min-max feature score with logistic transform (midpoint 0.5, steepness 10)";

impl RiskEngine {
    /// Validate, convert and score a raw form submission.
    ///
    /// Any validation problem aborts with `ValidationFailed` carrying the
    /// full per-field report; no partial result is produced.
    pub fn assess(&self, raw: &RawFormData) -> CardioRiskResult<ComputationOutput<RiskResult>> {
        let start = Instant::now();

        validate_form(raw).into_result()?;
        let input = process_form_data(raw)?;

        self.score_with_metadata(&input, start)
    }

    /// Score an already-typed input inside the standard output envelope.
    pub fn score(&self, input: &ClinicalInput) -> CardioRiskResult<ComputationOutput<RiskResult>> {
        self.score_with_metadata(input, Instant::now())
    }

    fn score_with_metadata(
        &self,
        input: &ClinicalInput,
        start: Instant,
    ) -> CardioRiskResult<ComputationOutput<RiskResult>> {
        let result = self.calculate_risk(input)?;

        let warnings = self.reference_range_warnings(input);
        for w in &warnings {
            warn!("{}", w);
        }

        let config = self.config();
        let assumptions = serde_json::json!({
            "weights": config.weights,
            "weight_total": config.weights.total(),
            "reference_ranges": config.ranges,
            "percentage": "round(100 / (1 + e^(-10 * (score - 0.5))))",
            "tiers": "Low < 30 <= Moderate < 60 <= High",
            "calibration": "rule-based heuristic, not a trained model"
        });

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, result))
    }
}

/// [`RiskEngine::assess`] with the default weight table.
pub fn assess(raw: &RawFormData) -> CardioRiskResult<ComputationOutput<RiskResult>> {
    RiskEngine::default().assess(raw)
}
