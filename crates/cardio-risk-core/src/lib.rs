//! Rule-based cardiovascular risk estimation.
//!
//! A submitted form of eleven clinical measurements is validated
//! ([`form::validate_form`]), converted into a typed [`ClinicalInput`]
//! ([`form::process_form_data`]) and scored by a [`RiskEngine`] into a
//! percentage, a risk tier, contributing factors and recommendations.

pub mod clinical;
pub mod error;
pub mod fields;
pub mod scoring;
pub mod types;

#[cfg(feature = "form")]
pub mod assessment;

#[cfg(feature = "form")]
pub mod form;

pub use clinical::ClinicalInput;
pub use error::CardioRiskError;
pub use scoring::{RiskEngine, RiskLevel, RiskResult};
pub use types::*;

/// Standard result type for all cardio-risk operations
pub type CardioRiskResult<T> = Result<T, CardioRiskError>;
