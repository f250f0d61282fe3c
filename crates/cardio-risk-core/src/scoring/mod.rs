//! Rule-based risk scoring.
//!
//! Eleven weighted contributions are summed into an unbounded raw score,
//! squashed through a logistic curve into a whole percentage, tiered, and
//! annotated with severity-tagged risk factors and recommendations.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

pub mod config;
pub mod engine;
pub mod factors;
pub mod recommendations;
pub mod tier;

pub use config::{ReferenceRange, ReferenceRanges, ScoringConfig, Weights};
pub use engine::{calculate_risk, normalize, Contribution, RiskEngine, RiskResult, ScoreBreakdown};
pub use factors::{Impact, RiskFactor};
pub use recommendations::Recommendation;
pub use tier::{sigmoid, sigmoid_percentage, RiskLevel};
