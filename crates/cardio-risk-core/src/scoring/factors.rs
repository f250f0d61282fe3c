use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A named, severity-tagged observation about one measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub impact: Impact,
    pub value: String,
}

impl RiskFactor {
    pub(crate) fn new(name: &str, impact: Impact, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            impact,
            value: value.into(),
        }
    }

    pub fn is(&self, name: &str, impact: Impact) -> bool {
        self.name == name && self.impact == impact
    }
}

// Factor names referenced by the recommendation rules.
pub(crate) const BLOOD_PRESSURE: &str = "Blood Pressure";
pub(crate) const CHOLESTEROL: &str = "Cholesterol";

/// Two-band classification with strict `>` thresholds: above `high` is high,
/// above `medium` (and at most `high`) is medium, otherwise no factor.
pub(crate) fn banded<T: PartialOrd>(value: T, high: T, medium: T) -> Option<Impact> {
    if value > high {
        Some(Impact::High)
    } else if value > medium {
        Some(Impact::Medium)
    } else {
        None
    }
}
