use serde::{ Deserialize, Serialize };
use std::fmt;

/// Final judgment of whether the evidence supports the claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Judged {
        supported: bool,
        /// Always within `[0, 1]`
        confidence: f32,
        explanation: String,
    },
    /// The model answer carried no recoverable judgment
    Unparseable { raw: String },
}

impl Verdict {
    pub fn judged(supported: bool, confidence: f32, explanation: impl Into<String>) -> Self {
        Verdict::Judged {
            supported,
            confidence: clamp_confidence(confidence),
            explanation: explanation.into(),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Verdict::Judged { supported: true, .. })
    }

    pub fn confidence(&self) -> Option<f32> {
        match self {
            Verdict::Judged { confidence, .. } => Some(*confidence),
            Verdict::Unparseable { .. } => None,
        }
    }
}

/// Clamp a model-reported confidence into `[0, 1]`; NaN becomes 0
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Judged { supported, confidence, explanation } => {
                let label = if *supported { "Supported" } else { "Unsupported" };
                write!(f, "{} ({:.0}%): {}", label, confidence * 100.0, explanation)
            }
            Verdict::Unparseable { raw } => write!(f, "Unparseable: {}", raw),
        }
    }
}
