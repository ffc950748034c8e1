use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessVerdict {
    Urgent,
    Important,
    Good,
    Excellent,
}

impl ReadinessVerdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=49 => Self::Urgent,
            50..=69 => Self::Important,
            70..=84 => Self::Good,
            _ => Self::Excellent,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::Urgent => "🚨 URGENT: This code has critical issues that need immediate attention before deployment.",
            Self::Important => "⚠️ IMPORTANT: Address high-priority issues to improve code quality and security.",
            Self::Good => "✅ GOOD: Code is generally solid with some areas for improvement.",
            Self::Excellent => "🎉 EXCELLENT: High-quality code with minimal issues.",
        }
    }
}
