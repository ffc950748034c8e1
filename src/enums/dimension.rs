use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// One audit category. The set is small and fixed; weights and adapters are
/// bound to it through `DimensionTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Security,
    CodeQuality,
    UiUx,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Security, Dimension::CodeQuality, Dimension::UiUx];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::CodeQuality => "code_quality",
            Self::UiUx => "ui_ux",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::CodeQuality => "Code Quality",
            Self::UiUx => "UI/UX",
        }
    }

    pub fn default_weight(&self) -> f64 {
        match self {
            Self::Security => 0.30,
            Self::CodeQuality => 0.30,
            Self::UiUx => 0.40,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "code_quality" | "code-quality" => Ok(Self::CodeQuality),
            "ui_ux" | "ui-ux" => Ok(Self::UiUx),
            other => Err(format!("unknown dimension '{}'", other)),
        }
    }
}
