use std::collections::{BTreeMap, HashSet};
use crate::enums::dimension::Dimension;
use crate::errors::{ReviewerError, ReviewerResult};

/// Allowed distance between the weight sum and 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeight {
    pub dimension: Dimension,
    pub weight: f64,
}

/// Validated (dimension, weight) table. Construction is the only place the
/// weight invariants are checked, so scoring never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTable {
    entries: Vec<DimensionWeight>,
}

impl DimensionTable {
    pub fn new(entries: Vec<DimensionWeight>) -> ReviewerResult<Self> {
        if let Err(problems) = Self::check(&entries) {
            return Err(ReviewerError::config_error(
                &problems.join("; "),
                Some("scoring.weights"),
                Some("Weights must each lie in (0, 1] and sum to 1.0"),
            ));
        }
        Ok(Self { entries })
    }

    /// security 0.30, code_quality 0.30, ui_ux 0.40
    pub fn standard() -> Self {
        Self {
            entries: Dimension::ALL
                .iter()
                .map(|dimension| DimensionWeight { dimension: *dimension, weight: dimension.default_weight() })
                .collect(),
        }
    }

    /// Builds a table from configuration keys such as `code_quality`.
    /// Entries keep the canonical dimension order.
    pub fn from_weights(weights: &BTreeMap<String, f64>) -> ReviewerResult<Self> {
        let mut entries = Vec::with_capacity(weights.len());
        for (key, weight) in weights {
            let dimension = key.parse::<Dimension>().map_err(|e| {
                ReviewerError::config_error(&e, Some("scoring.weights"), Some("Known dimensions: security, code_quality, ui_ux"))
            })?;
            entries.push(DimensionWeight { dimension, weight: *weight });
        }
        entries.sort_by_key(|entry| entry.dimension);
        Self::new(entries)
    }

    /// Every violated weight rule, for reporting all problems at once.
    pub fn check(entries: &[DimensionWeight]) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if entries.is_empty() {
            problems.push("at least one dimension must be configured".to_string());
        }

        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.dimension) {
                problems.push(format!("dimension '{}' is configured twice", entry.dimension));
            }
            if !(entry.weight > 0.0 && entry.weight <= 1.0) {
                problems.push(format!("weight for '{}' must be in (0, 1], got {}", entry.dimension, entry.weight));
            }
        }

        let sum: f64 = entries.iter().map(|entry| entry.weight).sum();
        if !entries.is_empty() && (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            problems.push(format!("weights must sum to 1.0, got {:.6}", sum));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    pub fn entries(&self) -> &[DimensionWeight] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight_of(&self, dimension: Dimension) -> Option<f64> {
        self.entries.iter().find(|entry| entry.dimension == dimension).map(|entry| entry.weight)
    }

    /// Position in the table; used as the tie-breaker when ordering issues.
    pub fn position(&self, dimension: Dimension) -> Option<usize> {
        self.entries.iter().position(|entry| entry.dimension == dimension)
    }
}

impl Default for DimensionTable {
    fn default() -> Self {
        Self::standard()
    }
}
