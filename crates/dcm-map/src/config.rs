//! Tuning constants for the candidate ranker.
//!
//! Defaults reproduce the production heuristic exactly. Every field is
//! optional when deserializing, so an override file only needs the values it
//! changes.

use serde::{Deserialize, Serialize};

use crate::synonyms::SynonymTable;

/// Minimum combined score before a recommendation is made.
pub const DEFAULT_MIN_SCORE: f64 = 40.0;
/// Sampled values considered per column.
pub const DEFAULT_MAX_SAMPLE_VALUES: usize = dcm_model::MAX_SAMPLE_VALUES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Entity score above which the entity signal dominates the combination.
    pub entity_trust_threshold: f64,
    /// Entity score an entity-only target needs before it may compete.
    pub entity_only_threshold: f64,
    /// Field score kept as-is when above this value.
    pub strong_field_threshold: f64,
    /// Field score scaled down by `weak_field_factor` when above this value.
    pub weak_field_threshold: f64,
    pub weak_field_factor: f64,
    /// Effective field score for anything at or below `weak_field_threshold`.
    pub poor_field_penalty: f64,
    /// Weight of the dominant signal (entity when trusted, field otherwise).
    pub primary_weight: f64,
    /// Weight of the secondary signal.
    pub secondary_weight: f64,
    pub entity_only_weight: f64,
    /// Floor for the entity score when the entity name appears in the column name.
    pub entity_mention_floor: f64,
    /// Floor for the field score when a synonym links column and field.
    pub synonym_floor: f64,
    /// Overlap ratio that earns `overlap_boost`.
    pub overlap_threshold: f64,
    pub overlap_boost: f64,
    /// Multiplier for the proportional overlap nudge, applied at any ratio.
    pub overlap_weight: f64,
    pub min_score: f64,
    pub max_sample_values: usize,
    pub synonyms: SynonymTable,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            entity_trust_threshold: 0.7,
            entity_only_threshold: 0.6,
            strong_field_threshold: 0.7,
            weak_field_threshold: 0.45,
            weak_field_factor: 0.1,
            poor_field_penalty: -1.0,
            primary_weight: 85.0,
            secondary_weight: 15.0,
            entity_only_weight: 95.0,
            entity_mention_floor: 0.8,
            synonym_floor: 0.9,
            overlap_threshold: 0.2,
            overlap_boost: 40.0,
            overlap_weight: 20.0,
            min_score: DEFAULT_MIN_SCORE,
            max_sample_values: DEFAULT_MAX_SAMPLE_VALUES,
            synonyms: SynonymTable::default(),
        }
    }
}

impl RankerConfig {
    /// Set the confidence threshold.
    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set how many sampled values are considered per column.
    #[must_use]
    pub fn with_max_sample_values(mut self, max: usize) -> Self {
        self.max_sample_values = max;
        self
    }

    /// Replace the synonym table.
    #[must_use]
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Effective field score used when the entity signal is trusted.
    pub(crate) fn effective_field_score(&self, field_score: f64) -> f64 {
        if field_score > self.strong_field_threshold {
            field_score
        } else if field_score > self.weak_field_threshold {
            field_score * self.weak_field_factor
        } else {
            self.poor_field_penalty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: RankerConfig =
            serde_json::from_str(r#"{"min_score": 55.0, "overlap_boost": 30}"#)
                .expect("deserialize config");
        assert_eq!(config.min_score, 55.0);
        assert_eq!(config.overlap_boost, 30.0);
        assert_eq!(config.weak_field_threshold, 0.45);
        assert_eq!(config.synonyms, SynonymTable::default());
    }

    #[test]
    fn test_effective_field_score_bands() {
        let config = RankerConfig::default();
        assert_eq!(config.effective_field_score(0.9), 0.9);
        assert!((config.effective_field_score(0.5) - 0.05).abs() < 1e-12);
        assert_eq!(config.effective_field_score(0.45), -1.0);
        assert_eq!(config.effective_field_score(0.0), -1.0);
    }

    #[test]
    fn test_builders() {
        let config = RankerConfig::default()
            .with_min_score(60.0)
            .with_max_sample_values(10);
        assert_eq!(config.min_score, 60.0);
        assert_eq!(config.max_sample_values, 10);
    }
}
