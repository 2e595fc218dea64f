//! Candidate ranking for source columns.
//!
//! Every catalog target is scored against the column on three signals:
//! entity similarity, field similarity (with synonym boosts) and overlap
//! between sampled values and the target's standard values. The single best
//! target is recommended when its combined score clears the configured
//! threshold; otherwise the column is left unmapped.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use dcm_model::{FieldMapping, MappingStatus, MatchResult, SourceColumn};
use tracing::{debug, info, info_span, trace};

use crate::catalog::{MatchCatalog, MatchTarget};
use crate::config::RankerConfig;
use crate::score::{normalize, similarity_normalized, singularize};
use crate::tokens::extract_hints;

static DEFAULT_CONFIG: LazyLock<RankerConfig> = LazyLock::new(RankerConfig::default);

/// A component contributing to a combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreComponent {
    /// Component name (e.g., "Entity similarity").
    pub name: &'static str,
    /// Component value (can be negative for penalties).
    pub value: f64,
    /// Human-readable description.
    pub description: String,
}

/// A catalog target with its combined score and score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTarget {
    pub target: MatchTarget,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl ScoredTarget {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("{}: {:.2}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn to_match_result(&self) -> MatchResult {
        self.target.to_match_result()
    }
}

/// Recommend a mapping for `column` using the default configuration.
pub fn rank(column: &SourceColumn, catalog: &MatchCatalog) -> MatchResult {
    rank_with_config(column, catalog, &DEFAULT_CONFIG)
}

/// Recommend a mapping for `column` using `config`.
pub fn rank_with_config(
    column: &SourceColumn,
    catalog: &MatchCatalog,
    config: &RankerConfig,
) -> MatchResult {
    let prepared = PreparedColumn::new(column, config);
    match best_evaluation(&prepared, catalog, config) {
        Some(best) if best.combined >= config.min_score => {
            catalog.targets()[best.index].to_match_result()
        }
        _ => MatchResult::none(),
    }
}

/// Ranks source columns against a shared catalog.
///
/// The catalog is held behind an [`Arc`] so a single catalog built per
/// upload batch can back any number of rankers, including across threads.
///
/// # Example
///
/// ```ignore
/// use dcm_map::{MatchCatalog, Ranker};
/// use dcm_model::SourceColumn;
///
/// let ranker = Ranker::new(MatchCatalog::build(&dictionary, Some(entities.as_slice())));
/// let result = ranker.recommend(&SourceColumn::new("Server Name"));
/// ```
#[derive(Debug, Clone)]
pub struct Ranker {
    catalog: Arc<MatchCatalog>,
    config: RankerConfig,
}

impl Ranker {
    pub fn new(catalog: impl Into<Arc<MatchCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            config: RankerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &MatchCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Best target for `column`, or the all-`None` sentinel when nothing
    /// clears the confidence threshold.
    pub fn recommend(&self, column: &SourceColumn) -> MatchResult {
        let result = rank_with_config(column, &self.catalog, &self.config);
        debug!(
            column = %column.name,
            entity = result.entity.as_deref().unwrap_or("-"),
            field = result.field.as_deref().unwrap_or("-"),
            "field recommendation"
        );
        result
    }

    /// Highest-scoring target with its score breakdown, regardless of the
    /// confidence threshold. `None` when no target competes.
    pub fn explain(&self, column: &SourceColumn) -> Option<ScoredTarget> {
        let prepared = PreparedColumn::new(column, &self.config);
        best_evaluation(&prepared, &self.catalog, &self.config)
            .map(|best| self.scored(&prepared, &best))
    }

    /// All competing targets ordered by descending score, at most `limit`.
    ///
    /// Equal scores keep catalog order.
    pub fn candidates(&self, column: &SourceColumn, limit: usize) -> Vec<ScoredTarget> {
        let prepared = PreparedColumn::new(column, &self.config);
        let mut evaluations: Vec<Evaluation<'_>> = self
            .catalog
            .iter()
            .enumerate()
            .filter_map(|(index, target)| evaluate(&prepared, index, target, &self.config))
            .collect();
        evaluations.sort_by(|a, b| b.combined.partial_cmp(&a.combined).unwrap_or(Ordering::Equal));
        evaluations
            .iter()
            .take(limit)
            .map(|evaluation| self.scored(&prepared, evaluation))
            .collect()
    }

    /// Recommend a mapping for every column, in input order.
    ///
    /// Matched columns come back `Pending` for human confirmation; the rest
    /// are `Unmapped`.
    pub fn recommend_all(&self, columns: &[SourceColumn]) -> Vec<FieldMapping> {
        let span = info_span!("recommend", columns = columns.len(), targets = self.catalog.len());
        let _guard = span.enter();

        let mappings: Vec<FieldMapping> = columns
            .iter()
            .map(|column| {
                let prepared = PreparedColumn::new(column, &self.config);
                let best = best_evaluation(&prepared, &self.catalog, &self.config)
                    .filter(|best| best.combined >= self.config.min_score);
                let (result, score) = match best {
                    Some(best) => (
                        self.catalog.targets()[best.index].to_match_result(),
                        Some(best.combined),
                    ),
                    None => (MatchResult::none(), None),
                };
                debug!(
                    column = %column.name,
                    matched = result.is_match(),
                    score = score.unwrap_or_default(),
                    "field recommendation"
                );
                FieldMapping::from_match(column.name.clone(), result, score)
            })
            .collect();

        let mapped = mappings
            .iter()
            .filter(|m| m.status == MappingStatus::Pending)
            .count();
        info!(
            mapped,
            unmapped = mappings.len() - mapped,
            "recommended field mappings"
        );
        mappings
    }

    fn scored(&self, prepared: &PreparedColumn, evaluation: &Evaluation<'_>) -> ScoredTarget {
        let target = &self.catalog.targets()[evaluation.index];
        ScoredTarget {
            target: target.clone(),
            score: evaluation.combined,
            components: components(prepared, target, evaluation, &self.config),
        }
    }
}

/// A column normalized once for scoring against every target.
struct PreparedColumn {
    source: String,
    entity_hint: Option<String>,
    field_hint: String,
    samples: BTreeSet<String>,
}

impl PreparedColumn {
    fn new(column: &SourceColumn, config: &RankerConfig) -> Self {
        let hints = extract_hints(&column.name);
        let samples = column
            .sample_values
            .iter()
            .take(config.max_sample_values)
            .map(|value| normalize(value))
            .filter(|value| !value.is_empty())
            .collect();
        Self {
            source: normalize(&column.name),
            entity_hint: hints.entity.as_deref().map(normalize),
            field_hint: normalize(&hints.field),
            samples,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Evaluation<'a> {
    index: usize,
    entity_score: f64,
    entity_mentioned: bool,
    field_score: Option<f64>,
    synonym: Option<&'a str>,
    effective_field_score: Option<f64>,
    overlap: Option<(usize, usize)>,
    combined: f64,
}

fn best_evaluation<'a>(
    prepared: &PreparedColumn,
    catalog: &MatchCatalog,
    config: &'a RankerConfig,
) -> Option<Evaluation<'a>> {
    let mut best: Option<Evaluation<'a>> = None;
    for (index, target) in catalog.iter().enumerate() {
        let Some(evaluation) = evaluate(prepared, index, target, config) else {
            continue;
        };
        trace!(
            entity = %target.entity,
            field = target.field.as_deref().unwrap_or("-"),
            score = evaluation.combined,
            "scored target"
        );
        if best.is_none_or(|current| evaluation.combined > current.combined) {
            best = Some(evaluation);
        }
    }
    best
}

/// Score one target. `None` when the target may not compete at all.
fn evaluate<'a>(
    prepared: &PreparedColumn,
    index: usize,
    target: &MatchTarget,
    config: &'a RankerConfig,
) -> Option<Evaluation<'a>> {
    let entity = normalize(&target.entity);
    let hint_score = prepared
        .entity_hint
        .as_deref()
        .map_or(0.0, |hint| similarity_normalized(hint, &entity));
    let mut whole_score = similarity_normalized(&prepared.source, &entity);
    let entity_mentioned = !entity.is_empty()
        && (prepared.source.contains(&entity) || prepared.source.contains(&singularize(&entity)));
    if entity_mentioned {
        whole_score = whole_score.max(config.entity_mention_floor);
    }
    let entity_score = hint_score.max(whole_score);

    let mut evaluation = Evaluation {
        index,
        entity_score,
        entity_mentioned,
        field_score: None,
        synonym: None,
        effective_field_score: None,
        overlap: None,
        combined: 0.0,
    };

    match &target.field {
        Some(field) => {
            let field = normalize(field);
            let mut field_score = similarity_normalized(&prepared.field_hint, &field)
                .max(similarity_normalized(&prepared.source, &field));
            evaluation.synonym =
                config
                    .synonyms
                    .matching_canonical(&field, &prepared.field_hint, &prepared.source);
            if evaluation.synonym.is_some() {
                field_score = field_score.max(config.synonym_floor);
            }
            evaluation.field_score = Some(field_score);

            evaluation.combined = if entity_score > config.entity_trust_threshold {
                let effective = config.effective_field_score(field_score);
                evaluation.effective_field_score = Some(effective);
                entity_score * config.primary_weight + effective * config.secondary_weight
            } else {
                // Raw field score: a weak entity signal is not penalized twice.
                entity_score * config.secondary_weight + field_score * config.primary_weight
            };
        }
        None => {
            if entity_score <= config.entity_only_threshold {
                return None;
            }
            evaluation.combined = entity_score * config.entity_only_weight;
        }
    }

    if !prepared.samples.is_empty() && !target.standard_values.is_empty() {
        let matches = prepared
            .samples
            .intersection(&target.standard_values)
            .count();
        let total = prepared.samples.len();
        let ratio = matches as f64 / total as f64;
        if ratio >= config.overlap_threshold {
            evaluation.combined += config.overlap_boost;
        }
        evaluation.combined += (ratio * config.overlap_weight).round();
        evaluation.overlap = Some((matches, total));
    }

    Some(evaluation)
}

fn components(
    prepared: &PreparedColumn,
    target: &MatchTarget,
    evaluation: &Evaluation<'_>,
    config: &RankerConfig,
) -> Vec<ScoreComponent> {
    let mut components = vec![ScoreComponent {
        name: "Entity similarity",
        value: evaluation.entity_score,
        description: if evaluation.entity_mentioned {
            format!("'{}' mentions entity '{}'", prepared.source, target.entity)
        } else {
            format!("'{}' vs entity '{}'", prepared.source, target.entity)
        },
    }];

    if let (Some(field_score), Some(field)) = (evaluation.field_score, &target.field) {
        components.push(ScoreComponent {
            name: "Field similarity",
            value: field_score,
            description: format!("'{}' vs field '{}'", prepared.field_hint, field),
        });
    }
    if let Some(canonical) = evaluation.synonym {
        components.push(ScoreComponent {
            name: "Synonym match",
            value: config.synonym_floor,
            description: format!("Linked through synonyms of '{canonical}'"),
        });
    }
    if let (Some(effective), Some(raw)) = (evaluation.effective_field_score, evaluation.field_score)
        && effective != raw
    {
        components.push(ScoreComponent {
            name: "Weak field penalty",
            value: effective,
            description: format!("Field score {raw:.2} is below the strong-match band"),
        });
    }
    if let Some((matches, total)) = evaluation.overlap {
        components.push(ScoreComponent {
            name: "Value overlap",
            value: matches as f64 / total as f64,
            description: format!("{matches} of {total} sampled values are standard values"),
        });
    }
    components.push(ScoreComponent {
        name: "Combined",
        value: evaluation.combined,
        description: format!(
            "{} target '{}'",
            target.kind,
            target.field.as_deref().unwrap_or(&target.entity)
        ),
    });
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TargetKind;
    use dcm_model::{DataEntity, DictionaryField};

    fn catalog() -> MatchCatalog {
        let dictionary = vec![
            DictionaryField::new("df-1", "Database", "Database Technology")
                .with_standard_values(["Oracle", "MySQL", "PostgreSQL", "SQL Server"]),
            DictionaryField::new("df-2", "Server", "Operating System")
                .with_standard_values(["Linux", "Windows"]),
        ];
        let entities = vec![DataEntity::new("Server", ["hostname", "cpu_count"])];
        MatchCatalog::build(&dictionary, Some(entities.as_slice()))
    }

    #[test]
    fn test_exact_dictionary_field_wins() {
        let result = rank(&SourceColumn::new("Database Technology"), &catalog());
        assert_eq!(result.entity.as_deref(), Some("Database"));
        assert_eq!(result.field.as_deref(), Some("Database Technology"));
        assert_eq!(result.target_id.as_deref(), Some("df-1"));
    }

    #[test]
    fn test_entity_separator_routes_to_entity_field() {
        let result = rank(&SourceColumn::new("Server | CPU Count"), &catalog());
        assert_eq!(result.entity.as_deref(), Some("Server"));
        assert_eq!(result.field.as_deref(), Some("cpu_count"));
        assert_eq!(result.target_id, None);
    }

    #[test]
    fn test_bare_entity_name_matches_entity_only_target() {
        let result = rank(&SourceColumn::new("Servers"), &catalog());
        assert_eq!(result.entity.as_deref(), Some("Server"));
        assert_eq!(result.field, None);
    }

    #[test]
    fn test_weak_entity_blocks_entity_only_target() {
        let ranker = Ranker::new(catalog());
        let candidates = ranker.candidates(&SourceColumn::new("Rack Position"), usize::MAX);
        assert!(
            candidates
                .iter()
                .all(|c| c.target.kind != TargetKind::EntityOnly)
        );
    }

    #[test]
    fn test_partial_value_overlap_adds_proportional_nudge_only() {
        let config = RankerConfig::default();
        let column = SourceColumn::new("Notes").with_samples(["Oracle", "a", "b", "c", "d", "e"]);
        let prepared = PreparedColumn::new(&column, &config);
        let catalog = catalog();
        let target = &catalog.targets()[0];
        let with_samples = evaluate(&prepared, 0, target, &config).unwrap();
        let without = evaluate(
            &PreparedColumn::new(&SourceColumn::new("Notes"), &config),
            0,
            target,
            &config,
        )
        .unwrap();
        // 1 of 6 is below the 20% threshold: only round(0.1667 * 20) = 3 is added.
        assert!((with_samples.combined - without.combined - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_entity_mentioned_in_source_is_floored_into_trusted_branch() {
        let config = RankerConfig::default();
        let catalog = catalog();
        let (index, target) = catalog
            .iter()
            .enumerate()
            .find(|(_, t)| t.kind == TargetKind::EntityField && t.field.as_deref() == Some("hostname"))
            .expect("hostname target");
        let prepared = PreparedColumn::new(&SourceColumn::new("Server Hostname Primary"), &config);

        let evaluation = evaluate(&prepared, index, target, &config).expect("target competes");

        assert!(evaluation.entity_mentioned);
        assert_eq!(evaluation.entity_score, config.entity_mention_floor);
        assert!(evaluation.entity_score > config.entity_trust_threshold);
        assert!(evaluation.effective_field_score.is_some());
    }

    #[test]
    fn test_explain_lists_components() {
        let ranker = Ranker::new(catalog());
        let scored = ranker
            .explain(&SourceColumn::new("Database Technology"))
            .expect("a target competes");
        let explanation = scored.explain();
        assert!(explanation.contains("Entity similarity"));
        assert!(explanation.contains("Field similarity"));
        assert!(explanation.contains("Combined"));
        assert_eq!(scored.to_match_result().target_id.as_deref(), Some("df-1"));
    }

    #[test]
    fn test_candidates_are_sorted_and_limited() {
        let ranker = Ranker::new(catalog());
        let candidates = ranker.candidates(&SourceColumn::new("Database Technology"), 2);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].score >= candidates[1].score);
        assert_eq!(candidates[0].target.id.as_deref(), Some("df-1"));
    }

    #[test]
    fn test_empty_catalog_never_matches() {
        let empty = MatchCatalog::default();
        assert_eq!(rank(&SourceColumn::new("Hostname"), &empty), MatchResult::none());
        assert!(Ranker::new(empty).explain(&SourceColumn::new("Hostname")).is_none());
    }
}
