//! Catalog of mapping targets.
//!
//! A catalog flattens dictionary fields and schema entities into a single
//! ordered list of [`MatchTarget`]s. It is built once per upload batch and
//! shared read-only by every ranking call.
//!
//! Order is fixed: dictionary fields, then entity-only targets, then schema
//! entity fields, each in input order. Ranking ties resolve to the earlier
//! target, so this order is part of the ranking contract.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use dcm_model::{DataEntity, DictionaryField, MatchResult};
use serde::Serialize;
use tracing::debug;

/// Where a match target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A data-dictionary field, possibly with standard values.
    Dictionary,
    /// A schema entity without a field.
    EntityOnly,
    /// A schema entity field with no dictionary counterpart.
    EntityField,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Dictionary => "dictionary",
            TargetKind::EntityOnly => "entity_only",
            TargetKind::EntityField => "entity_field",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One candidate mapping target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTarget {
    pub entity: String,
    pub field: Option<String>,
    /// Dictionary field id; only dictionary targets carry one.
    pub id: Option<String>,
    pub kind: TargetKind,
    /// Lower-cased, trimmed standard values.
    pub standard_values: BTreeSet<String>,
}

impl MatchTarget {
    pub fn to_match_result(&self) -> MatchResult {
        MatchResult::new(self.entity.clone(), self.field.clone(), self.id.clone())
    }

    fn key(&self) -> (String, Option<String>) {
        (
            self.entity.trim().to_lowercase(),
            self.field.as_ref().map(|f| f.trim().to_lowercase()),
        )
    }
}

/// Immutable, ordered set of match targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchCatalog {
    targets: Vec<MatchTarget>,
}

impl MatchCatalog {
    /// Build a catalog from dictionary fields and optional schema entities.
    pub fn build(dictionary: &[DictionaryField], entities: Option<&[DataEntity]>) -> Self {
        let mut targets = Vec::with_capacity(dictionary.len());
        let mut seen = HashSet::new();

        for field in dictionary {
            let target = MatchTarget {
                entity: field.entity.clone(),
                field: Some(field.name.clone()),
                id: Some(field.id.clone()),
                kind: TargetKind::Dictionary,
                standard_values: field
                    .standard_values
                    .iter()
                    .map(|sv| sv.value.trim().to_lowercase())
                    .filter(|value| !value.is_empty())
                    .collect(),
            };
            if seen.insert(target.key()) {
                targets.push(target);
            }
        }

        let entities = entities.unwrap_or_default();
        for entity in entities {
            let target = MatchTarget {
                entity: entity.name.clone(),
                field: None,
                id: None,
                kind: TargetKind::EntityOnly,
                standard_values: BTreeSet::new(),
            };
            if seen.insert(target.key()) {
                targets.push(target);
            }
        }

        for entity in entities {
            for field in &entity.fields {
                let target = MatchTarget {
                    entity: entity.name.clone(),
                    field: Some(field.name.clone()),
                    id: None,
                    kind: TargetKind::EntityField,
                    standard_values: BTreeSet::new(),
                };
                if seen.insert(target.key()) {
                    targets.push(target);
                }
            }
        }

        debug!(
            dictionary_fields = dictionary.len(),
            entities = entities.len(),
            targets = targets.len(),
            "built match catalog"
        );
        Self { targets }
    }

    /// Build a catalog from dictionary fields only.
    pub fn from_dictionary(dictionary: &[DictionaryField]) -> Self {
        Self::build(dictionary, None)
    }

    pub fn targets(&self) -> &[MatchTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchTarget> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a MatchCatalog {
    type Item = &'a MatchTarget;
    type IntoIter = std::slice::Iter<'a, MatchTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Vec<DictionaryField> {
        vec![
            DictionaryField::new("df-1", "Server", "Hostname"),
            DictionaryField::new("df-2", "Database", "Database Technology")
                .with_standard_values([" Oracle ", "MySQL", ""]),
        ]
    }

    fn entities() -> Vec<DataEntity> {
        vec![
            DataEntity::new("Server", ["hostname", "ip_address"]),
            DataEntity::new("Application", ["owner"]),
        ]
    }

    #[test]
    fn test_order_is_dictionary_then_entities_then_entity_fields() {
        let entities = entities();
        let catalog = MatchCatalog::build(&dictionary(), Some(entities.as_slice()));
        let kinds: Vec<TargetKind> = catalog.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TargetKind::Dictionary,
                TargetKind::Dictionary,
                TargetKind::EntityOnly,
                TargetKind::EntityOnly,
                TargetKind::EntityField,
                TargetKind::EntityField,
            ]
        );
    }

    #[test]
    fn test_entity_field_shadowed_by_dictionary_field() {
        let entities = entities();
        let catalog = MatchCatalog::build(&dictionary(), Some(entities.as_slice()));
        let hostnames: Vec<&MatchTarget> = catalog
            .iter()
            .filter(|t| t.field.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("hostname")))
            .collect();
        assert_eq!(hostnames.len(), 1);
        assert_eq!(hostnames[0].kind, TargetKind::Dictionary);
        assert_eq!(hostnames[0].id.as_deref(), Some("df-1"));
    }

    #[test]
    fn test_standard_values_are_normalized() {
        let catalog = MatchCatalog::from_dictionary(&dictionary());
        let values: Vec<&str> = catalog.targets()[1]
            .standard_values
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(values, vec!["mysql", "oracle"]);
    }

    #[test]
    fn test_duplicate_entities_collapse() {
        let entities = vec![
            DataEntity::new("Server", ["hostname"]),
            DataEntity::new("server", ["HOSTNAME", "os"]),
        ];
        let catalog = MatchCatalog::build(&[], Some(entities.as_slice()));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.targets()[0].kind, TargetKind::EntityOnly);
        assert_eq!(catalog.targets()[2].field.as_deref(), Some("os"));
    }

    #[test]
    fn test_empty_inputs_yield_empty_catalog() {
        assert!(MatchCatalog::build(&[], None).is_empty());
        assert!(MatchCatalog::build(&[], Some(&[][..])).is_empty());
    }
}
