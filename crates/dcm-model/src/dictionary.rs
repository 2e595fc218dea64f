//! Data dictionary and schema entity definitions.
//!
//! Both are administered elsewhere and arrive here read-only. A dictionary
//! field is the canonical mapping target; schema entities contribute
//! entity-level and entity-field targets that carry no standard values.

use serde::{Deserialize, Serialize};

/// One allowed literal value for a dictionary field (e.g. `"PostgreSQL"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardValue {
    pub value: String,
}

impl StandardValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A canonical, administrator-defined field belonging to a named entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryField {
    pub id: String,
    pub name: String,
    pub entity: String,
    #[serde(default)]
    pub standard_values: Vec<StandardValue>,
}

impl DictionaryField {
    pub fn new(id: impl Into<String>, entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity: entity.into(),
            standard_values: Vec::new(),
        }
    }

    /// Attach standard values to this field.
    #[must_use]
    pub fn with_standard_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_values = values.into_iter().map(StandardValue::new).collect();
        self
    }
}

/// A field declared on a schema entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// A schema entity and its declared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntity {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<EntityField>,
}

impl DataEntity {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|field| EntityField {
                    id: None,
                    name: field.into(),
                })
                .collect(),
        }
    }
}
