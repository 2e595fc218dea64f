//! Recommendation outputs handed back to the ingestion layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Best mapping target for a source column.
///
/// All fields are `None` when no target cleared the confidence threshold.
/// Callers treat that as "leave unmapped for manual resolution", not as an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub entity: Option<String>,
    pub field: Option<String>,
    #[serde(rename = "dictionary_field_id")]
    pub target_id: Option<String>,
}

impl MatchResult {
    /// The "no confident match" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(entity: impl Into<String>, field: Option<String>, target_id: Option<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            field,
            target_id,
        }
    }

    pub fn is_match(&self) -> bool {
        self.entity.is_some()
    }
}

/// Review state of a persisted field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MappingStatus {
    /// A recommendation exists and awaits human confirmation.
    Pending,
    /// The engine abstained; the column needs manual mapping.
    Unmapped,
    Confirmed,
    Rejected,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::Pending => "Pending",
            MappingStatus::Unmapped => "Unmapped",
            MappingStatus::Confirmed => "Confirmed",
            MappingStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MappingStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(MappingStatus::Pending),
            "unmapped" => Ok(MappingStatus::Unmapped),
            "confirmed" => Ok(MappingStatus::Confirmed),
            "rejected" => Ok(MappingStatus::Rejected),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// A field-mapping record as persisted by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub source_column: String,
    pub entity: Option<String>,
    pub field: Option<String>,
    pub dictionary_field_id: Option<String>,
    /// Combined ranking score of the chosen target; `None` when unmapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub status: MappingStatus,
}

impl FieldMapping {
    /// Build a record from a ranking outcome.
    pub fn from_match(source_column: impl Into<String>, result: MatchResult, score: Option<f64>) -> Self {
        let status = if result.is_match() {
            MappingStatus::Pending
        } else {
            MappingStatus::Unmapped
        };
        Self {
            source_column: source_column.into(),
            entity: result.entity,
            field: result.field,
            dictionary_field_id: result.target_id,
            score: if status == MappingStatus::Pending {
                score
            } else {
                None
            },
            status,
        }
    }

    pub fn match_result(&self) -> MatchResult {
        MatchResult {
            entity: self.entity.clone(),
            field: self.field.clone(),
            target_id: self.dictionary_field_id.clone(),
        }
    }
}
