//! Source columns awaiting a mapping recommendation.

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on sampled values kept per column.
pub const MAX_SAMPLE_VALUES: usize = 50;

/// A column from an externally supplied dataset.
///
/// Null samples are dropped on deserialization and the sample is capped at
/// [`MAX_SAMPLE_VALUES`] entries, keeping the first ones seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColumn {
    #[serde(rename = "column_name", alias = "name")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_samples")]
    pub sample_values: Vec<String>,
}

impl SourceColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sample_values: Vec::new(),
        }
    }

    /// Attach sampled values, keeping at most [`MAX_SAMPLE_VALUES`].
    #[must_use]
    pub fn with_samples<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_values = values
            .into_iter()
            .take(MAX_SAMPLE_VALUES)
            .map(Into::into)
            .collect();
        self
    }

    pub fn has_samples(&self) -> bool {
        !self.sample_values.is_empty()
    }
}

fn deserialize_samples<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .take(MAX_SAMPLE_VALUES)
        .collect())
}
