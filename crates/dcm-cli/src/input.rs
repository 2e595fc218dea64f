//! Loading collaborator exports from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use dcm_map::{MatchCatalog, RankerConfig};
use dcm_model::{SourceColumn, parse_columns, parse_dictionary, parse_entities};

use crate::logging::redact_value;

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Build the match catalog from a dictionary export and optional entities export.
pub fn load_catalog(dictionary: &Path, entities: Option<&Path>) -> Result<MatchCatalog> {
    let fields = parse_dictionary(&read(dictionary)?)
        .with_context(|| format!("parse {}", dictionary.display()))?;
    let entities = match entities {
        Some(path) => Some(
            parse_entities(&read(path)?).with_context(|| format!("parse {}", path.display()))?,
        ),
        None => None,
    };
    let catalog = MatchCatalog::build(&fields, entities.as_deref());
    debug!(
        dictionary = %dictionary.display(),
        targets = catalog.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Load the source columns export.
pub fn load_columns(path: &Path) -> Result<Vec<SourceColumn>> {
    let columns =
        parse_columns(&read(path)?).with_context(|| format!("parse {}", path.display()))?;
    for column in &columns {
        trace!(
            column = %column.name,
            samples = ?column.sample_values.iter().map(|v| redact_value(v)).collect::<Vec<_>>(),
            "loaded column"
        );
    }
    Ok(columns)
}

/// Resolve ranker configuration: defaults, then an optional override file,
/// then an explicit minimum score.
pub fn load_ranker_config(path: Option<&Path>, min_score: Option<f64>) -> Result<RankerConfig> {
    let mut config = match path {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("parse ranker config {}", path.display()))?,
        None => RankerConfig::default(),
    };
    if let Some(min_score) = min_score {
        config = config.with_min_score(min_score);
    }
    Ok(config)
}
