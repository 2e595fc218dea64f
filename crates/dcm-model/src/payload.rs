//! JSON payload parsing for collaborator inputs.

use crate::column::SourceColumn;
use crate::dictionary::{DataEntity, DictionaryField};
use crate::error::{ModelError, Result};

/// Parse a data dictionary export: `[{id, name, entity, standard_values: [{value}]}]`.
pub fn parse_dictionary(json: &str) -> Result<Vec<DictionaryField>> {
    serde_json::from_str(json).map_err(|source| ModelError::Json {
        payload: "data dictionary",
        source,
    })
}

/// Parse a schema entity export: `[{name, fields: [{name}]}]`.
pub fn parse_entities(json: &str) -> Result<Vec<DataEntity>> {
    serde_json::from_str(json).map_err(|source| ModelError::Json {
        payload: "data entities",
        source,
    })
}

/// Parse ingested columns: `[{column_name, sample_values: [string|null]}]`.
pub fn parse_columns(json: &str) -> Result<Vec<SourceColumn>> {
    serde_json::from_str(json).map_err(|source| ModelError::Json {
        payload: "source columns",
        source,
    })
}
