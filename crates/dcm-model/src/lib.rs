//! Shared types for recommending data-dictionary mappings of ingested columns.
//!
//! The types here mirror the payloads exchanged with the surrounding
//! migration-planning system: dictionary fields and schema entities come in,
//! source columns are ranked against them, and match results go back out.

pub mod column;
pub mod dictionary;
pub mod error;
pub mod mapping;
pub mod payload;

pub use column::{MAX_SAMPLE_VALUES, SourceColumn};
pub use dictionary::{DataEntity, DictionaryField, EntityField, StandardValue};
pub use error::{ModelError, Result};
pub use mapping::{FieldMapping, MappingStatus, MatchResult};
pub use payload::{parse_columns, parse_dictionary, parse_entities};
