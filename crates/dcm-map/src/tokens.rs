//! Splits a raw column name into an entity hint and a field hint.
//!
//! Column headers such as `Server | Hostname` or `Database: Version` carry
//! the entity before a separator. Anything without one is treated as a bare
//! field name.

/// Separators tried in order; the first one present wins.
pub const HINT_SEPARATORS: [char; 4] = ['|', '-', ':', '/'];

/// Entity and field hints extracted from a column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hints {
    pub entity: Option<String>,
    pub field: String,
}

/// Extract hints from a raw source column name.
///
/// Never fails: empty or separator-only input yields an empty field hint.
pub fn extract_hints(source: &str) -> Hints {
    let trimmed = source.trim();
    if let Some(separator) = HINT_SEPARATORS.iter().find(|sep| trimmed.contains(**sep)) {
        let parts: Vec<&str> = trimmed
            .split(*separator)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [] => {
                return Hints {
                    entity: None,
                    field: String::new(),
                };
            }
            [entity, rest @ ..] if !rest.is_empty() => {
                return Hints {
                    entity: Some((*entity).to_string()),
                    field: rest.join(" "),
                };
            }
            _ => {}
        }
    }
    Hints {
        entity: None,
        field: trimmed.to_lowercase(),
    }
}
