//! Synonym table for common infrastructure field names.
//!
//! Each entry maps a canonical token to phrasings seen in inventory exports.
//! A target field qualifies for a synonym boost when it mentions the
//! canonical token (or a variant) and the source column mentions a variant.
//! The canonical token alone never counts on the source side.

use serde::{Deserialize, Serialize};

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "hostname",
        &["host name", "server name", "node name", "name", "dns name"],
    ),
    ("ip", &["ip address", "ipv4", "address"]),
    ("os", &["operating system", "os type", "os name"]),
    ("cpu", &["cpu count", "cores", "processors"]),
    ("ram", &["ram size", "memory", "memory size"]),
];

/// A canonical token and its known variants, all lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl SynonymEntry {
    pub fn new<I, S>(canonical: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into().to_lowercase(),
            variants: variants
                .into_iter()
                .map(|v| v.into().to_lowercase())
                .collect(),
        }
    }

    fn describes_target(&self, field: &str) -> bool {
        field.contains(&self.canonical) || self.variants.iter().any(|v| field.contains(v.as_str()))
    }

    /// Only variants count on the source side; the bare canonical token is
    /// too short to be told apart from ordinary words.
    fn mentioned_in(&self, text: &str) -> bool {
        self.variants.iter().any(|v| text.contains(v.as_str()))
    }
}

/// Ordered synonym entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SYNONYMS
                .iter()
                .map(|(canonical, variants)| SynonymEntry::new(*canonical, variants.iter().copied()))
                .collect(),
        }
    }
}

impl SynonymTable {
    pub fn new(entries: Vec<SynonymEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    /// Canonical token whose synonyms link `target_field` to the source, if any.
    ///
    /// All inputs are expected lower-cased.
    pub fn matching_canonical(
        &self,
        target_field: &str,
        field_hint: &str,
        source: &str,
    ) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| {
                entry.describes_target(target_field)
                    && (entry.mentioned_in(field_hint) || entry.mentioned_in(source))
            })
            .map(|entry| entry.canonical.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_name_links_to_hostname() {
        let table = SynonymTable::default();
        assert_eq!(
            table.matching_canonical("hostname", "server name", "server name"),
            Some("hostname")
        );
    }

    #[test]
    fn test_target_must_mention_the_canonical_token() {
        let table = SynonymTable::default();
        assert_eq!(
            table.matching_canonical("environment", "memory size", "memory size"),
            None
        );
    }

    #[test]
    fn test_bare_canonical_in_source_is_not_a_synonym_hit() {
        let table = SynonymTable::default();
        // "ip" is a substring of "zip", so only a variant may link the two.
        assert_eq!(table.matching_canonical("postal zip code", "ip", "ip"), None);
        assert_eq!(table.matching_canonical("os_version", "os", "os"), None);
        assert_eq!(
            table.matching_canonical("postal zip code", "ip address", "ip address"),
            Some("ip")
        );
    }

    #[test]
    fn test_custom_table_deserializes_from_json() {
        let table: SynonymTable = serde_json::from_str(
            r#"[{"canonical": "owner", "variants": ["business owner", "app owner"]}]"#,
        )
        .expect("deserialize synonyms");
        assert_eq!(table.entries().len(), 1);
        assert_eq!(
            table.matching_canonical("owner", "app owner", "app owner"),
            Some("owner")
        );
    }
}
