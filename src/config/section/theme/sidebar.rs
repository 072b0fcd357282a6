//! Sidebar trees keyed by URL prefix.
//!
//! Each key in `[theme.sidebar]` is a site-absolute path prefix; pages whose
//! URL matches a prefix get that prefix's groups rendered as their sidebar.
//! When several keys match, the longest one wins, so `/guide/advanced/` can
//! shadow `/guide/` without ambiguity.
//!
//! # Example
//!
//! ```toml
//! [theme.sidebar]
//! "/guide/" = [
//!     { text = "Introduction", items = [
//!         { text = "What is Flux?", link = "/guide/what-is-flux" },
//!     ] },
//! ]
//! ```

use super::nav::NavItem;
use crate::config::{ConfigDiagnostics, FieldPath, util::validate_target};
use rustc_hash::FxHashSet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Sidebar Group
// ============================================================================

/// A named, ordered cluster of sidebar links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    /// Section label.
    pub text: String,
    /// Links in rendering order.
    #[serde(default)]
    pub items: Vec<NavItem>,
}

// ============================================================================
// Sidebar Map
// ============================================================================

/// Ordered mapping from URL prefix to sidebar groups.
///
/// Declaration order from the config file is preserved (it determines output
/// order in `fluxdoc query`); resolution order is by prefix length, so file
/// order never changes which sidebar a page gets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarMap {
    entries: Vec<(String, Vec<SidebarGroup>)>,
}

impl SidebarMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarGroup])> {
        self.entries
            .iter()
            .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
    }

    /// Look up a prefix by exact key.
    pub fn get(&self, prefix: &str) -> Option<&[SidebarGroup]> {
        self.entries
            .iter()
            .find(|(key, _)| key == prefix)
            .map(|(_, groups)| groups.as_slice())
    }

    /// Resolve the sidebar for a page path. Longest matching prefix wins.
    ///
    /// Keys are validated to be byte-unique, so the winner is unambiguous.
    pub fn resolve(&self, page_path: &str) -> Option<&[SidebarGroup]> {
        self.entries
            .iter()
            .filter(|(prefix, _)| page_path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, groups)| groups.as_slice())
    }

    /// Validate sidebar keys and every item link.
    ///
    /// # Checks
    /// - keys are non-empty and start with '/'
    /// - no two keys are byte-identical
    /// - every item link passes the target rule
    pub fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();

        for (prefix, groups) in &self.entries {
            if prefix.is_empty() {
                diag.error(field, "sidebar prefix must not be empty");
            } else if !prefix.starts_with('/') {
                diag.error_with_hint(
                    field,
                    format!("sidebar prefix '{prefix}' must start with '/'"),
                    "prefixes are site-absolute, e.g. \"/guide/\"",
                );
            }

            if !seen.insert(prefix.as_str()) {
                diag.error(field, format!("duplicate sidebar prefix '{prefix}'"));
            }

            for group in groups {
                if group.text.is_empty() {
                    diag.error(field, format!("group under '{prefix}' has empty text"));
                }
                for item in &group.items {
                    validate_target(&item.link, field, diag);
                }
            }
        }
    }
}

// Serialized as a plain map so `query` output matches the config shape.
impl Serialize for SidebarMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, groups) in &self.entries {
            map.serialize_entry(prefix, groups)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SidebarMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarMapVisitor;

        impl<'de> Visitor<'de> for SidebarMapVisitor {
            type Value = SidebarMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from URL prefix to sidebar groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Vec<SidebarGroup>)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((prefix, groups)) =
                    access.next_entry::<String, Vec<SidebarGroup>>()?
                {
                    // TOML already rejects duplicate table keys; this guards
                    // the JSON/value deserialization paths.
                    if entries.iter().any(|(key, _)| *key == prefix) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate sidebar prefix '{prefix}'"
                        )));
                    }
                    entries.push((prefix, groups));
                }

                Ok(SidebarMap { entries })
            }
        }

        deserializer.deserialize_map(SidebarMapVisitor)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn sample_map() -> SidebarMap {
        let config = test_parse_config(
            r#"[theme.sidebar]
"/guide/" = [
    { text = "Introduction", items = [
        { text = "What is Flux?", link = "/guide/what-is-flux" },
        { text = "Getting Started", link = "/guide/getting-started" },
    ] },
    { text = "Language", items = [
        { text = "Traits", link = "/guide/traits" },
    ] },
]
"/guide/advanced/" = [
    { text = "Advanced", items = [
        { text = "Monomorphization", link = "/guide/advanced/monomorphization" },
    ] },
]
"/reference/" = [
    { text = "Reference", items = [
        { text = "Grammar", link = "/reference/grammar" },
    ] },
]"#,
        );
        config.theme.sidebar
    }

    #[test]
    fn test_order_preserved() {
        let map = sample_map();
        let prefixes: Vec<_> = map.iter().map(|(prefix, _)| prefix).collect();
        assert_eq!(prefixes, vec!["/guide/", "/guide/advanced/", "/reference/"]);

        let groups = map.get("/guide/").unwrap();
        assert_eq!(groups[0].text, "Introduction");
        assert_eq!(groups[0].items[0].link, "/guide/what-is-flux");
        assert_eq!(groups[1].text, "Language");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let map = sample_map();

        let groups = map.resolve("/guide/advanced/monomorphization").unwrap();
        assert_eq!(groups[0].text, "Advanced");

        let groups = map.resolve("/guide/traits").unwrap();
        assert_eq!(groups[0].text, "Introduction");

        assert!(map.resolve("/blog/announcement").is_none());
    }

    #[test]
    fn test_validate_accepts_sample() {
        let map = sample_map();
        let mut diag = ConfigDiagnostics::new();
        map.validate(FieldPath::new("theme.sidebar"), &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let map = SidebarMap {
            entries: vec![
                (String::new(), Vec::new()),
                ("guide/".into(), Vec::new()),
            ],
        };
        let mut diag = ConfigDiagnostics::new();
        map.validate(FieldPath::new("theme.sidebar"), &mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let map = SidebarMap {
            entries: vec![
                ("/guide/".into(), Vec::new()),
                ("/guide/".into(), Vec::new()),
            ],
        };
        let mut diag = ConfigDiagnostics::new();
        map.validate(FieldPath::new("theme.sidebar"), &mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        let result: Result<SidebarMap, _> =
            serde_json::from_str(r#"{ "/guide/": [], "/guide/": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let map = sample_map();
        let json = serde_json::to_string(&map).unwrap();
        let back: SidebarMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
