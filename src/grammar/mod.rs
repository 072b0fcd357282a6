//! TextMate grammar loading and registration.
//!
//! The documentation site highlights fenced Flux code blocks with a custom
//! TextMate grammar shipped next to the configuration file. The grammar JSON
//! is parsed into a typed record behind a shape check that fails closed:
//! a malformed grammar aborts the load instead of being passed through to
//! the highlighter untyped.
//!
//! Key order is preserved end to end (`serde_json` `preserve_order`), so
//! loading and registering the same file twice produces byte-identical
//! records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// GrammarError
// ============================================================================

/// Grammar loading errors. All are fatal to the configuration load.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("IO error when reading grammar `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("grammar `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("grammar `{path}` is malformed: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

// ============================================================================
// Grammar
// ============================================================================

/// A TextMate grammar with its registration metadata.
///
/// `name` and `aliases` are registration fields owned by the site
/// configuration; everything else comes from the grammar file. Unknown keys
/// are preserved in `extra` so nothing the highlighter needs is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Canonical registration name (overrides whatever the file declares).
    #[serde(default)]
    pub name: String,

    /// Short language tags usable in fenced code blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// TextMate scope name, e.g. `source.flux`.
    #[serde(rename = "scopeName")]
    pub scope_name: String,

    #[serde(default, rename = "fileTypes", skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,

    /// Top-level match rules, kept as raw JSON for the highlighter.
    pub patterns: Vec<Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub repository: Map<String, Value>,

    /// Grammar keys this tool does not interpret (injections, uuid, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Grammar {
    /// Load a grammar file from disk.
    pub fn load(path: &Path) -> Result<Self, GrammarError> {
        let content =
            fs::read_to_string(path).map_err(|err| GrammarError::Io(path.to_path_buf(), err))?;
        Self::from_json(path, &content)
    }

    /// Parse grammar JSON, validating the TextMate shape before decoding.
    pub fn from_json(path: &Path, content: &str) -> Result<Self, GrammarError> {
        let value: Value =
            serde_json::from_str(content).map_err(|err| GrammarError::Json(path.to_path_buf(), err))?;

        let Some(object) = value.as_object() else {
            return Err(GrammarError::Invalid {
                path: path.to_path_buf(),
                reason: "expected a JSON object".into(),
            });
        };

        if !object.get("scopeName").is_some_and(Value::is_string) {
            return Err(GrammarError::Invalid {
                path: path.to_path_buf(),
                reason: "missing string field `scopeName`".into(),
            });
        }

        if !object.get("patterns").is_some_and(Value::is_array) {
            return Err(GrammarError::Invalid {
                path: path.to_path_buf(),
                reason: "`patterns` must be an array".into(),
            });
        }

        serde_json::from_value(value).map_err(|err| GrammarError::Json(path.to_path_buf(), err))
    }

    /// Register the grammar under a canonical name with fenced-code aliases.
    ///
    /// The canonical name always wins over the file's own `name` field.
    /// Alias merging is idempotent: registering twice never accumulates
    /// duplicates.
    #[must_use]
    pub fn register(mut self, name: &str, aliases: &[String]) -> Self {
        self.name = name.to_string();
        self.aliases.dedup();
        for alias in aliases {
            if !self.aliases.contains(alias) {
                self.aliases.push(alias.clone());
            }
        }
        self
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FLUX_GRAMMAR: &str = r##"{
        "name": "foo",
        "scopeName": "source.flux",
        "fileTypes": ["fl"],
        "patterns": [
            { "include": "#keywords" }
        ],
        "repository": {
            "keywords": { "match": "\\b(fn|let|mut)\\b", "name": "keyword.control.flux" }
        },
        "uuid": "0f6bf659-dd5b-4a4a-8b3a-3f03b54a5b0b"
    }"##;

    fn parse(content: &str) -> Result<Grammar, GrammarError> {
        Grammar::from_json(Path::new("flux.tmLanguage.json"), content)
    }

    #[test]
    fn test_canonical_name_overrides_file_name() {
        let grammar = parse(FLUX_GRAMMAR)
            .unwrap()
            .register("flux", &["fl".to_string()]);

        // The file says "foo"; the registration name wins.
        assert_eq!(grammar.name, "flux");
        assert_eq!(grammar.aliases, vec!["fl"]);
        assert_eq!(grammar.scope_name, "source.flux");
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let grammar = parse(FLUX_GRAMMAR).unwrap();
        assert!(grammar.extra.contains_key("uuid"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let aliases = vec!["fl".to_string()];
        let once = parse(FLUX_GRAMMAR).unwrap().register("flux", &aliases);
        let twice = parse(FLUX_GRAMMAR)
            .unwrap()
            .register("flux", &aliases)
            .register("flux", &aliases);

        assert_eq!(once, twice);

        // Byte-identical serialized records, no duplicate aliases.
        let a = serde_json::to_string(&once).unwrap();
        let b = serde_json::to_string(&twice).unwrap();
        assert_eq!(a, b);
        assert_eq!(twice.aliases, vec!["fl"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Grammar::load(Path::new("/nonexistent/flux.tmLanguage.json")).unwrap_err();
        assert!(matches!(err, GrammarError::Io(..)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLUX_GRAMMAR.as_bytes()).unwrap();

        let grammar = Grammar::load(file.path()).unwrap();
        assert_eq!(grammar.scope_name, "source.flux");
        assert_eq!(grammar.file_types, vec!["fl"]);
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, GrammarError::Json(..)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GrammarError::Invalid { .. }));
    }

    #[test]
    fn test_missing_scope_name_rejected() {
        let err = parse(r#"{ "name": "flux", "patterns": [] }"#).unwrap_err();
        let GrammarError::Invalid { reason, .. } = err else {
            panic!("expected Invalid");
        };
        assert!(reason.contains("scopeName"));
    }

    #[test]
    fn test_patterns_must_be_array() {
        let err = parse(r#"{ "scopeName": "source.flux", "patterns": {} }"#).unwrap_err();
        let GrammarError::Invalid { reason, .. } = err else {
            panic!("expected Invalid");
        };
        assert!(reason.contains("patterns"));
    }
}
