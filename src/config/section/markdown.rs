//! `[markdown]` section configuration.
//!
//! Code-block rendering options: the light/dark theme pair and the custom
//! language grammars registered for fenced-code highlighting.
//!
//! # Example
//!
//! ```toml
//! [markdown.theme]
//! light = "github-light"
//! dark = "github-dark"
//!
//! [[markdown.languages]]
//! path = "syntaxes/flux.tmLanguage.json"
//! name = "flux"
//! aliases = ["fl"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::grammar::{Grammar, GrammarError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Code Themes
// ============================================================================

/// Code-block color themes for light and dark mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeThemes {
    pub light: String,
    pub dark: String,
}

impl Default for CodeThemes {
    fn default() -> Self {
        Self {
            light: "github-light".into(),
            dark: "github-dark".into(),
        }
    }
}

// ============================================================================
// Language Registration
// ============================================================================

/// A custom language grammar registration.
///
/// `grammar` is populated after the config file parses, by reading and
/// merging the grammar file; it is `None` only on a config that has not
/// finished loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Grammar JSON file, resolved relative to the config file.
    pub path: PathBuf,

    /// Canonical registration name, overriding the file's own `name`.
    pub name: String,

    /// Fenced-code-block language tags for this grammar.
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<Grammar>,
}

// ============================================================================
// Main MarkdownConfig
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Light/dark code themes.
    pub theme: CodeThemes,

    /// Custom grammar registrations.
    pub languages: Vec<LanguageConfig>,
}

/// TOML field paths for [`MarkdownConfig`].
pub struct MarkdownFields {
    pub theme: FieldPath,
    pub languages: FieldPath,
}

impl MarkdownConfig {
    pub const FIELDS: MarkdownFields = MarkdownFields {
        theme: FieldPath::new("markdown.theme"),
        languages: FieldPath::new("markdown.languages"),
    };

    /// Resolve grammar paths against the config file's directory.
    pub fn normalize_paths(&mut self, root: &Path) {
        for lang in &mut self.languages {
            lang.path = crate::config::util::expand_path(&lang.path, root);
        }
    }

    /// Read, validate, and register every declared grammar.
    ///
    /// Any failure aborts the whole load; a descriptor with half-loaded
    /// grammars never escapes.
    pub fn load_grammars(&mut self) -> Result<(), GrammarError> {
        for lang in &mut self.languages {
            let grammar = Grammar::load(&lang.path)?;
            lang.grammar = Some(grammar.register(&lang.name, &lang.aliases));
        }
        Ok(())
    }

    /// Iterate loaded grammars (empty before `load_grammars`).
    pub fn grammars(&self) -> impl Iterator<Item = &Grammar> {
        self.languages.iter().filter_map(|lang| lang.grammar.as_ref())
    }

    /// Validate registrations.
    ///
    /// # Checks
    /// - theme identifiers are non-empty
    /// - every registration has a non-empty name
    /// - names and aliases do not collide across registrations
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.theme.light.is_empty() || self.theme.dark.is_empty() {
            diag.error(Self::FIELDS.theme, "light and dark themes must be set");
        }

        let mut tags = FxHashSet::default();
        for lang in &self.languages {
            if lang.name.is_empty() {
                diag.error(
                    Self::FIELDS.languages,
                    format!("grammar '{}' needs a registration name", lang.path.display()),
                );
                continue;
            }

            for tag in std::iter::once(&lang.name).chain(&lang.aliases) {
                if !tags.insert(tag.clone()) {
                    diag.error(
                        Self::FIELDS.languages,
                        format!("language tag '{tag}' registered more than once"),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_theme_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.markdown.theme.light, "github-light");
        assert_eq!(config.markdown.theme.dark, "github-dark");
        assert!(config.markdown.languages.is_empty());
    }

    #[test]
    fn test_language_registration_parse() {
        let config = test_parse_config(
            r#"[[markdown.languages]]
path = "syntaxes/flux.tmLanguage.json"
name = "flux"
aliases = ["fl"]"#,
        );
        let lang = &config.markdown.languages[0];
        assert_eq!(lang.name, "flux");
        assert_eq!(lang.aliases, vec!["fl"]);
        // Not loaded yet: parsing alone never touches the filesystem.
        assert!(lang.grammar.is_none());
    }

    #[test]
    fn test_duplicate_tags_rejected() {
        let config = test_parse_config(
            r#"[[markdown.languages]]
path = "a.json"
name = "flux"
aliases = ["fl"]

[[markdown.languages]]
path = "b.json"
name = "fl"
"#,
        );
        let mut diag = ConfigDiagnostics::new();
        config.markdown.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_missing_grammar_file_fails_load() {
        let mut markdown = MarkdownConfig::default();
        markdown.languages.push(LanguageConfig {
            path: "/nonexistent/flux.tmLanguage.json".into(),
            name: "flux".into(),
            aliases: vec!["fl".into()],
            grammar: None,
        });

        assert!(matches!(
            markdown.load_grammars(),
            Err(GrammarError::Io(..))
        ));
    }
}
