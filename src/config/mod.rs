//! Site configuration management for `fluxdoc.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site] info and head tags
//! │   ├── theme      # [theme] nav, sidebar, social, search, ...
//! │   └── markdown   # [markdown] code themes and grammars
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! Loading is a single synchronous pass: locate the file, parse it, resolve
//! declared paths against the file's directory, read and register grammar
//! files, then validate everything at once. Any failure aborts the load; a
//! partially-populated descriptor never escapes. The loaded value is
//! immutable — watch mode builds a fresh one and swaps it wholesale.

pub mod section;
pub mod types;
pub mod util;

use util::{find_config_file, normalize_path};

// Re-export from section/
pub use section::{
    CodeThemes, FooterConfig, HeadConfig, HeadTag, LanguageConfig, MarkdownConfig, NavItem,
    OutlineConfig, SearchConfig, SearchProvider, SidebarGroup, SidebarMap, SiteInfoConfig,
    SiteSectionConfig, SocialLink, ThemeSectionConfig,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing fluxdoc.toml.
///
/// This is the site descriptor the external generator consumes: immutable
/// once loaded, serializable as JSON via `descriptor_json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata and head tags
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Theme settings (nav, sidebar, social, footer, search, outline)
    #[serde(default)]
    pub theme: ThemeSectionConfig,

    /// Markdown rendering settings (code themes, custom grammars)
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteSectionConfig::default(),
            theme: ThemeSectionConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from the given config path or name.
    ///
    /// Relative names are searched upward from the current directory. The
    /// site root is the config file's parent directory; every path declared
    /// in the config resolves against it.
    pub fn load(config_arg: &Path) -> Result<Self, ConfigError> {
        let config_path = find_config_file(config_arg)
            .ok_or_else(|| ConfigError::NotFound(config_arg.to_path_buf()))?;

        let mut config = Self::from_path(&config_path)?;

        config.config_path = normalize_path(&config_path);
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.normalize_paths();
        config.markdown.load_grammars()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (fluxdoc.toml) since it's always at site root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Resolve config-declared file paths against the site root.
    fn normalize_paths(&mut self) {
        if let Some(stylesheet) = self.theme.stylesheet.take() {
            self.theme.stylesheet = Some(util::expand_path(&stylesheet, &self.root));
        }

        self.markdown.normalize_paths(&self.root);
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Serialize the resolved descriptor for the generator.
    pub fn descriptor_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.theme.validate(&mut diag);
        self.markdown.validate(&mut diag);

        // Print collected warnings (grouped display)
        diag.print_warnings();

        // Return all collected errors
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site.info]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site.info]\ntitle = \"Flux\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarError;

    const FLUX_GRAMMAR: &str = r##"{
        "name": "foo",
        "scopeName": "source.flux",
        "patterns": [{ "include": "#keywords" }],
        "repository": { "keywords": { "match": "\\b(fn|let)\\b" } }
    }"##;

    /// Write a config + grammar into a temp dir and load it.
    fn load_site(config: &str) -> Result<SiteConfig, ConfigError> {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("syntaxes")).unwrap();
        fs::write(
            dir.path().join("syntaxes/flux.tmLanguage.json"),
            FLUX_GRAMMAR,
        )
        .unwrap();
        let config_path = dir.path().join("fluxdoc.toml");
        fs::write(&config_path, config).unwrap();
        SiteConfig::load(&config_path)
    }

    const BASE_CONFIG: &str = r#"
[site.info]
title = "Flux"
description = "A systems language with trait-based generics"
base = "/flux-lang/"

[theme]
logo = "/logo.svg"
nav = [
    { text = "Guide", link = "/guide/" },
    { text = "Reference", link = "/reference/" },
]

[theme.sidebar]
"/guide/" = [
    { text = "Introduction", items = [
        { text = "What is Flux?", link = "/guide/what-is-flux" },
    ] },
]

[theme.footer]
message = "Released under the MIT License."

[[markdown.languages]]
path = "syntaxes/flux.tmLanguage.json"
name = "flux"
aliases = ["fl"]
"#;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = SiteConfig::from_str("[site\ntitle = \"Flux\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.info.title, "");
        assert_eq!(config.site.info.base, "/");
        assert_eq!(config.theme.search.provider, SearchProvider::Local);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content =
            "[site.info]\ntitle = \"Flux\"\ndescription = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.site.info.title, "Flux");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site.info]\ntitle = \"Flux\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_load_full_site() {
        let config = load_site(BASE_CONFIG).unwrap();

        // Nav targets stay exactly as written; base is never prepended here.
        assert_eq!(config.site.info.base, "/flux-lang/");
        assert_eq!(config.theme.nav[0].link, "/guide/");

        // The grammar file's own name is overridden by the registration.
        let grammar = config.markdown.grammars().next().unwrap();
        assert_eq!(grammar.name, "flux");
        assert_eq!(grammar.aliases, vec!["fl"]);
    }

    #[test]
    fn test_missing_config_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/fluxdoc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_missing_grammar_file_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fluxdoc.toml");
        fs::write(
            &config_path,
            r#"
[site.info]
title = "Flux"
description = "Test"

[[markdown.languages]]
path = "syntaxes/flux.tmLanguage.json"
name = "flux"
aliases = ["fl"]
"#,
        )
        .unwrap();

        let err = SiteConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Grammar(GrammarError::Io(..))));
    }

    #[test]
    fn test_validation_failures_are_collected() {
        let err = load_site(
            r#"
[site.info]
description = "no title"
base = "/flux-lang"

[theme]
nav = [{ text = "Guide", link = "guide/" }]
"#,
        )
        .unwrap_err();

        let ConfigError::Diagnostics(diag) = err else {
            panic!("expected diagnostics");
        };
        // missing title + malformed base + relative nav link
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_descriptor_json_shape() {
        let config = load_site(BASE_CONFIG).unwrap();
        let value = config.descriptor_json().unwrap();

        assert_eq!(value["site"]["info"]["base"], "/flux-lang/");
        assert_eq!(value["theme"]["nav"][0]["link"], "/guide/");
        assert_eq!(
            value["markdown"]["languages"][0]["grammar"]["name"],
            "flux"
        );
        // Internal paths never leak into the descriptor.
        assert!(value.get("config_path").is_none());
        assert!(value.get("root").is_none());
    }
}
