//! `[site.info]` configuration.
//!
//! Basic site metadata: title, description, the base path the site is
//! deployed under, and the content language.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata injected into every generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title, shown in the browser tab and search results.
    pub title: String,

    /// Site description (meta description tag).
    pub description: String,

    /// Base path the site is served under, e.g. "/flux-lang/" for a
    /// GitHub Pages project site. Must start and end with '/'.
    pub base: String,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,
}

/// TOML field paths for [`SiteInfoConfig`].
pub struct SiteInfoFields {
    pub title: FieldPath,
    pub description: FieldPath,
    pub base: FieldPath,
    pub language: FieldPath,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base: "/".into(),
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoFields = SiteInfoFields {
        title: FieldPath::new("site.info.title"),
        description: FieldPath::new("site.info.description"),
        base: FieldPath::new("site.info.base"),
        language: FieldPath::new("site.info.language"),
    };

    /// Validate site metadata.
    ///
    /// # Checks
    /// - `title` must be set
    /// - `base` must start and end with '/'
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.is_empty() {
            diag.error(Self::FIELDS.title, "required");
        }

        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            diag.error_with_hint(
                Self::FIELDS.base,
                format!("'{}' must start and end with '/'", self.base),
                "use format like \"/flux-lang/\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.info.base, "/");
        assert_eq!(config.site.info.language, "en");
    }

    #[test]
    fn test_base_round_trip() {
        let config = test_parse_config("base = \"/flux-lang/\"");
        assert_eq!(config.site.info.base, "/flux-lang/");

        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(&mut diag);
        // title/description come from the test helper; base is well-formed
        assert!(diag.is_empty());
    }

    #[test]
    fn test_base_without_trailing_slash_rejected() {
        let info = SiteInfoConfig {
            title: "Flux".into(),
            base: "/flux-lang".into(),
            ..SiteInfoConfig::default()
        };

        let mut diag = ConfigDiagnostics::new();
        info.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_missing_title_rejected() {
        let info = SiteInfoConfig::default();

        let mut diag = ConfigDiagnostics::new();
        info.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
