//! Search provider and outline settings for the `[theme]` section.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

// ============================================================================
// Search
// ============================================================================

/// Search backend selection.
///
/// `local` builds a search index at build time; there is no hosted/remote
/// provider. The index building itself happens in the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Locally-indexed, build-time search.
    #[default]
    Local,

    /// Search disabled.
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
}

impl SearchConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != SearchProvider::None
    }
}

// ============================================================================
// Outline
// ============================================================================

/// Range of heading levels shown in the on-page outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Smallest heading level included (1 = `<h1>`).
    pub min: u8,
    /// Largest heading level included.
    pub max: u8,
}

/// TOML field paths for [`OutlineConfig`].
pub struct OutlineFields {
    pub min: FieldPath,
    pub max: FieldPath,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

impl OutlineConfig {
    pub const FIELDS: OutlineFields = OutlineFields {
        min: FieldPath::new("theme.outline.min"),
        max: FieldPath::new("theme.outline.max"),
    };

    /// Validate the heading-level range.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.min < 1 || self.min > 6 {
            diag.error(Self::FIELDS.min, "heading level must be between 1 and 6");
        }
        if self.max < 1 || self.max > 6 {
            diag.error(Self::FIELDS.max, "heading level must be between 1 and 6");
        }
        if self.min > self.max {
            diag.error_with_hint(
                Self::FIELDS.min,
                format!("min level {} is larger than max level {}", self.min, self.max),
                "use e.g. min = 2, max = 3",
            );
        }
    }
}
