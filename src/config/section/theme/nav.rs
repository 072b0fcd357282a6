//! Navigation, social-link, and footer entries for the `[theme]` section.

use crate::config::{ConfigDiagnostics, FieldPath, util::validate_target};
use serde::{Deserialize, Serialize};

// ============================================================================
// Nav Item
// ============================================================================

/// A single navigation link: `{ text = "Guide", link = "/guide/" }`.
///
/// Also used for sidebar items; declaration order determines on-page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link label.
    pub text: String,
    /// Absolute URL or site-absolute path.
    pub link: String,
}

impl NavItem {
    pub fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if self.text.is_empty() {
            diag.error(field, format!("entry for '{}' has empty text", self.link));
        }
        validate_target(&self.link, field, diag);
    }
}

// ============================================================================
// Social Link
// ============================================================================

/// Social link shown in the nav bar: `{ icon = "github", link = "https://..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform icon identifier (e.g. "github", "discord").
    pub icon: String,
    pub link: String,
}

impl SocialLink {
    pub fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if self.icon.is_empty() {
            diag.error(field, format!("entry for '{}' has empty icon", self.link));
        }
        validate_target(&self.link, field, diag);
    }
}

// ============================================================================
// Footer
// ============================================================================

/// Footer text shown on every page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Message line, e.g. "Released under the MIT License."
    pub message: String,
    /// Copyright line.
    pub copyright: String,
}
