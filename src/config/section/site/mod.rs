//! `[site]` section configuration.
//!
//! | Module | TOML Section  | Purpose                                |
//! |--------|---------------|----------------------------------------|
//! | `info` | `[site.info]` | Title, description, base path, language |
//! | `head` | `[site.head]` | Tags injected into `<head>`            |

mod head;
mod info;

pub use head::{HeadConfig, HeadTag};
pub use info::SiteInfoConfig;

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

/// `[site]` section: metadata and head tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata (title, description, base, language).
    pub info: SiteInfoConfig,

    /// Head tag entries.
    pub head: HeadConfig,
}

impl SiteSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.info.validate(diag);
    }
}
