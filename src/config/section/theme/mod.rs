//! `[theme]` section configuration.
//!
//! Everything the default theme renders around page content: logo, nav bar,
//! sidebar trees, social links, footer, search, outline depth, and the
//! optional extension stylesheet.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! logo = "/logo.svg"
//! site_title = "Flux"
//! stylesheet = "theme/custom.css"
//! nav = [{ text = "Guide", link = "/guide/" }]
//! social = [{ icon = "github", link = "https://github.com/flux-lang/flux" }]
//! ```

mod nav;
mod search;
mod sidebar;

pub use nav::{FooterConfig, NavItem, SocialLink};
pub use search::{OutlineConfig, SearchConfig, SearchProvider};
pub use sidebar::{SidebarGroup, SidebarMap};

use crate::config::{ConfigDiagnostics, FieldPath, util::validate_target};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Theme section configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Logo shown in the nav bar, as a site-absolute path or URL.
    pub logo: Option<String>,

    /// Nav-bar title; falls back to `site.info.title` when unset.
    pub site_title: Option<String>,

    /// Extra stylesheet applied on top of the default theme,
    /// resolved relative to the config file.
    pub stylesheet: Option<PathBuf>,

    /// Top navigation links, in order.
    pub nav: Vec<NavItem>,

    /// Sidebar trees keyed by URL prefix.
    pub sidebar: SidebarMap,

    /// Social links shown in the nav bar, in order.
    pub social: Vec<SocialLink>,

    /// Footer text.
    pub footer: FooterConfig,

    /// Search backend selection.
    pub search: SearchConfig,

    /// On-page outline depth.
    pub outline: OutlineConfig,
}

/// TOML field paths for [`ThemeSectionConfig`].
pub struct ThemeFields {
    pub logo: FieldPath,
    pub stylesheet: FieldPath,
    pub nav: FieldPath,
    pub sidebar: FieldPath,
    pub social: FieldPath,
}

impl ThemeSectionConfig {
    pub const FIELDS: ThemeFields = ThemeFields {
        logo: FieldPath::new("theme.logo"),
        stylesheet: FieldPath::new("theme.stylesheet"),
        nav: FieldPath::new("theme.nav"),
        sidebar: FieldPath::new("theme.sidebar"),
        social: FieldPath::new("theme.social"),
    };

    /// Validate the theme section.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(logo) = &self.logo {
            validate_target(logo, Self::FIELDS.logo, diag);
        }

        // The stylesheet is read by the theme extension, so it must exist.
        // Paths are normalized to absolute before validation runs.
        if let Some(stylesheet) = &self.stylesheet
            && !stylesheet.exists()
        {
            diag.error(
                Self::FIELDS.stylesheet,
                format!("stylesheet '{}' does not exist", stylesheet.display()),
            );
        }

        for item in &self.nav {
            item.validate(Self::FIELDS.nav, diag);
        }

        self.sidebar.validate(Self::FIELDS.sidebar, diag);

        for social in &self.social {
            social.validate(Self::FIELDS.social, diag);
        }

        self.outline.validate(diag);
    }
}
