//! Configuration section definitions.
//!
//! Each module corresponds to a section in `fluxdoc.toml`:
//!
//! | Module     | TOML Section   | Purpose                            |
//! |------------|----------------|------------------------------------|
//! | `site`     | `[site]`       | Site info, head tags               |
//! | `theme`    | `[theme]`      | Nav, sidebar, social, footer, ...  |
//! | `markdown` | `[markdown]`   | Code themes, custom grammars       |

mod markdown;
pub mod site;
pub mod theme;

// Re-export section configs
pub use markdown::{CodeThemes, LanguageConfig, MarkdownConfig};
pub use site::{HeadConfig, HeadTag, SiteInfoConfig, SiteSectionConfig};
pub use theme::{
    FooterConfig, NavItem, OutlineConfig, SearchConfig, SearchProvider, SidebarGroup, SidebarMap,
    SocialLink, ThemeSectionConfig,
};
