//! `fluxdoc check` command.
//!
//! Validation itself happens inside `SiteConfig::load`; reaching this
//! command means the descriptor is sound, so all that is left is reporting.

use crate::cli::args::CheckArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::theme::{AppEnhancements, site_theme};
use anyhow::Result;

pub fn run(config: &SiteConfig, args: &CheckArgs) -> Result<()> {
    log!(
        "check";
        "configuration ok: {}",
        config.root_relative(&config.config_path).display()
    );

    if args.summary {
        print_summary(config);
    }

    Ok(())
}

/// Print a short overview of what the descriptor declares.
fn print_summary(config: &SiteConfig) {
    log!("check"; "site: '{}' at base '{}'", config.site.info.title, config.site.info.base);
    log!("check"; "nav: {} items, social: {} links", config.theme.nav.len(), config.theme.social.len());

    let groups: usize = config
        .theme
        .sidebar
        .iter()
        .map(|(_, groups)| groups.len())
        .sum();
    log!(
        "check";
        "sidebar: {} prefixes, {} groups",
        config.theme.sidebar.len(),
        groups
    );

    for lang in &config.markdown.languages {
        if let Some(grammar) = &lang.grammar {
            log!(
                "check";
                "grammar: {} (aliases: {}) from {}",
                grammar.name,
                grammar.aliases.join(", "),
                config.root_relative(&lang.path).display()
            );
        }
    }

    let mut app = AppEnhancements::default();
    site_theme(config).enhance_app(&mut app);
    match app.stylesheets.as_slice() {
        [] => log!("check"; "theme: default"),
        sheets => {
            for sheet in sheets {
                log!(
                    "check";
                    "theme: default + {}",
                    config.root_relative(sheet).display()
                );
            }
        }
    }
}
