//! Theme contract: the default page chrome and the extension wrapper.
//!
//! The generator drives a theme through three capabilities: wrapping page
//! content in chrome (`layout`), rendering the 404 page (`not_found`), and
//! contributing app-level enhancements collected once at startup
//! (`enhance_app`).
//!
//! The site's own theme is [`ExtendedTheme`]: a pure delegation wrapper
//! around [`DefaultTheme`] whose only addition is one extra stylesheet. It
//! holds no state and introduces no failure modes of its own.

use crate::config::SiteConfig;
use std::path::PathBuf;

/// Page-chrome capabilities the generator invokes.
pub trait Theme {
    /// Wrap rendered page content in site chrome.
    fn layout(&self, page: &PageContext<'_>) -> String;

    /// Render the 404 page.
    fn not_found(&self) -> String;

    /// Contribute app-level enhancements (stylesheets, for now).
    fn enhance_app(&self, app: &mut AppEnhancements);
}

/// Inputs for laying out a single page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub title: &'a str,
    /// Already-rendered page body, inserted verbatim.
    pub content: &'a str,
}

/// App-level contributions collected once at generator startup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppEnhancements {
    /// Stylesheets applied globally, in contribution order.
    pub stylesheets: Vec<PathBuf>,
}

// ============================================================================
// Default Theme
// ============================================================================

/// The generator's stock theme.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn layout(&self, page: &PageContext<'_>) -> String {
        format!(
            "<main class=\"doc\">\n<h1>{}</h1>\n{}\n</main>",
            escape_text(page.title),
            page.content
        )
    }

    fn not_found(&self) -> String {
        "<main class=\"doc not-found\">\n<h1>404</h1>\n<p>Page not found.</p>\n</main>".into()
    }

    fn enhance_app(&self, _app: &mut AppEnhancements) {}
}

// ============================================================================
// Extended Theme
// ============================================================================

/// Delegation wrapper: every capability is forwarded unchanged, and one
/// extra stylesheet is contributed on top of whatever the inner theme adds.
#[derive(Debug, Clone)]
pub struct ExtendedTheme<T = DefaultTheme> {
    inner: T,
    stylesheet: PathBuf,
}

impl<T: Theme> ExtendedTheme<T> {
    pub fn new(inner: T, stylesheet: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            stylesheet: stylesheet.into(),
        }
    }
}

impl<T: Theme> Theme for ExtendedTheme<T> {
    fn layout(&self, page: &PageContext<'_>) -> String {
        self.inner.layout(page)
    }

    fn not_found(&self) -> String {
        self.inner.not_found()
    }

    fn enhance_app(&self, app: &mut AppEnhancements) {
        self.inner.enhance_app(app);
        app.stylesheets.push(self.stylesheet.clone());
    }
}

/// Build the site theme from the descriptor: the default theme, extended
/// with the configured stylesheet when one is set.
pub fn site_theme(config: &SiteConfig) -> Box<dyn Theme> {
    match &config.theme.stylesheet {
        Some(stylesheet) => Box::new(ExtendedTheme::new(DefaultTheme, stylesheet.clone())),
        None => Box::new(DefaultTheme),
    }
}

/// Minimal text escaping for titles injected into chrome markup.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============================================================================
// tests
// ============================================================================
