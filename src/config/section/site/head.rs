//! `[site.head]` configuration: tags injected into `<head>` on every page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    /// Head entries, rendered in declaration order.
    pub elements: Vec<HeadTag>,
}

impl HeadConfig {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render all head entries as HTML, one per line, preserving order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            out.push_str(&element.render());
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// Head Tag
// ============================================================================

/// A single `<head>` entry.
///
/// Either a raw HTML string or a structured tag with attributes. Attribute
/// order in rendered output is alphabetical so rendering is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadTag {
    /// Raw HTML pasted verbatim, e.g. `'<meta name="darkreader-lock">'`.
    Raw(String),
    /// Structured tag: `{ tag = "link", attrs = { rel = "icon", href = "..." } }`.
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
    },
}

impl HeadTag {
    /// Render this entry as HTML.
    pub fn render(&self) -> String {
        match self {
            Self::Raw(html) => html.clone(),
            Self::Element { tag, attrs } => {
                let mut out = format!("<{tag}");
                for (name, value) in attrs {
                    // Head tag attributes are author-controlled; only the
                    // quote character needs escaping for well-formed output.
                    let value = value.replace('"', "&quot;");
                    write!(out, " {name}=\"{value}\"").ok();
                }
                out.push('>');
                out
            }
        }
    }
}
