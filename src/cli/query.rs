//! `fluxdoc query` command: emit the resolved descriptor as JSON.
//!
//! This is the hand-off point to the external generator: the output is the
//! fully-resolved, validated descriptor with grammars embedded.

use std::fs;
use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

use crate::cli::args::QueryArgs;
use crate::config::SiteConfig;
use crate::log;

pub fn run(config: &SiteConfig, args: &QueryArgs) -> Result<()> {
    let descriptor = config.descriptor_json()?;

    let output = if let Some(ref fields) = args.fields {
        filter_fields(&descriptor, fields)
    } else {
        descriptor
    };

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    // Output to file or stdout
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote descriptor to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Filter to specific top-level sections, preserving descriptor order.
///
/// A requested section that does not exist is shown as null, so typos are
/// visible instead of silently producing `{}`.
fn filter_fields(descriptor: &JsonValue, fields: &[String]) -> JsonValue {
    let mut obj = Map::new();

    if let JsonValue::Object(sections) = descriptor {
        for field in fields {
            match sections.get(field) {
                Some(value) => obj.insert(field.clone(), value.clone()),
                None => obj.insert(field.clone(), JsonValue::Null),
            };
        }
    }

    JsonValue::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_fields_selects_sections() {
        let descriptor = json!({
            "site": { "info": { "title": "Flux" } },
            "theme": { "nav": [] },
            "markdown": { "languages": [] },
        });

        let filtered = filter_fields(&descriptor, &["theme".to_string()]);
        assert_eq!(filtered, json!({ "theme": { "nav": [] } }));
    }

    #[test]
    fn test_filter_fields_unknown_section_is_null() {
        let descriptor = json!({ "site": {} });
        let filtered = filter_fields(&descriptor, &["sidebar".to_string()]);
        assert_eq!(filtered, json!({ "sidebar": null }));
    }
}
