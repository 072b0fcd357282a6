//! Configuration utility functions.

use crate::config::{ConfigDiagnostics, FieldPath};
use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/flux/docs/guide/    ← cwd
/// /home/user/flux/fluxdoc.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    // First check if config_name is an absolute path or exists in cwd
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from cwd looking for config file
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Normalize a path to absolute form without requiring it to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a config-declared file path against the config file's directory.
///
/// Tilde expansion first, then root-relative resolution. Paths in the config
/// are never interpreted relative to the process working directory.
pub fn expand_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(path.to_str().unwrap_or_default()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}

/// Check whether a target is a well-formed absolute http(s) URL.
pub fn is_external_url(target: &str) -> bool {
    match url::Url::parse(target) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate a nav/sidebar/social target.
///
/// A target must be either an absolute http(s) URL or a site-absolute path
/// beginning with `/` (resolved under the configured base by the generator).
pub fn validate_target(target: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if target.starts_with('/') || is_external_url(target) {
        return;
    }

    diag.error_with_hint(
        field,
        format!("invalid link target '{target}'"),
        "use an absolute URL (https://...) or a site path starting with '/'",
    );
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_url() {
        assert!(is_external_url("https://github.com/flux-lang/flux"));
        assert!(is_external_url("http://localhost/guide"));

        // Scheme without host
        assert!(!is_external_url("mailto:dev@flux-lang.org"));
        // Not a URL at all
        assert!(!is_external_url("guide/intro"));
        // Site paths are not external URLs
        assert!(!is_external_url("/guide/"));
    }

    #[test]
    fn test_validate_target_accepts_site_paths_and_urls() {
        let field = FieldPath::new("theme.nav");

        let mut diag = ConfigDiagnostics::new();
        validate_target("/guide/", field, &mut diag);
        validate_target("https://github.com/flux-lang/flux", field, &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_target_rejects_relative_paths() {
        let field = FieldPath::new("theme.nav");

        let mut diag = ConfigDiagnostics::new();
        validate_target("guide/intro", field, &mut diag);
        validate_target("ftp://example.com/file", field, &mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_expand_path_root_relative() {
        let root = Path::new("/srv/flux-docs");
        let resolved = expand_path(Path::new("syntaxes/flux.tmLanguage.json"), root);
        assert_eq!(
            resolved,
            PathBuf::from("/srv/flux-docs/syntaxes/flux.tmLanguage.json")
        );
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        let root = Path::new("/srv/flux-docs");
        let resolved = expand_path(Path::new("/etc/grammar.json"), root);
        assert_eq!(resolved, PathBuf::from("/etc/grammar.json"));
    }
}
