//! `fluxdoc watch` command: rebuild the descriptor when inputs change.
//!
//! The watcher covers every file the descriptor is built from: the config
//! file itself, each registered grammar file, and the extension stylesheet.
//! On change, the descriptor is rebuilt wholesale and atomically swapped —
//! never patched in place — so a failed reload keeps the previous descriptor
//! live. Content hashing gates the rebuild: editors that touch files without
//! changing bytes do not trigger one.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashMap;

use crate::config::SiteConfig;
use crate::logger::{status_error, status_success, status_unchanged};
use crate::{debug, log};

/// Editors fire bursts of events per save; wait this long for the burst to end.
const DEBOUNCE: Duration = Duration::from_millis(80);

/// Poll interval for the shutdown flag while no events arrive.
const IDLE_TICK: Duration = Duration::from_millis(200);

pub fn run(initial: SiteConfig, config_arg: &Path) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .context("failed to set Ctrl+C handler")?;
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })?;

    let mut watched = rewatch(&mut watcher, &initial, &[])?;
    let mut hashes = hash_inputs(&watched);

    let current = ArcSwap::from_pointee(initial);

    log!("watch"; "watching {} file(s), Ctrl+C to stop", watched.len());

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        let event = match rx.recv_timeout(IDLE_TICK) {
            Ok(Ok(event)) => event,
            Ok(Err(err)) => {
                log!("watch"; "watcher error: {err}");
                continue;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if !is_relevant(&event, &watched) {
            continue;
        }

        // Drain the rest of the burst before reloading.
        while rx.recv_timeout(DEBOUNCE).is_ok() {}

        let new_hashes = hash_inputs(&watched);
        if new_hashes == hashes {
            status_unchanged("inputs unchanged");
            continue;
        }
        hashes = new_hashes;

        match SiteConfig::load(config_arg) {
            Ok(config) => {
                // The input set may have changed (new grammar file, renamed
                // stylesheet), so the watch set follows the new descriptor.
                watched = rewatch(&mut watcher, &config, &watched)?;
                hashes = hash_inputs(&watched);
                current.store(Arc::new(config));

                let config = current.load();
                status_success(&format!(
                    "configuration reloaded ({} nav, {} sidebar prefixes, {} grammars)",
                    config.theme.nav.len(),
                    config.theme.sidebar.len(),
                    config.markdown.languages.len(),
                ));
            }
            Err(err) => {
                // Previous descriptor stays live; watch set stays as-is so
                // the fix triggers another reload.
                let err = anyhow::Error::new(err);
                status_error("configuration invalid", &format!("{err:#}"));
            }
        }
    }

    log!("watch"; "shutting down");
    Ok(())
}

// ============================================================================
// watch set
// ============================================================================

/// Every file the descriptor is built from.
fn input_paths(config: &SiteConfig) -> Vec<PathBuf> {
    let mut paths = vec![config.config_path.clone()];
    if let Some(stylesheet) = &config.theme.stylesheet {
        paths.push(stylesheet.clone());
    }
    for lang in &config.markdown.languages {
        paths.push(lang.path.clone());
    }
    paths
}

/// Unique parent directories of the input files.
///
/// Directories are watched instead of files so rename-replace saves
/// (the common editor strategy) keep being observed.
fn watch_roots(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    for path in paths {
        if let Some(parent) = path.parent()
            && !roots.iter().any(|root| root == parent)
        {
            roots.push(parent.to_path_buf());
        }
    }
    roots
}

/// Point the watcher at the given config's inputs, dropping the old set.
fn rewatch(
    watcher: &mut RecommendedWatcher,
    config: &SiteConfig,
    previous: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    for root in watch_roots(previous) {
        let _ = watcher.unwatch(&root);
    }

    let paths = input_paths(config);
    for root in watch_roots(&paths) {
        watcher
            .watch(&root, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;
    }
    Ok(paths)
}

/// Only mutations of watched input files are worth a reload.
fn is_relevant(event: &Event, watched: &[PathBuf]) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event.paths.iter().any(|path| watched.contains(path))
}

/// Hash every watched file's content; missing files are simply absent.
fn hash_inputs(paths: &[PathBuf]) -> FxHashMap<PathBuf, [u8; 32]> {
    let mut hashes = FxHashMap::default();
    for path in paths {
        if let Ok(content) = std::fs::read(path) {
            let hash = blake3::hash(&content);
            debug!("watch"; "{} {}", &hex::encode(hash.as_bytes())[..8], path.display());
            hashes.insert(path.clone(), *hash.as_bytes());
        }
    }
    hashes
}

// ============================================================================
// tests
// ============================================================================
