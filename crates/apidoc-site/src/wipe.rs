//! Removal of previously generated output.
//!
//! Only three kinds of paths are ever deleted: resource mirror subtrees,
//! common pages at their exact destination, and files matching a mask built
//! from a configured filename pattern. Anything else under the target is left
//! in place.

use std::fs;
use std::path::{Path, PathBuf};

use apidoc_config::{Config, PLACEHOLDER};
use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

/// Build the glob mask for a filename pattern: the placeholder becomes `*`.
///
/// Returns `None` for a pattern without placeholder.
fn mask(pattern: &str) -> Option<Pattern> {
    let (prefix, suffix) = pattern.split_once(PLACEHOLDER)?;
    let mask = format!("{}*{}", Pattern::escape(prefix), Pattern::escape(suffix));
    Pattern::new(&mask).ok()
}

fn remove_tree(root: &Path) -> bool {
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %root.display(), error = %e, "Failed to walk resource directory");
                return false;
            }
        };
        let path = entry.path();
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete");
            return false;
        }
    }
    if let Err(e) = fs::remove_dir(root) {
        tracing::warn!(path = %root.display(), error = %e, "Failed to delete directory");
        return false;
    }
    true
}

fn remove_file(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete");
            false
        }
    }
}

/// Files under `target` matching any generated-page mask.
///
/// Returns `None` if part of the tree cannot be walked.
fn matching_files(target: &Path, masks: &[Pattern]) -> Option<Vec<PathBuf>> {
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };
    let matches = |path: &Path, name: &str| {
        let Ok(relative) = path.strip_prefix(target) else {
            return false;
        };
        let relative = apidoc_model::relative_path(Path::new(""), relative);
        masks.iter().any(|mask| {
            if mask.as_str().contains('/') {
                mask.matches_with(&relative, options)
            } else {
                mask.matches_with(name, options)
            }
        })
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(target).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "Failed to walk output directory");
                return None;
            }
        };
        if entry.file_type().is_file() && matches(entry.path(), &entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    Some(files)
}

/// Delete everything a previous run generated under `target`.
///
/// Common outputs are removed only at `target/<dest>`, never by name elsewhere.
/// Returns `false` on the first failed walk or deletion. Nothing is rolled
/// back. A missing target counts as already wiped.
pub fn wipe_out_target(target: &Path, config: &Config) -> bool {
    if !target.exists() {
        return true;
    }

    for resource in &config.resources_resolved {
        let dir = target.join(&resource.destination);
        if dir.is_dir() && !remove_tree(&dir) {
            return false;
        }
    }

    for destination in config.templates_resolved.common.keys() {
        let file = target.join(destination);
        if file.is_file() && !remove_file(&file) {
            return false;
        }
    }

    let masks: Vec<Pattern> = config
        .filenames
        .patterns()
        .filter_map(|(_, pattern)| mask(pattern))
        .collect();
    let Some(files) = matching_files(target, &masks) else {
        return false;
    };
    tracing::debug!(count = files.len(), target = %target.display(), "Deleting generated pages");
    files.iter().all(|file| remove_file(file))
}
