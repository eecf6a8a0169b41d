//! Utilities for path collection, output naming, opening results and PDF
//! object copying.

use crate::{Result, error::PdfMergerError};
use lopdf::{Document, Object};
use std::path::{Path, PathBuf};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`. A pattern that matches
/// nothing is kept verbatim so that the caller reports it as missing
/// instead of silently dropping it.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        let paths = collect_paths_for_pattern(pattern)?;
        if paths.is_empty() {
            resolved_paths.push(PathBuf::from(pattern));
        } else {
            resolved_paths.extend(paths);
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths, sorted.
fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern.as_ref()).map_err(|err| PdfMergerError::Other {
        message: format!("Invalid pattern '{}': {err}", pattern.as_ref()),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfMergerError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// First `<dir>/<base_name>_<n>.<extension>` that does not exist, `n >= 1`.
pub fn unique_output_path(dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    let mut counter: u32 = 1;
    loop {
        let candidate = dir.join(format!("{base_name}_{counter}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Directory for outputs written without an explicit path.
///
/// The user's desktop when it exists, else the home directory, else the
/// current directory.
pub fn default_output_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from);

    match home {
        Some(home) => {
            let desktop = home.join("Desktop");
            if desktop.is_dir() { desktop } else { home }
        }
        None => PathBuf::from("."),
    }
}

/// Open `path` in the platform's default viewer.
///
/// Returns whether a viewer was launched. A missing file or a launch
/// failure is logged as a warning and never surfaces as an error.
pub fn open_in_viewer(path: &Path) -> bool {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "cannot open missing file");
        return false;
    }

    match opener::open(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "opened file");
            true
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to open file");
            false
        }
    }
}

/// Format file size the way the file list shows it: `B`, `KB` or `MB`.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{:.1} MB", size as f64 / MB as f64)
    }
}

/// Copy object references from one PDF document to another.
///
/// Walks `obj` recursively and inserts every referenced object missing from
/// `target`, keeping its id. Callers must make sure the id ranges of `source`
/// and `target` do not overlap (see `Document::renumber_objects_with`).
///
/// `Parent` links of page tree nodes are not followed: a copied page gets a
/// new parent in the target, and following the old one would drag the whole
/// source page tree along.
pub fn copy_references(target: &mut Document, source: &Document, obj: &Object) {
    match obj {
        Object::Reference(ref_id) => {
            if !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced_obj.clone());
                copy_references(target, source, referenced_obj);
            }
        }
        Object::Dictionary(dict) => {
            let is_tree_node = matches!(
                dict.get(b"Type").and_then(|t| t.as_name()),
                Ok(b"Page") | Ok(b"Pages")
            );
            for (key, value) in dict.iter() {
                if is_tree_node && key.as_slice() == b"Parent" {
                    continue;
                }
                copy_references(target, source, value);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_references(target, source, item);
            }
        }
        Object::Stream(stream) => {
            copy_references(target, source, &Object::Dictionary(stream.dict.clone()));
        }
        _ => {}
    }
}
