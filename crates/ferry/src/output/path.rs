//! Collision-safe output file naming.

use std::path::{Path, PathBuf};

/// Picks the file an export is written to.
///
/// Returns `directory/name extension` when `overwrite` is set or nothing
/// exists there yet. Otherwise tries `name1`, `name2`, ... and returns the
/// first candidate that does not exist.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ferry::output::resolve_output_path;
///
/// let dir = tempfile::tempdir().unwrap();
/// let first = resolve_output_path(dir.path(), "SequenceDiagram", ".svg", false);
/// assert_eq!(first, dir.path().join("SequenceDiagram.svg"));
///
/// std::fs::write(&first, "").unwrap();
/// let second = resolve_output_path(dir.path(), "SequenceDiagram", ".svg", false);
/// assert_eq!(second, dir.path().join("SequenceDiagram1.svg"));
/// ```
pub fn resolve_output_path(
    directory: &Path,
    name: &str,
    extension: &str,
    overwrite: bool,
) -> PathBuf {
    let candidate = directory.join(format!("{name}{extension}"));
    if overwrite || !candidate.exists() {
        return candidate;
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = directory.join(format!("{name}{suffix}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        suffix += 1;
    }
}
